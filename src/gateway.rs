// src/gateway.rs
// Player actions sent to the game server.
//
// Every mutating action follows the same protocol: send one request, tell the
// player how it went, and on success ask the game store to re-fetch the game.
// Failures are reported to the player and swallowed. Only the chosen techs
// query hands its failure back to the caller.

use std::sync::Arc;

use serde_json::Value;

use crate::defs::{JSON_CONTENT_TYPE, PLAYER_PATH, STATUS_GONE, segment_url};
use crate::error::GatewayError;
use crate::game_state::GameStateStore;
use crate::item::{ItemDto, ItemSelection};
use crate::logging::{log_debug, log_error, log_warning};
use crate::notifier::Notifier;
use crate::session::CurrentUser;
use crate::tech::SelectedTech;
use crate::transport::{HttpRequest, Transport};

/// Why a player action did not go through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionFailure {
    /// The sheet has nothing left to draw
    Exhausted,
    Generic { status: Option<u16> },
}

impl ActionFailure {
    fn generic(error: &GatewayError) -> Self {
        ActionFailure::Generic { status: error.status() }
    }

    fn from_draw(error: &GatewayError) -> Self {
        match error.status() {
            Some(STATUS_GONE) => ActionFailure::Exhausted,
            status => ActionFailure::Generic { status },
        }
    }
}

/// Result of a mutating action, already reported to the player
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Completed(Value),
    Failed(ActionFailure),
}

impl ActionOutcome {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, ActionOutcome::Completed(_))
    }

    #[must_use]
    pub fn failure(&self) -> Option<ActionFailure> {
        match self {
            ActionOutcome::Completed(_) => None,
            ActionOutcome::Failed(failure) => Some(*failure),
        }
    }
}

pub struct PlayerGateway {
    base_url: String,
    transport: Arc<dyn Transport>,
    notifier: Arc<dyn Notifier>,
    store: Arc<dyn GameStateStore>,
    user: Arc<dyn CurrentUser>,
}

impl PlayerGateway {
    pub fn new(
        base_url: &str,
        transport: Arc<dyn Transport>,
        notifier: Arc<dyn Notifier>,
        store: Arc<dyn GameStateStore>,
        user: Arc<dyn CurrentUser>,
    ) -> Self {
        Self {
            base_url: base_url.to_string(),
            transport,
            notifier,
            store,
            user,
        }
    }

    // Every piece of `action` ends up as exactly one path segment
    fn player_url(&self, game_id: &str, action: &[&str]) -> Result<String, GatewayError> {
        let mut segments = vec![PLAYER_PATH, game_id];
        segments.extend_from_slice(action);
        segment_url(&self.base_url, &segments)
    }

    pub async fn reveal_item(&self, game_id: &str, item: ItemSelection) -> ActionOutcome {
        let result = match self.player_url(game_id, &["item", "reveal"]) {
            Ok(url) => self.send_item(HttpRequest::put(url), game_id, item).await,
            Err(error) => Err(error),
        };
        self.settle(game_id, result, "Item revealed", |error| {
            (ActionFailure::generic(error), "Item could not be revealed".to_string())
        })
    }

    pub async fn draw_item(&self, game_id: &str, sheet_name: &str) -> ActionOutcome {
        let result = match self.player_url(game_id, &["draw", sheet_name]) {
            Ok(url) => self.execute(HttpRequest::post(url)).await,
            Err(error) => Err(error),
        };
        self.settle(game_id, result, "Item successfully drawn", |error| {
            match ActionFailure::from_draw(error) {
                ActionFailure::Exhausted => (
                    ActionFailure::Exhausted,
                    format!("There are no more {sheet_name} to draw!"),
                ),
                failure => (failure, "Item could not be drawn".to_string()),
            }
        })
    }

    pub async fn discard_item(&self, game_id: &str, item: ItemSelection) -> ActionOutcome {
        let result = match self.player_url(game_id, &["item", "discard"]) {
            Ok(url) => self.send_item(HttpRequest::post(url), game_id, item).await,
            Err(error) => Err(error),
        };
        self.settle(game_id, result, "Item discarded", |error| {
            (ActionFailure::generic(error), "Item could not be discarded".to_string())
        })
    }

    pub async fn end_turn(&self, game_id: &str) -> ActionOutcome {
        let result = match self.player_url(game_id, &["endturn"]) {
            Ok(url) => self.execute(HttpRequest::put(url)).await,
            Err(error) => Err(error),
        };
        self.settle(game_id, result, "Turn ended", |error| {
            (ActionFailure::generic(error), "Could not end turn".to_string())
        })
    }

    pub async fn select_tech(&self, game_id: &str, selected_tech: &SelectedTech) -> ActionOutcome {
        let result = match self.player_url(game_id, &["tech", "choose"]) {
            Ok(url) => self.execute(HttpRequest::put(url).query("name", selected_tech.name())).await,
            Err(error) => Err(error),
        };
        self.settle(game_id, result, "Tech chosen successfully", |error| {
            (ActionFailure::generic(error), "Could not choose tech".to_string())
        })
    }

    /// Techs the current player has chosen in this game, exactly as the server sent them
    pub async fn get_chosen_techs(&self, game_id: &str) -> Result<Value, GatewayError> {
        match self.fetch_chosen_techs(game_id).await {
            Ok(data) => Ok(data),
            Err(error) => {
                log_error(&format!("Could not get chosen techs for game {game_id}: {error}"));
                self.notifier.error("Could not get chosen techs");
                Err(error)
            }
        }
    }

    async fn fetch_chosen_techs(&self, game_id: &str) -> Result<Value, GatewayError> {
        let player_id = self.user.player_id();
        if player_id.is_empty() {
            return Err(GatewayError::MissingPlayer);
        }
        let url = self.player_url(game_id, &["tech", player_id.as_str()])?;
        self.execute(HttpRequest::get(url)).await
    }

    async fn send_item(
        &self,
        request: HttpRequest,
        game_id: &str,
        item: ItemSelection,
    ) -> Result<Value, GatewayError> {
        let dto = ItemDto::from_selection(item, game_id);
        let request = request.header("Content-Type", JSON_CONTENT_TYPE).json(&dto)?;
        if let Some(body) = &request.body {
            log_debug(&format!("Sending {} {} with {body}", request.method, request.url));
        }
        self.execute(request).await
    }

    async fn execute(&self, request: HttpRequest) -> Result<Value, GatewayError> {
        let response = self.transport.request(request).await?;
        if response.is_success() {
            Ok(response.data)
        } else {
            Err(GatewayError::Status { status: response.status, data: response.data })
        }
    }

    // Notify the player, then refresh on success. The refresh is not awaited.
    fn settle<F>(
        &self,
        game_id: &str,
        result: Result<Value, GatewayError>,
        success_message: &str,
        on_failure: F,
    ) -> ActionOutcome
    where
        F: FnOnce(&GatewayError) -> (ActionFailure, String),
    {
        match result {
            Ok(data) => {
                self.notifier.success(success_message);
                self.store.refresh(game_id);
                ActionOutcome::Completed(data)
            }
            Err(error) => {
                let (failure, message) = on_failure(&error);
                log_warning(&format!("{message} (game {game_id}): {error}"));
                self.notifier.error(&message);
                ActionOutcome::Failed(failure)
            }
        }
    }
}
