// src/game_state.rs
// Client-side copy of the authoritative game, refreshed from the server

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::task::JoinHandle;

use crate::defs::{GAME_PATH, segment_url};
use crate::error::GatewayError;
use crate::logging::{log_debug, log_error, log_warning};
use crate::transport::{HttpRequest, Transport};

/// Holds the latest game state and knows how to re-fetch it.
///
/// `refresh` must return immediately and may be called concurrently for the
/// same game; the last refresh to complete wins.
pub trait GameStateStore: Send + Sync {
    fn refresh(&self, game_id: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GameType {
    Base,
    Faf,
    Waw,
    Doc,
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GameType::Base => "Base game",
            GameType::Faf => "Fame and Fortune",
            GameType::Waw => "Wisdom and Warfare",
            GameType::Doc => "Dawn of Civilization",
        };
        write!(f, "{label}")
    }
}

/// The handful of game fields the command line shows after an action
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub game_type: Option<GameType>,
    #[serde(default)]
    pub num_of_players: Option<u32>,
}

impl fmt::Display for GameSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)?;
        if let Some(game_type) = self.game_type {
            write!(f, " - {game_type}")?;
        }
        if let Some(players) = self.num_of_players {
            write!(f, ", {players} players")?;
        }
        Ok(())
    }
}

type GameMap = Arc<Mutex<HashMap<String, Value>>>;

/// Game store backed by `GET {base}/game/{id}`
pub struct HttpGameStore {
    base_url: String,
    transport: Arc<dyn Transport>,
    games: GameMap,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl HttpGameStore {
    pub fn new(base_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: base_url.to_string(),
            transport,
            games: Arc::new(Mutex::new(HashMap::new())),
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Fetch the game now and store it
    pub async fn fetch_game(&self, game_id: &str) -> Result<Value, GatewayError> {
        fetch_into(self.transport.as_ref(), &self.base_url, &self.games, game_id).await
    }

    /// Last fetched representation of the game
    #[must_use]
    pub fn game(&self, game_id: &str) -> Option<Value> {
        self.games.lock().ok()?.get(game_id).cloned()
    }

    #[must_use]
    pub fn summary(&self, game_id: &str) -> Option<GameSummary> {
        self.game(game_id).and_then(|game| serde_json::from_value(game).ok())
    }

    /// Wait until every refresh started so far has finished
    pub async fn wait_for_refreshes(&self) {
        let handles: Vec<JoinHandle<()>> = match self.pending.lock() {
            Ok(mut pending) => pending.drain(..).collect(),
            Err(_) => return,
        };
        for handle in handles {
            if let Err(e) = handle.await {
                log_error(&format!("Game refresh task failed: {e}"));
            }
        }
    }
}

impl GameStateStore for HttpGameStore {
    fn refresh(&self, game_id: &str) {
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(_) => {
                log_warning(&format!("No async runtime available, skipping refresh of game {game_id}"));
                return;
            }
        };

        let transport = Arc::clone(&self.transport);
        let base_url = self.base_url.clone();
        let games = Arc::clone(&self.games);
        let game_id = game_id.to_string();

        let handle = runtime.spawn(async move {
            if let Err(e) = fetch_into(transport.as_ref(), &base_url, &games, &game_id).await {
                log_error(&format!("Could not refresh game {game_id}: {e}"));
            }
        });

        if let Ok(mut pending) = self.pending.lock() {
            pending.retain(|h| !h.is_finished());
            pending.push(handle);
        }
    }
}

async fn fetch_into(
    transport: &dyn Transport,
    base_url: &str,
    games: &GameMap,
    game_id: &str,
) -> Result<Value, GatewayError> {
    let url = segment_url(base_url, &[GAME_PATH, game_id])?;
    let response = transport.request(HttpRequest::get(url)).await?;

    if !response.is_success() {
        return Err(GatewayError::Status { status: response.status, data: response.data });
    }

    if let Ok(mut games) = games.lock() {
        games.insert(game_id.to_string(), response.data.clone());
    }
    log_debug(&format!("Fetched game {game_id} from server"));
    Ok(response.data)
}
