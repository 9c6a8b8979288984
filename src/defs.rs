// src/defs.rs
// Shared constants for talking to the civilization game server

use reqwest::Url;

use crate::error::GatewayError;

/// Path segment under which every player action lives
pub const PLAYER_PATH: &str = "player";

/// Path segment of the full game representation
pub const GAME_PATH: &str = "game";

/// Status the server answers a draw with once the sheet is empty
pub const STATUS_GONE: u16 = 410;

pub const JSON_CONTENT_TYPE: &str = "application/json";

pub const DEFAULT_CONFIG_PATH: &str = "conf/player.conf";

/// Append `segments` to the path of `base_url`, percent-encoding each one
/// so it stays a single path segment.
pub fn segment_url(base_url: &str, segments: &[&str]) -> Result<String, GatewayError> {
    let mut url = Url::parse(base_url)
        .map_err(|e| GatewayError::InvalidUrl(format!("{base_url}: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| GatewayError::InvalidUrl(format!("{base_url} cannot take a path")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url.to_string())
}
