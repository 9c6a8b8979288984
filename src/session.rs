// src/session.rs
// Who is sitting at the keyboard

use crate::config::PlayerConfig;

/// Gives access to the acting player's id
pub trait CurrentUser: Send + Sync {
    fn player_id(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: String,
    pub username: String,
}

impl Profile {
    pub fn new(id: &str, username: &str) -> Self {
        Self { id: id.to_string(), username: username.to_string() }
    }

    pub fn from_config(config: &PlayerConfig) -> Self {
        Self::new(&config.player_id, &config.username)
    }
}

impl CurrentUser for Profile {
    fn player_id(&self) -> String {
        self.id.clone()
    }
}
