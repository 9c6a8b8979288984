// src/config.rs
// Player client configuration loaded from a simple `key = value` file

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::defs::DEFAULT_CONFIG_PATH;
use crate::logging::{log_info, log_warning};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerConfig {
    pub host: String,
    pub port: u16,
    pub base_path: String,
    pub timeout: u64,
    pub player_id: String,
    pub username: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            base_path: "/api".to_string(),
            timeout: 30,
            player_id: String::new(),
            username: "anonymous".to_string(),
        }
    }
}

impl PlayerConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_map(&parse_config(&content)))
    }

    fn from_map(config_map: &HashMap<String, String>) -> Self {
        let defaults = Self::default();

        let host = config_map.get("host").cloned().unwrap_or(defaults.host);

        let port = config_map.get("port")
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(defaults.port);

        let base_path = config_map.get("base_path").cloned().unwrap_or(defaults.base_path);

        let timeout = config_map.get("timeout")
            .and_then(|t| t.parse::<u64>().ok())
            .unwrap_or(defaults.timeout);

        let player_id = config_map.get("player_id").cloned().unwrap_or(defaults.player_id);
        let username = config_map.get("username").cloned().unwrap_or(defaults.username);

        PlayerConfig { host, port, base_path, timeout, player_id, username }
    }

    /// Load from `path` (or the default location), falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let config_path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));

        match Self::from_file(config_path) {
            Ok(config) => {
                log_info(&format!("Loaded player configuration from {}", config_path.display()));
                config
            }
            Err(e) => {
                log_warning(&format!("Could not load player config from {}: {}. Using defaults.", config_path.display(), e));
                Self::default()
            }
        }
    }

    /// Root url every endpoint hangs off, e.g. `http://127.0.0.1:8080/api`
    #[must_use]
    pub fn base_url(&self) -> String {
        let base_path = self.base_path.trim_matches('/');
        if base_path.is_empty() {
            format!("http://{}:{}", self.host, self.port)
        } else {
            format!("http://{}:{}/{}", self.host, self.port, base_path)
        }
    }
}

fn parse_config(content: &str) -> HashMap<String, String> {
    let mut config = HashMap::new();

    for line in content.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            config.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    config
}
