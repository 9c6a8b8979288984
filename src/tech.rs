// src/tech.rs
// Technologies a player can research

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tech {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
}

/// A tech picked in the tech chooser; only `tech.name` goes over the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedTech {
    pub tech: Tech,
}

impl SelectedTech {
    pub fn named(name: &str) -> Self {
        Self {
            tech: Tech { name: name.to_string(), level: None },
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.tech.name
    }
}
