// src/item.rs
// Items (cards, units, huts, villages...) and the selection the UI hands us

use serde::{Deserialize, Serialize};

/// A game piece as the server knows it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub name: String,
    pub owner_id: String,
    pub sheet_name: String,
}

impl Item {
    pub fn new(name: &str, owner_id: &str, sheet_name: &str) -> Self {
        Self {
            name: name.to_string(),
            owner_id: owner_id.to_string(),
            sheet_name: sheet_name.to_string(),
        }
    }
}

/// The item the player currently has selected.
///
/// UI selections arrive either as a bare item or keyed by item id. For keyed
/// selections only the first entry counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemSelection {
    Bare(Item),
    Keyed(Vec<(String, Item)>),
}

impl ItemSelection {
    pub fn keyed(key: &str, item: Item) -> Self {
        ItemSelection::Keyed(vec![(key.to_string(), item)])
    }

    /// Unwrap a keyed selection into the item it holds.
    ///
    /// Bare items and empty selections are returned unchanged.
    #[must_use]
    pub fn next_element(self) -> Self {
        match self {
            ItemSelection::Keyed(mut entries) if !entries.is_empty() => {
                ItemSelection::Bare(entries.swap_remove(0).1)
            }
            other => other,
        }
    }

    /// The item this selection points at, if any
    #[must_use]
    pub fn item(&self) -> Option<&Item> {
        match self {
            ItemSelection::Bare(item) => Some(item),
            ItemSelection::Keyed(entries) => entries.first().map(|(_, item)| item),
        }
    }
}

impl From<Item> for ItemSelection {
    fn from(item: Item) -> Self {
        ItemSelection::Bare(item)
    }
}

impl FromIterator<(String, Item)> for ItemSelection {
    fn from_iter<I: IntoIterator<Item = (String, Item)>>(iter: I) -> Self {
        ItemSelection::Keyed(iter.into_iter().collect())
    }
}

/// Body of the reveal and discard requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet_name: Option<String>,
    pub pbf_id: String,
}

impl ItemDto {
    /// Normalize `selection` and stamp it with the game id.
    /// An empty selection yields a DTO carrying only the game id.
    pub fn from_selection(selection: ItemSelection, game_id: &str) -> Self {
        let selection = selection.next_element();
        let item = selection.item();
        Self {
            name: item.map(|i| i.name.clone()),
            owner_id: item.map(|i| i.owner_id.clone()),
            sheet_name: item.map(|i| i.sheet_name.clone()),
            pbf_id: game_id.to_string(),
        }
    }
}
