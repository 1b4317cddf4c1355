use crate::modules::catalog::domain::CatalogItem;
use serde::{Deserialize, Serialize};

/// Which branch a toggle operation took
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ToggleAction {
    Added,
    Removed,
}

/// Result of `toggle_favorite` / `toggle_member`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToggleOutcome {
    pub action: ToggleAction,
    pub item: CatalogItem,
}
