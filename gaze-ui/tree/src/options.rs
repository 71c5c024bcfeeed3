use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Behaviour switches for a [`TreeStore`](crate::TreeStore).
///
/// Keys use camelCase when loaded from JSON; missing keys keep their
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TreeStoreOptions {
    /// Expand every branch above this depth when the store is created.
    pub initial_expand_depth: Option<usize>,
    /// Allow toggling several nodes and range selection.
    pub multi_select: bool,
    /// Allow drag sessions and node moves.
    pub draggable: bool,
    /// Allow inline editing to start.
    pub editable: bool,
}

impl Default for TreeStoreOptions {
    fn default() -> Self {
        Self {
            initial_expand_depth: None,
            multi_select: true,
            draggable: true,
            editable: true,
        }
    }
}

impl TreeStoreOptions {
    /// Parse options from a JSON object.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
