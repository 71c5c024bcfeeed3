use thiserror::Error;

use crate::model::NodeId;

/// Errors emitted while loading tree data or store configuration.
///
/// Store operations never fail; they leave the state untouched instead.
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("node id `{id}` is used more than once")]
    DuplicateId { id: NodeId },
}

pub type Result<T> = std::result::Result<T, TreeError>;
