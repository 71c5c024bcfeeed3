use crate::model::{NodeId, TreeNode};

/// A node received a new name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRenameEvent {
    pub id: NodeId,
    pub name: String,
    pub old_name: String,
}

/// A node was appended to the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeCreateEvent {
    pub parent_id: Option<NodeId>,
    pub node: TreeNode,
}

/// A node was dropped onto another node and moved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeDropEvent {
    pub source_id: NodeId,
    /// Node the source was dropped on.
    pub target_id: NodeId,
    /// New parent of the source, `None` when it landed at root level.
    pub destination_id: Option<NodeId>,
}

/// A subtree was removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeDeleteEvent {
    pub id: NodeId,
    /// Ids of the removed node and all of its descendants, pre-order.
    pub removed_ids: Vec<NodeId>,
}

/// Structural outcome of a successful command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEffect {
    Renamed(TreeRenameEvent),
    Created(TreeCreateEvent),
    Moved(TreeDropEvent),
    Deleted(TreeDeleteEvent),
}
