use crate::model::{NodeId, TreeNode};

/// Mutations accepted by [`TreeStore::dispatch`](crate::TreeStore::dispatch).
#[derive(Debug, Clone, PartialEq)]
pub enum TreeCommand {
    /// Flip the expansion of a node that has children.
    ToggleExpand { id: NodeId },
    /// Expand a node that has children.
    Expand { id: NodeId },
    Collapse { id: NodeId },
    /// Replace the expansion set with every branch above `max_depth`.
    ExpandAll { max_depth: Option<usize> },
    CollapseAll,
    /// Select a node; `multi` toggles it within the current selection.
    SelectNode { id: NodeId, multi: bool },
    /// Add every visible row between two nodes to the selection.
    SelectRange { start_id: NodeId, end_id: NodeId },
    SelectAll,
    ClearSelection,
    SetFocus { id: Option<NodeId> },
    StartEditing { id: NodeId },
    StopEditing,
    RenameNode { id: NodeId, name: String },
    /// Append a node to a parent, or to the roots when `parent_id` is `None`.
    CreateNode {
        parent_id: Option<NodeId>,
        node: TreeNode,
    },
    DeleteNode { id: NodeId },
    /// Reparent `source_id` onto `target_id` (drop).
    MoveNode { source_id: NodeId, target_id: NodeId },
    StartDrag { source_id: NodeId },
    SetDragTarget { target_id: Option<NodeId> },
    EndDrag,
    /// Replace the roots without reconciling auxiliary state.
    SetNodes { nodes: Vec<TreeNode> },
}
