use std::collections::{BTreeSet, HashSet};

use crate::model::{
    DragState, FlatTreeNode, NodeId, Parent, TreeNode, find_node,
    find_parent_node, flatten_tree,
};

/// Complete tree snapshot: node hierarchy plus expansion, selection,
/// focus, drag and edit state.
///
/// Every store operation produces a new value; a snapshot handed out
/// earlier is never changed afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeState {
    pub(crate) nodes: Vec<TreeNode>,
    pub(crate) expanded_ids: BTreeSet<NodeId>,
    pub(crate) selected_ids: BTreeSet<NodeId>,
    pub(crate) focused_id: Option<NodeId>,
    pub(crate) drag_state: DragState,
    pub(crate) editing_id: Option<NodeId>,
}

impl TreeState {
    /// Create a state with the given roots and empty auxiliary fields.
    pub fn new(nodes: Vec<TreeNode>) -> Self {
        Self {
            nodes,
            ..Self::default()
        }
    }

    // --- Read access ---

    /// Return root-level nodes.
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    /// Return ids of expanded nodes.
    pub fn expanded_ids(&self) -> &BTreeSet<NodeId> {
        &self.expanded_ids
    }

    /// Return ids of selected nodes.
    pub fn selected_ids(&self) -> &BTreeSet<NodeId> {
        &self.selected_ids
    }

    /// Return the keyboard focus, if any.
    pub fn focused_id(&self) -> Option<&NodeId> {
        self.focused_id.as_ref()
    }

    /// Return the current drag session.
    pub fn drag_state(&self) -> &DragState {
        &self.drag_state
    }

    /// Return the node being renamed inline, if any.
    pub fn editing_id(&self) -> Option<&NodeId> {
        self.editing_id.as_ref()
    }

    /// Return whether `id` is in the expansion set.
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded_ids.contains(id)
    }

    /// Return whether `id` is selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_ids.contains(id)
    }

    /// Return whether a node with this id exists anywhere in the tree.
    pub fn contains(&self, id: &str) -> bool {
        self.find_node(id).is_some()
    }

    /// Return the node with this id.
    pub fn find_node(&self, id: &str) -> Option<&TreeNode> {
        find_node(&self.nodes, id)
    }

    /// Return the parent position of the node with this id.
    pub fn find_parent_node(&self, id: &str) -> Option<Parent<'_>> {
        find_parent_node(&self.nodes, id)
    }

    /// Compute the visible rows for the current expansion set.
    pub fn visible_nodes(&self) -> Vec<FlatTreeNode<'_>> {
        flatten_tree(&self.nodes, &self.expanded_ids)
    }

    // --- Write access ---

    /// Drop every reference to the given ids from auxiliary state.
    pub(crate) fn purge(&mut self, ids: &[NodeId]) {
        let removed: HashSet<&NodeId> = ids.iter().collect();

        self.expanded_ids.retain(|id| !removed.contains(id));
        self.selected_ids.retain(|id| !removed.contains(id));
        if self.focused_id.as_ref().is_some_and(|id| removed.contains(id)) {
            self.focused_id = None;
        }
        if self.editing_id.as_ref().is_some_and(|id| removed.contains(id)) {
            self.editing_id = None;
        }
        if self
            .drag_state
            .source_id()
            .is_some_and(|id| removed.contains(id))
        {
            self.drag_state = DragState::default();
        } else if self
            .drag_state
            .target_id()
            .is_some_and(|id| removed.contains(id))
        {
            self.drag_state.target_id = None;
        }
    }
}
