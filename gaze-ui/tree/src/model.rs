use std::borrow::Borrow;
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{Result, TreeError};

/// Identifier of a node, unique across the whole tree.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Wrap an existing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Return the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Node of the tree.
///
/// A node without a children sequence is a leaf. A node with an empty
/// sequence is a branch that currently has nothing to show; the two are
/// treated differently when choosing a drop destination.
///
/// Children sit behind an [`Arc`], so cloning a node (and therefore a whole
/// [`TreeState`](crate::TreeState)) shares every subtree. Mutations copy only
/// the spine from the root down to the edited node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub(crate) id: NodeId,
    pub(crate) name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) children: Option<Arc<Vec<TreeNode>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) editable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) icon_collapsed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) icon_expanded: Option<String>,
}

impl TreeNode {
    /// Create a leaf node (no children sequence at all).
    pub fn leaf(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            children: None,
            editable: None,
            icon_collapsed: None,
            icon_expanded: None,
        }
    }

    /// Create a branch node owning `children`, which may be empty.
    pub fn branch(
        id: impl Into<NodeId>,
        name: impl Into<String>,
        children: Vec<TreeNode>,
    ) -> Self {
        Self {
            children: Some(Arc::new(children)),
            ..Self::leaf(id, name)
        }
    }

    /// Set the per-node editable flag.
    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = Some(editable);
        self
    }

    /// Attach opaque icon descriptors for both expansion states.
    pub fn with_icons(
        mut self,
        collapsed: impl Into<String>,
        expanded: impl Into<String>,
    ) -> Self {
        self.icon_collapsed = Some(collapsed.into());
        self.icon_expanded = Some(expanded.into());
        self
    }

    /// Append a child, turning a leaf into a branch.
    pub fn with_child(mut self, child: TreeNode) -> Self {
        self.children_mut().push(child);
        self
    }

    /// Return the node id.
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// Return the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the children sequence, or `None` for a leaf.
    pub fn children(&self) -> Option<&[TreeNode]> {
        self.children.as_deref().map(Vec::as_slice)
    }

    /// Return whether the node has no children sequence.
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Return whether the node has at least one child.
    pub fn has_children(&self) -> bool {
        self.children().is_some_and(|children| !children.is_empty())
    }

    /// Return the per-node editable flag; `None` means editable.
    pub fn editable(&self) -> Option<bool> {
        self.editable
    }

    /// Return the icon shown while collapsed.
    pub fn icon_collapsed(&self) -> Option<&str> {
        self.icon_collapsed.as_deref()
    }

    /// Return the icon shown while expanded.
    pub fn icon_expanded(&self) -> Option<&str> {
        self.icon_expanded.as_deref()
    }

    /// Return the children for writing, creating the sequence for a leaf.
    pub(crate) fn children_mut(&mut self) -> &mut Vec<TreeNode> {
        Arc::make_mut(self.children.get_or_insert_with(Default::default))
    }

    fn existing_children_mut(&mut self) -> Option<&mut Vec<TreeNode>> {
        self.children.as_mut().map(Arc::make_mut)
    }
}

/// Position of a node relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parent<'a> {
    /// The node sits in the root sequence.
    Root,
    /// The node is a child of this node.
    Node(&'a TreeNode),
}

impl<'a> Parent<'a> {
    /// Return the parent id, `None` for root-level nodes.
    pub fn id(&self) -> Option<&'a NodeId> {
        match self {
            Parent::Root => None,
            Parent::Node(node) => Some(node.id()),
        }
    }
}

/// Visible row of the flattened tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatTreeNode<'a> {
    /// Borrowed source node.
    pub node: &'a TreeNode,
    /// Zero-based depth (`0` for root-level rows).
    pub depth: usize,
    /// Id of the parent, `None` for root-level rows.
    pub parent_id: Option<&'a NodeId>,
    /// Position among the node's siblings.
    pub index: usize,
}

/// Drag-and-drop intent tracked between drag start and drop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragState {
    pub(crate) is_dragging: bool,
    pub(crate) source_id: Option<NodeId>,
    pub(crate) target_id: Option<NodeId>,
}

impl DragState {
    pub(crate) fn started(source_id: NodeId) -> Self {
        Self {
            is_dragging: true,
            source_id: Some(source_id),
            target_id: None,
        }
    }

    /// Return whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// Return the node being dragged.
    pub fn source_id(&self) -> Option<&NodeId> {
        self.source_id.as_ref()
    }

    /// Return the node currently under the drag.
    pub fn target_id(&self) -> Option<&NodeId> {
        self.target_id.as_ref()
    }
}

/// Depth-first search for a node by id.
pub fn find_node<'a>(nodes: &'a [TreeNode], id: &str) -> Option<&'a TreeNode> {
    nodes.iter().find_map(|node| {
        if node.id == id {
            return Some(node);
        }
        node.children().and_then(|children| find_node(children, id))
    })
}

/// Find the parent of a node.
///
/// Returns `None` when the id is absent, [`Parent::Root`] for root-level
/// nodes and [`Parent::Node`] otherwise.
pub fn find_parent_node<'a>(
    nodes: &'a [TreeNode],
    id: &str,
) -> Option<Parent<'a>> {
    if nodes.iter().any(|node| node.id == id) {
        return Some(Parent::Root);
    }
    find_parent_in(nodes, id).map(Parent::Node)
}

fn find_parent_in<'a>(nodes: &'a [TreeNode], id: &str) -> Option<&'a TreeNode> {
    nodes.iter().find_map(|node| {
        let children = node.children()?;
        if children.iter().any(|child| child.id == id) {
            return Some(node);
        }
        find_parent_in(children, id)
    })
}

/// Pre-order ids of `node` and everything beneath it.
pub fn descendant_ids(node: &TreeNode) -> Vec<&NodeId> {
    let mut ids = Vec::new();
    push_descendant_ids(node, &mut ids);
    ids
}

fn push_descendant_ids<'a>(node: &'a TreeNode, ids: &mut Vec<&'a NodeId>) {
    ids.push(&node.id);
    for child in node.children().unwrap_or_default() {
        push_descendant_ids(child, ids);
    }
}

/// Flatten a tree into the depth-first list of visible rows.
///
/// Children are included only when their parent's id is in `expanded_ids`.
/// Sibling order is preserved.
pub fn flatten_tree<'a>(
    nodes: &'a [TreeNode],
    expanded_ids: &BTreeSet<NodeId>,
) -> Vec<FlatTreeNode<'a>> {
    let mut entries = Vec::new();
    push_level(nodes, 0, None, expanded_ids, &mut entries);
    entries
}

fn push_level<'a>(
    nodes: &'a [TreeNode],
    depth: usize,
    parent_id: Option<&'a NodeId>,
    expanded_ids: &BTreeSet<NodeId>,
    entries: &mut Vec<FlatTreeNode<'a>>,
) {
    for (index, node) in nodes.iter().enumerate() {
        entries.push(FlatTreeNode {
            node,
            depth,
            parent_id,
            index,
        });

        if !expanded_ids.contains(&node.id) {
            continue;
        }
        if let Some(children) = node.children() {
            push_level(
                children,
                depth + 1,
                Some(&node.id),
                expanded_ids,
                entries,
            );
        }
    }
}

/// Every id in the tree, pre-order.
pub(crate) fn all_ids(nodes: &[TreeNode]) -> Vec<&NodeId> {
    let mut ids = Vec::new();
    for node in nodes {
        push_descendant_ids(node, &mut ids);
    }
    ids
}

/// Return the first id that occurs more than once.
pub fn first_duplicate_id(nodes: &[TreeNode]) -> Option<&NodeId> {
    let mut seen = HashSet::new();
    all_ids(nodes).into_iter().find(|id| !seen.insert(*id))
}

/// Check that every id in `nodes` is unique.
pub fn validate_nodes(nodes: &[TreeNode]) -> Result<()> {
    match first_duplicate_id(nodes) {
        Some(id) => Err(TreeError::DuplicateId { id: id.clone() }),
        None => Ok(()),
    }
}

/// Parse and validate a JSON array of nodes.
pub fn nodes_from_json(json: &str) -> Result<Vec<TreeNode>> {
    let nodes: Vec<TreeNode> = serde_json::from_str(json)?;
    validate_nodes(&nodes)?;
    Ok(nodes)
}

/// Sibling indices from the root sequence down to a node.
pub(crate) type IndexPath = Vec<usize>;

pub(crate) fn locate(nodes: &[TreeNode], id: &str) -> Option<IndexPath> {
    for (index, node) in nodes.iter().enumerate() {
        if node.id == id {
            return Some(vec![index]);
        }
        let Some(children) = node.children() else {
            continue;
        };
        if let Some(mut path) = locate(children, id) {
            path.insert(0, index);
            return Some(path);
        }
    }
    None
}

/// Resolve an index path for writing, unsharing every subtree on the way.
pub(crate) fn node_at_mut<'a>(
    nodes: &'a mut [TreeNode],
    path: &[usize],
) -> Option<&'a mut TreeNode> {
    let (head, tail) = path.split_first()?;
    let node = nodes.get_mut(*head)?;
    if tail.is_empty() {
        return Some(node);
    }
    node_at_mut(node.existing_children_mut()?, tail)
}

pub(crate) fn find_node_mut<'a>(
    nodes: &'a mut Vec<TreeNode>,
    id: &str,
) -> Option<&'a mut TreeNode> {
    let path = locate(nodes, id)?;
    node_at_mut(nodes, &path)
}

/// Detach a node together with its subtree.
pub(crate) fn remove_node(
    nodes: &mut Vec<TreeNode>,
    id: &str,
) -> Option<TreeNode> {
    let path = locate(nodes, id)?;
    let (last, parent_path) = path.split_last()?;
    let siblings = if parent_path.is_empty() {
        nodes
    } else {
        node_at_mut(nodes, parent_path)?.existing_children_mut()?
    };
    (*last < siblings.len()).then(|| siblings.remove(*last))
}
