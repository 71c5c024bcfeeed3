use std::fmt;

use crate::command::TreeCommand;
use crate::errors::Result;
use crate::event::{TreeEffect, TreeRenameEvent};
use crate::model::{
    FlatTreeNode, NodeId, TreeNode, first_duplicate_id, nodes_from_json,
};
use crate::navigation;
use crate::options::TreeStoreOptions;
use crate::reducer::{self, Reduction, TreeCtx};
use crate::state::TreeState;

/// Handle returned by [`TreeStore::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Outcome of [`TreeStore::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeUpdate {
    /// The command was a no-op; subscribers were not notified.
    Ignored,
    /// A new state was committed.
    Applied(Option<TreeEffect>),
}

impl TreeUpdate {
    pub fn is_applied(&self) -> bool {
        matches!(self, TreeUpdate::Applied(_))
    }

    pub fn effect(&self) -> Option<&TreeEffect> {
        match self {
            TreeUpdate::Applied(effect) => effect.as_ref(),
            TreeUpdate::Ignored => None,
        }
    }
}

type StateListener = Box<dyn FnMut(&TreeState)>;
type VisibleListener = Box<dyn FnMut(&[FlatTreeNode<'_>])>;

enum Listener {
    State(StateListener),
    Visible(VisibleListener),
}

/// Owner of a [`TreeState`] and its observers.
///
/// Every mutation computes a whole new state; when it differs from the
/// current one it is committed and every observer is called synchronously,
/// in subscription order. Commands that reference unknown ids, would create
/// a cycle or a duplicate id, or are disabled by [`TreeStoreOptions`] leave
/// the state untouched and notify nobody.
///
/// The store is meant for a single owner issuing commands one at a time,
/// such as a UI event loop.
pub struct TreeStore {
    state: TreeState,
    options: TreeStoreOptions,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription_id: u64,
}

impl Default for TreeStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl fmt::Debug for TreeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeStore")
            .field("state", &self.state)
            .field("options", &self.options)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl TreeStore {
    /// Create a store with default options.
    ///
    /// Ids must be unique across `nodes`; check untrusted input with
    /// [`validate_nodes`](crate::validate_nodes). A repeated id is logged
    /// and kept as is.
    pub fn new(nodes: Vec<TreeNode>) -> Self {
        Self::with_options(nodes, TreeStoreOptions::default())
    }

    /// Create a store, applying the initial expansion depth if configured.
    ///
    /// Ids must be unique across `nodes`, as for [`TreeStore::new`].
    pub fn with_options(
        nodes: Vec<TreeNode>,
        options: TreeStoreOptions,
    ) -> Self {
        if let Some(id) = first_duplicate_id(&nodes) {
            log::warn!("tree store created with repeated node id {id}");
        }
        let mut state = TreeState::new(nodes);
        if let Some(depth) = options.initial_expand_depth {
            let ctx = TreeCtx { options: &options };
            let command = TreeCommand::ExpandAll {
                max_depth: Some(depth),
            };
            if let Some(reduction) = reducer::reduce(&state, command, &ctx) {
                state = reduction.state;
            }
        }

        Self {
            state,
            options,
            listeners: Vec::new(),
            next_subscription_id: 0,
        }
    }

    /// Create a store from a JSON array of nodes.
    pub fn from_json(json: &str, options: TreeStoreOptions) -> Result<Self> {
        let nodes = nodes_from_json(json)?;
        Ok(Self::with_options(nodes, options))
    }

    // --- Read access ---

    /// Return the current snapshot.
    pub fn state(&self) -> &TreeState {
        &self.state
    }

    /// Return the options the store was created with.
    pub fn options(&self) -> &TreeStoreOptions {
        &self.options
    }

    /// Return the node with this id.
    pub fn find_node(&self, id: &str) -> Option<&TreeNode> {
        self.state.find_node(id)
    }

    /// Return the rows a renderer should draw, in order.
    pub fn visible_nodes(&self) -> Vec<FlatTreeNode<'_>> {
        self.state.visible_nodes()
    }

    // --- Subscriptions ---

    /// Register an observer of whole-state snapshots.
    ///
    /// The observer is called once right away with the current state.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&TreeState) + 'static,
    ) -> SubscriptionId {
        let mut listener = listener;
        listener(&self.state);
        self.register(Listener::State(Box::new(listener)))
    }

    /// Register an observer of the visible rows.
    ///
    /// The rows are recomputed after each committed change and the observer
    /// is called once right away.
    pub fn subscribe_visible(
        &mut self,
        listener: impl FnMut(&[FlatTreeNode<'_>]) + 'static,
    ) -> SubscriptionId {
        let mut listener = listener;
        listener(&self.state.visible_nodes());
        self.register(Listener::Visible(Box::new(listener)))
    }

    /// Remove an observer. Returns `false` if it was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Return the number of registered observers.
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    fn register(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription_id);
        self.next_subscription_id += 1;
        self.listeners.push((id, listener));
        id
    }

    // --- Commands ---

    /// Apply a command and notify observers if the state changed.
    pub fn dispatch(&mut self, command: TreeCommand) -> TreeUpdate {
        match self.reduce(command) {
            Some(reduction) => {
                self.commit(reduction.state);
                TreeUpdate::Applied(reduction.effect)
            },
            None => TreeUpdate::Ignored,
        }
    }

    fn reduce(&self, command: TreeCommand) -> Option<Reduction> {
        let ctx = TreeCtx {
            options: &self.options,
        };
        reducer::reduce(&self.state, command, &ctx)
    }

    fn commit(&mut self, state: TreeState) {
        self.state = state;
        log::trace!(
            "tree state committed: {} roots, {} expanded, {} selected",
            self.state.nodes.len(),
            self.state.expanded_ids.len(),
            self.state.selected_ids.len()
        );

        let state = &self.state;
        let mut rows: Option<Vec<FlatTreeNode<'_>>> = None;
        for (_, listener) in &mut self.listeners {
            match listener {
                Listener::State(listener) => listener(state),
                Listener::Visible(listener) => {
                    let rows =
                        rows.get_or_insert_with(|| state.visible_nodes());
                    listener(rows.as_slice());
                },
            }
        }
    }

    fn apply(&mut self, command: TreeCommand) -> bool {
        self.dispatch(command).is_applied()
    }

    /// Replace the roots. Expansion, selection, focus, drag and edit state
    /// are kept as they are, even when they name ids that no longer exist.
    ///
    /// Nodes that repeat an id are rejected and the tree stays unchanged.
    pub fn set_nodes(&mut self, nodes: Vec<TreeNode>) -> bool {
        self.apply(TreeCommand::SetNodes { nodes })
    }

    // --- Expansion ---

    pub fn toggle_expand(&mut self, id: &str) -> bool {
        self.apply(TreeCommand::ToggleExpand { id: id.into() })
    }

    pub fn expand(&mut self, id: &str) -> bool {
        self.apply(TreeCommand::Expand { id: id.into() })
    }

    pub fn collapse(&mut self, id: &str) -> bool {
        self.apply(TreeCommand::Collapse { id: id.into() })
    }

    /// Expand every branch above `max_depth` (roots are depth `0`),
    /// replacing the current expansion set.
    pub fn expand_all(&mut self, max_depth: Option<usize>) -> bool {
        self.apply(TreeCommand::ExpandAll { max_depth })
    }

    pub fn collapse_all(&mut self) -> bool {
        self.apply(TreeCommand::CollapseAll)
    }

    // --- Selection / focus ---

    /// Select a node and focus it. With `multi` the node is toggled within
    /// the current selection instead of replacing it.
    pub fn select_node(&mut self, id: &str, multi: bool) -> bool {
        self.apply(TreeCommand::SelectNode {
            id: id.into(),
            multi,
        })
    }

    /// Add every visible row between the two nodes, inclusive, to the
    /// selection. Argument order does not matter.
    pub fn select_range(&mut self, start_id: &str, end_id: &str) -> bool {
        self.apply(TreeCommand::SelectRange {
            start_id: start_id.into(),
            end_id: end_id.into(),
        })
    }

    pub fn select_all(&mut self) -> bool {
        self.apply(TreeCommand::SelectAll)
    }

    pub fn clear_selection(&mut self) -> bool {
        self.apply(TreeCommand::ClearSelection)
    }

    pub fn set_focus(&mut self, id: Option<&str>) -> bool {
        self.apply(TreeCommand::SetFocus {
            id: id.map(NodeId::from),
        })
    }

    // --- Editing ---

    pub fn start_editing(&mut self, id: &str) -> bool {
        self.apply(TreeCommand::StartEditing { id: id.into() })
    }

    pub fn stop_editing(&mut self) -> bool {
        self.apply(TreeCommand::StopEditing)
    }

    /// Rename a node and end inline editing.
    pub fn rename_node(&mut self, id: &str, name: impl Into<String>) -> bool {
        self.apply(TreeCommand::RenameNode {
            id: id.into(),
            name: name.into(),
        })
    }

    /// Rename a node, calling `on_rename` before observers see the change.
    ///
    /// The callback only runs when the node exists.
    pub fn rename_node_with(
        &mut self,
        id: &str,
        name: impl Into<String>,
        on_rename: impl FnOnce(&TreeRenameEvent),
    ) -> bool {
        let command = TreeCommand::RenameNode {
            id: id.into(),
            name: name.into(),
        };
        let Some(reduction) = self.reduce(command) else {
            return false;
        };
        if let Some(TreeEffect::Renamed(event)) = &reduction.effect {
            on_rename(event);
        }
        self.commit(reduction.state);
        true
    }

    // --- Structure ---

    /// Append `node` under `parent_id`, or at root level for `None`.
    pub fn create_node(
        &mut self,
        parent_id: Option<&str>,
        node: TreeNode,
    ) -> bool {
        self.apply(TreeCommand::CreateNode {
            parent_id: parent_id.map(NodeId::from),
            node,
        })
    }

    /// Remove a node and its subtree, forgetting every removed id.
    pub fn delete_node(&mut self, id: &str) -> bool {
        self.apply(TreeCommand::DeleteNode { id: id.into() })
    }

    /// Drop `source_id` onto `target_id`.
    ///
    /// A branch target receives the source as its last child. A leaf target
    /// hands the source to its own parent, or to the root level when the
    /// leaf is a root.
    pub fn move_node(&mut self, source_id: &str, target_id: &str) -> bool {
        self.apply(TreeCommand::MoveNode {
            source_id: source_id.into(),
            target_id: target_id.into(),
        })
    }

    // --- Drag & drop ---

    pub fn start_drag(&mut self, source_id: &str) -> bool {
        self.apply(TreeCommand::StartDrag {
            source_id: source_id.into(),
        })
    }

    pub fn set_drag_target(&mut self, target_id: Option<&str>) -> bool {
        self.apply(TreeCommand::SetDragTarget {
            target_id: target_id.map(NodeId::from),
        })
    }

    pub fn end_drag(&mut self) -> bool {
        self.apply(TreeCommand::EndDrag)
    }

    // --- Navigation ---

    pub fn navigate_next(&self) -> Option<&NodeId> {
        navigation::next(&self.state)
    }

    pub fn navigate_previous(&self) -> Option<&NodeId> {
        navigation::previous(&self.state)
    }

    pub fn navigate_first(&self) -> Option<&NodeId> {
        navigation::first(&self.state)
    }

    pub fn navigate_last(&self) -> Option<&NodeId> {
        navigation::last(&self.state)
    }

    pub fn navigate_to_parent(&self) -> Option<&NodeId> {
        navigation::parent(&self.state)
    }

    pub fn navigate_to_first_child(&self) -> Option<&NodeId> {
        navigation::first_child(&self.state)
    }

    /// Typeahead search over the visible rows, starting after the focus.
    pub fn find_by_letter(&self, letter: &str) -> Option<&NodeId> {
        navigation::find_by_prefix(&self.state, letter)
    }
}
