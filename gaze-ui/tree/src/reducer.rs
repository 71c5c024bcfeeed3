use std::collections::{BTreeSet, HashSet};

use crate::command::TreeCommand;
use crate::event::{
    TreeCreateEvent, TreeDeleteEvent, TreeDropEvent, TreeEffect,
    TreeRenameEvent,
};
use crate::model::{
    DragState, NodeId, Parent, TreeNode, all_ids, descendant_ids,
    find_node_mut, first_duplicate_id, remove_node,
};
use crate::options::TreeStoreOptions;
use crate::state::TreeState;

/// Runtime context for the tree reducer.
pub(crate) struct TreeCtx<'a> {
    pub(crate) options: &'a TreeStoreOptions,
}

/// Replacement state produced by a successful command.
#[derive(Debug)]
pub(crate) struct Reduction {
    pub(crate) state: TreeState,
    pub(crate) effect: Option<TreeEffect>,
}

impl Reduction {
    fn new(state: TreeState) -> Self {
        Self {
            state,
            effect: None,
        }
    }

    fn with_effect(state: TreeState, effect: TreeEffect) -> Self {
        Self {
            state,
            effect: Some(effect),
        }
    }
}

/// Reduce a command against `state`.
///
/// Returns `None` when the command is a no-op: unknown ids, cycle or
/// duplicate guards, disabled options, or a result equal to `state`.
pub(crate) fn reduce(
    state: &TreeState,
    command: TreeCommand,
    ctx: &TreeCtx<'_>,
) -> Option<Reduction> {
    use TreeCommand::*;

    match command {
        ToggleExpand { id } => toggle_expand(state, &id).map(Reduction::new),
        Expand { id } => expand(state, &id).map(Reduction::new),
        Collapse { id } => collapse(state, &id).map(Reduction::new),
        ExpandAll { max_depth } => {
            let mut expanded_ids = BTreeSet::new();
            collect_branch_ids(&state.nodes, 0, max_depth, &mut expanded_ids);
            replace(state, |next| next.expanded_ids = expanded_ids)
        },
        CollapseAll => replace(state, |next| next.expanded_ids.clear()),
        SelectNode { id, multi } => {
            select_node(state, id, multi && ctx.options.multi_select)
        },
        SelectRange { start_id, end_id } => {
            if !ctx.options.multi_select {
                log::debug!("tree range select ignored: multi select is off");
                return None;
            }
            select_range(state, &start_id, &end_id)
        },
        SelectAll => {
            if !ctx.options.multi_select {
                log::debug!("tree select all ignored: multi select is off");
                return None;
            }
            let selected_ids: BTreeSet<NodeId> =
                all_ids(&state.nodes).into_iter().cloned().collect();
            replace(state, |next| next.selected_ids = selected_ids)
        },
        ClearSelection => replace(state, |next| next.selected_ids.clear()),
        SetFocus { id } => {
            if let Some(id) = &id
                && !known(state, id, "focus")
            {
                return None;
            }
            replace(state, |next| next.focused_id = id)
        },
        StartEditing { id } => start_editing(state, id, ctx),
        StopEditing => replace(state, |next| next.editing_id = None),
        RenameNode { id, name } => rename_node(state, id, name),
        CreateNode { parent_id, node } => create_node(state, parent_id, node),
        DeleteNode { id } => delete_node(state, &id),
        MoveNode {
            source_id,
            target_id,
        } => {
            if !ctx.options.draggable {
                log::debug!("tree move ignored: dragging is off");
                return None;
            }
            move_node(state, source_id, target_id)
        },
        StartDrag { source_id } => {
            if !ctx.options.draggable || !known(state, &source_id, "drag") {
                return None;
            }
            replace(state, |next| {
                next.drag_state = DragState::started(source_id);
            })
        },
        SetDragTarget { target_id } => set_drag_target(state, target_id),
        EndDrag => {
            replace(state, |next| next.drag_state = DragState::default())
        },
        SetNodes { nodes } => {
            if let Some(id) = first_duplicate_id(&nodes) {
                log::debug!("tree set nodes ignored: node id {id} repeats");
                return None;
            }
            replace(state, |next| next.nodes = nodes)
        },
    }
}

/// Apply `update` to a copy of `state`, keeping it only if it differs.
fn replace(
    state: &TreeState,
    update: impl FnOnce(&mut TreeState),
) -> Option<Reduction> {
    let mut next = state.clone();
    update(&mut next);
    (next != *state).then(|| Reduction::new(next))
}

fn known(state: &TreeState, id: &NodeId, operation: &str) -> bool {
    let found = state.contains(id.as_str());
    if !found {
        log::debug!("tree {operation} ignored: unknown node {id}");
    }
    found
}

fn is_expandable(state: &TreeState, id: &NodeId) -> bool {
    let expandable = state
        .find_node(id.as_str())
        .is_some_and(TreeNode::has_children);
    if !expandable {
        log::debug!("tree expand ignored: {id} is missing or has no children");
    }
    expandable
}

fn toggle_expand(state: &TreeState, id: &NodeId) -> Option<TreeState> {
    if !is_expandable(state, id) {
        return None;
    }
    let mut next = state.clone();
    if !next.expanded_ids.remove(id) {
        next.expanded_ids.insert(id.clone());
    }
    Some(next)
}

fn expand(state: &TreeState, id: &NodeId) -> Option<TreeState> {
    if state.expanded_ids.contains(id) || !is_expandable(state, id) {
        return None;
    }
    let mut next = state.clone();
    next.expanded_ids.insert(id.clone());
    Some(next)
}

fn collapse(state: &TreeState, id: &NodeId) -> Option<TreeState> {
    if !state.expanded_ids.contains(id) {
        return None;
    }
    let mut next = state.clone();
    next.expanded_ids.remove(id);
    Some(next)
}

fn collect_branch_ids(
    nodes: &[TreeNode],
    depth: usize,
    max_depth: Option<usize>,
    ids: &mut BTreeSet<NodeId>,
) {
    if max_depth.is_some_and(|max_depth| depth >= max_depth) {
        return;
    }
    for node in nodes {
        let Some(children) = node.children().filter(|c| !c.is_empty()) else {
            continue;
        };
        ids.insert(node.id().clone());
        collect_branch_ids(children, depth + 1, max_depth, ids);
    }
}

fn select_node(
    state: &TreeState,
    id: NodeId,
    multi: bool,
) -> Option<Reduction> {
    if !known(state, &id, "select") {
        return None;
    }
    let mut selected_ids = if multi {
        state.selected_ids.clone()
    } else {
        BTreeSet::new()
    };
    if !selected_ids.remove(&id) {
        selected_ids.insert(id.clone());
    }
    replace(state, |next| {
        next.selected_ids = selected_ids;
        next.focused_id = Some(id);
    })
}

fn select_range(
    state: &TreeState,
    start_id: &NodeId,
    end_id: &NodeId,
) -> Option<Reduction> {
    let visible = state.visible_nodes();
    let position = |id: &NodeId| {
        visible.iter().position(|entry| entry.node.id() == id)
    };
    let (Some(start), Some(end)) = (position(start_id), position(end_id))
    else {
        log::debug!(
            "tree range select ignored: {start_id} or {end_id} is not visible"
        );
        return None;
    };
    let (low, high) = if start <= end {
        (start, end)
    } else {
        (end, start)
    };
    let range: Vec<NodeId> = visible[low..=high]
        .iter()
        .map(|entry| entry.node.id().clone())
        .collect();
    replace(state, |next| next.selected_ids.extend(range))
}

fn start_editing(
    state: &TreeState,
    id: NodeId,
    ctx: &TreeCtx<'_>,
) -> Option<Reduction> {
    if !ctx.options.editable {
        log::debug!("tree edit ignored: editing is off");
        return None;
    }
    let node = state.find_node(id.as_str());
    if node.is_none() {
        log::debug!("tree edit ignored: unknown node {id}");
        return None;
    }
    if node.and_then(TreeNode::editable) == Some(false) {
        log::debug!("tree edit ignored: {id} is not editable");
        return None;
    }
    replace(state, |next| next.editing_id = Some(id))
}

fn rename_node(
    state: &TreeState,
    id: NodeId,
    name: String,
) -> Option<Reduction> {
    if !known(state, &id, "rename") {
        return replace(state, |next| next.editing_id = None);
    }

    let mut next = state.clone();
    next.editing_id = None;
    let node = find_node_mut(&mut next.nodes, id.as_str())?;
    let old_name = std::mem::replace(&mut node.name, name.clone());
    if next == *state {
        log::debug!("tree rename ignored: {id} is already named {name}");
        return None;
    }

    Some(Reduction::with_effect(
        next,
        TreeEffect::Renamed(TreeRenameEvent { id, name, old_name }),
    ))
}

/// Return an id of `node`'s subtree that already exists or repeats.
fn conflicting_id<'a>(
    state: &TreeState,
    node: &'a TreeNode,
) -> Option<&'a NodeId> {
    let mut seen = HashSet::new();
    descendant_ids(node)
        .into_iter()
        .find(|id| !seen.insert(*id) || state.contains(id.as_str()))
}

fn create_node(
    state: &TreeState,
    parent_id: Option<NodeId>,
    node: TreeNode,
) -> Option<Reduction> {
    if let Some(id) = conflicting_id(state, &node) {
        log::debug!("tree create ignored: node id {id} is already in use");
        return None;
    }

    let mut next = state.clone();
    match &parent_id {
        None => next.nodes.push(node.clone()),
        Some(parent_id) => {
            let Some(parent) =
                find_node_mut(&mut next.nodes, parent_id.as_str())
            else {
                log::debug!("tree create ignored: unknown parent {parent_id}");
                return None;
            };
            parent.children_mut().push(node.clone());
            next.expanded_ids.insert(parent_id.clone());
        },
    }

    Some(Reduction::with_effect(
        next,
        TreeEffect::Created(TreeCreateEvent { parent_id, node }),
    ))
}

fn delete_node(state: &TreeState, id: &NodeId) -> Option<Reduction> {
    let Some(node) = state.find_node(id.as_str()) else {
        log::debug!("tree delete ignored: unknown node {id}");
        return None;
    };
    let removed_ids: Vec<NodeId> =
        descendant_ids(node).into_iter().cloned().collect();

    let mut next = state.clone();
    remove_node(&mut next.nodes, id.as_str())?;
    next.purge(&removed_ids);

    Some(Reduction::with_effect(
        next,
        TreeEffect::Deleted(TreeDeleteEvent {
            id: id.clone(),
            removed_ids,
        }),
    ))
}

fn move_node(
    state: &TreeState,
    source_id: NodeId,
    target_id: NodeId,
) -> Option<Reduction> {
    if source_id == target_id {
        log::debug!("tree move ignored: {source_id} dropped onto itself");
        return None;
    }
    let (Some(source), Some(target)) = (
        state.find_node(source_id.as_str()),
        state.find_node(target_id.as_str()),
    ) else {
        log::debug!(
            "tree move ignored: {source_id} or {target_id} no longer exists"
        );
        return None;
    };

    let source_ids = descendant_ids(source);
    if source_ids.contains(&&target_id) {
        log::debug!(
            "tree move ignored: {target_id} is inside {source_id}"
        );
        return None;
    }

    let destination_id = if target.is_leaf() {
        match state.find_parent_node(target_id.as_str())? {
            Parent::Root => None,
            Parent::Node(parent) => Some(parent.id().clone()),
        }
    } else {
        Some(target_id.clone())
    };
    if let Some(destination_id) = &destination_id
        && source_ids.contains(&destination_id)
    {
        log::debug!(
            "tree move ignored: {destination_id} is inside {source_id}"
        );
        return None;
    }

    let moved = source.clone();
    let mut next = state.clone();
    remove_node(&mut next.nodes, source_id.as_str())?;
    match &destination_id {
        None => next.nodes.push(moved),
        Some(destination_id) => {
            find_node_mut(&mut next.nodes, destination_id.as_str())?
                .children_mut()
                .push(moved);
            next.expanded_ids.insert(destination_id.clone());
        },
    }
    if next == *state {
        log::debug!("tree move ignored: {source_id} is already in place");
        return None;
    }

    Some(Reduction::with_effect(
        next,
        TreeEffect::Moved(TreeDropEvent {
            source_id,
            target_id,
            destination_id,
        }),
    ))
}

fn set_drag_target(
    state: &TreeState,
    target_id: Option<NodeId>,
) -> Option<Reduction> {
    if !state.drag_state.is_dragging() {
        log::debug!("tree drag target ignored: no drag in progress");
        return None;
    }
    if let Some(id) = &target_id
        && !known(state, id, "drag target")
    {
        return None;
    }
    replace(state, |next| next.drag_state.target_id = target_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(options: &TreeStoreOptions) -> TreeCtx<'_> {
        TreeCtx { options }
    }

    fn sample() -> TreeState {
        TreeState::new(vec![
            TreeNode::branch(
                "src",
                "src",
                vec![
                    TreeNode::leaf("main", "main.rs"),
                    TreeNode::branch(
                        "widgets",
                        "widgets",
                        vec![TreeNode::leaf("tree", "tree.rs")],
                    ),
                ],
            ),
            TreeNode::branch("empty", "empty", Vec::new()),
            TreeNode::leaf("readme", "README.md"),
        ])
    }

    fn run(state: &TreeState, command: TreeCommand) -> Option<Reduction> {
        reduce(state, command, &ctx(&TreeStoreOptions::default()))
    }

    fn id(value: &str) -> NodeId {
        NodeId::from(value)
    }

    fn root_ids(state: &TreeState) -> Vec<&str> {
        state.nodes().iter().map(|node| node.id().as_str()).collect()
    }

    #[test]
    fn given_branch_when_toggled_twice_then_expansion_flips_back() {
        let state = sample();

        let expanded = run(&state, TreeCommand::ToggleExpand { id: id("src") })
            .expect("src has children")
            .state;
        assert!(expanded.is_expanded("src"));

        let collapsed =
            run(&expanded, TreeCommand::ToggleExpand { id: id("src") })
                .expect("toggle back")
                .state;
        assert!(!collapsed.is_expanded("src"));
    }

    #[test]
    fn given_empty_branch_or_leaf_when_expanded_then_command_is_ignored() {
        let state = sample();

        assert!(run(&state, TreeCommand::Expand { id: id("empty") }).is_none());
        assert!(
            run(&state, TreeCommand::ToggleExpand { id: id("readme") })
                .is_none()
        );
        assert!(run(&state, TreeCommand::Expand { id: id("nope") }).is_none());
    }

    #[test]
    fn given_collapsed_node_when_collapsed_again_then_command_is_ignored() {
        let state = sample();
        assert!(run(&state, TreeCommand::Collapse { id: id("src") }).is_none());
    }

    #[test]
    fn given_max_depth_when_expanding_all_then_deeper_branches_stay_collapsed()
    {
        let state = sample();

        let shallow =
            run(&state, TreeCommand::ExpandAll { max_depth: Some(1) })
                .expect("roots expand")
                .state;
        assert!(shallow.is_expanded("src"));
        assert!(!shallow.is_expanded("widgets"));
        assert!(!shallow.is_expanded("empty"));

        let full = run(&shallow, TreeCommand::ExpandAll { max_depth: None })
            .expect("nested branches expand")
            .state;
        assert!(full.is_expanded("widgets"));
        assert!(
            run(&state, TreeCommand::ExpandAll { max_depth: Some(0) })
                .is_none()
        );
    }

    #[test]
    fn given_prior_expansion_when_expanding_all_then_set_is_replaced() {
        let mut state = sample();
        state.expanded_ids.insert(id("readme"));

        let next = run(&state, TreeCommand::ExpandAll { max_depth: None })
            .expect("expands")
            .state;

        assert!(!next.is_expanded("readme"));
    }

    #[test]
    fn given_single_select_when_selecting_then_selection_is_replaced_and_focused()
     {
        let mut state = sample();
        state.selected_ids.insert(id("main"));

        let next = run(
            &state,
            TreeCommand::SelectNode {
                id: id("readme"),
                multi: false,
            },
        )
        .expect("select")
        .state;

        assert_eq!(next.selected_ids().len(), 1);
        assert!(next.is_selected("readme"));
        assert_eq!(next.focused_id(), Some(&id("readme")));
    }

    #[test]
    fn given_multi_select_when_selecting_selected_node_then_it_is_toggled_off()
    {
        let mut state = sample();
        state.selected_ids.insert(id("main"));
        state.selected_ids.insert(id("readme"));

        let next = run(
            &state,
            TreeCommand::SelectNode {
                id: id("main"),
                multi: true,
            },
        )
        .expect("toggle")
        .state;

        assert!(!next.is_selected("main"));
        assert!(next.is_selected("readme"));
        assert_eq!(next.focused_id(), Some(&id("main")));
    }

    #[test]
    fn given_multi_select_disabled_when_multi_selecting_then_single_select_applies()
     {
        let mut state = sample();
        state.selected_ids.insert(id("main"));
        let options = TreeStoreOptions {
            multi_select: false,
            ..TreeStoreOptions::default()
        };

        let next = reduce(
            &state,
            TreeCommand::SelectNode {
                id: id("readme"),
                multi: true,
            },
            &ctx(&options),
        )
        .expect("select")
        .state;

        assert!(!next.is_selected("main"));
        assert!(next.is_selected("readme"));
    }

    #[test]
    fn given_hidden_end_when_range_selecting_then_command_is_ignored() {
        let state = sample();

        let result = run(
            &state,
            TreeCommand::SelectRange {
                start_id: id("src"),
                end_id: id("main"),
            },
        );

        assert!(result.is_none());
    }

    #[test]
    fn given_reversed_bounds_when_range_selecting_then_inclusive_range_is_added()
     {
        let mut state = sample();
        state.expanded_ids.insert(id("src"));

        let next = run(
            &state,
            TreeCommand::SelectRange {
                start_id: id("empty"),
                end_id: id("main"),
            },
        )
        .expect("range")
        .state;

        let selected: Vec<&str> =
            next.selected_ids().iter().map(NodeId::as_str).collect();
        assert_eq!(selected, vec!["empty", "main", "widgets"]);
    }

    #[test]
    fn given_unknown_focus_when_set_then_command_is_ignored() {
        let state = sample();
        assert!(
            run(&state, TreeCommand::SetFocus { id: Some(id("nope")) })
                .is_none()
        );
        assert!(run(&state, TreeCommand::SetFocus { id: None }).is_none());
    }

    #[test]
    fn given_non_editable_node_when_editing_starts_then_command_is_ignored() {
        let state = TreeState::new(vec![
            TreeNode::leaf("locked", "locked").with_editable(false),
            TreeNode::leaf("open", "open"),
        ]);

        assert!(
            run(&state, TreeCommand::StartEditing { id: id("locked") })
                .is_none()
        );
        let next = run(&state, TreeCommand::StartEditing { id: id("open") })
            .expect("editable")
            .state;
        assert_eq!(next.editing_id(), Some(&id("open")));
    }

    #[test]
    fn given_rename_when_reduced_then_effect_carries_old_name_and_editing_clears()
     {
        let mut state = sample();
        state.editing_id = Some(id("tree"));

        let reduction = run(
            &state,
            TreeCommand::RenameNode {
                id: id("tree"),
                name: String::from("view.rs"),
            },
        )
        .expect("rename");

        assert_eq!(
            reduction.state.find_node("tree").map(TreeNode::name),
            Some("view.rs")
        );
        assert!(reduction.state.editing_id().is_none());
        assert_eq!(
            state.find_node("tree").map(TreeNode::name),
            Some("tree.rs")
        );
        assert_eq!(
            reduction.effect,
            Some(TreeEffect::Renamed(TreeRenameEvent {
                id: id("tree"),
                name: String::from("view.rs"),
                old_name: String::from("tree.rs"),
            }))
        );
    }

    #[test]
    fn given_unknown_node_when_renamed_then_only_editing_is_cleared() {
        let mut state = sample();
        state.editing_id = Some(id("main"));

        let reduction = run(
            &state,
            TreeCommand::RenameNode {
                id: id("nope"),
                name: String::from("x"),
            },
        )
        .expect("editing cleared");

        assert!(reduction.effect.is_none());
        assert!(reduction.state.editing_id().is_none());
        assert_eq!(reduction.state.nodes(), state.nodes());
    }

    #[test]
    fn given_current_name_when_renamed_without_editing_then_command_is_ignored()
    {
        let state = sample();

        let reduction = run(
            &state,
            TreeCommand::RenameNode {
                id: id("main"),
                name: String::from("main.rs"),
            },
        );

        assert!(reduction.is_none());
    }

    #[test]
    fn given_leaf_parent_when_creating_child_then_parent_becomes_expanded_branch()
     {
        let state = sample();

        let next = run(
            &state,
            TreeCommand::CreateNode {
                parent_id: Some(id("readme")),
                node: TreeNode::leaf("notes", "notes.md"),
            },
        )
        .expect("create")
        .state;

        let parent = next.find_node("readme").expect("parent exists");
        assert_eq!(parent.children().map(<[TreeNode]>::len), Some(1));
        assert!(next.is_expanded("readme"));
    }

    #[test]
    fn given_missing_parent_or_duplicate_id_when_creating_then_command_is_ignored()
     {
        let state = sample();

        assert!(
            run(
                &state,
                TreeCommand::CreateNode {
                    parent_id: Some(id("nope")),
                    node: TreeNode::leaf("new", "new"),
                },
            )
            .is_none()
        );
        assert!(
            run(
                &state,
                TreeCommand::CreateNode {
                    parent_id: None,
                    node: TreeNode::leaf("main", "dup"),
                },
            )
            .is_none()
        );
        assert!(
            run(
                &state,
                TreeCommand::CreateNode {
                    parent_id: None,
                    node: TreeNode::branch(
                        "x",
                        "x",
                        vec![TreeNode::leaf("x", "again")],
                    ),
                },
            )
            .is_none()
        );
    }

    #[test]
    fn given_root_create_when_reduced_then_node_is_appended_last() {
        let state = sample();

        let next = run(
            &state,
            TreeCommand::CreateNode {
                parent_id: None,
                node: TreeNode::leaf("license", "LICENSE"),
            },
        )
        .expect("create")
        .state;

        assert_eq!(root_ids(&next), vec!["src", "empty", "readme", "license"]);
    }

    #[test]
    fn given_focused_descendant_when_parent_deleted_then_focus_and_edit_clear() {
        let mut state = sample();
        state.focused_id = Some(id("tree"));
        state.editing_id = Some(id("widgets"));

        let reduction = run(&state, TreeCommand::DeleteNode { id: id("src") })
            .expect("delete");

        assert!(reduction.state.focused_id().is_none());
        assert!(reduction.state.editing_id().is_none());
        assert_eq!(root_ids(&reduction.state), vec!["empty", "readme"]);
        let Some(TreeEffect::Deleted(event)) = reduction.effect else {
            panic!("expected delete effect");
        };
        assert_eq!(event.removed_ids.len(), 4);
    }

    #[test]
    fn given_leaf_target_in_branch_when_moving_then_source_joins_target_parent()
    {
        let state = sample();

        let reduction = run(
            &state,
            TreeCommand::MoveNode {
                source_id: id("readme"),
                target_id: id("tree"),
            },
        )
        .expect("move");

        let widgets = reduction.state.find_node("widgets").expect("exists");
        let children: Vec<&str> = widgets
            .children()
            .unwrap_or_default()
            .iter()
            .map(|node| node.id().as_str())
            .collect();
        assert_eq!(children, vec!["tree", "readme"]);
        assert!(reduction.state.is_expanded("widgets"));
        assert_eq!(root_ids(&reduction.state), vec!["src", "empty"]);
        assert_eq!(
            reduction.effect,
            Some(TreeEffect::Moved(TreeDropEvent {
                source_id: id("readme"),
                target_id: id("tree"),
                destination_id: Some(id("widgets")),
            }))
        );
    }

    #[test]
    fn given_empty_branch_target_when_moving_then_source_becomes_its_child() {
        let state = sample();

        let next = run(
            &state,
            TreeCommand::MoveNode {
                source_id: id("widgets"),
                target_id: id("empty"),
            },
        )
        .expect("move")
        .state;

        let empty = next.find_node("empty").expect("exists");
        assert_eq!(empty.children().map(<[TreeNode]>::len), Some(1));
        assert!(next.find_node("tree").is_some());
        assert!(next.is_expanded("empty"));
    }

    #[test]
    fn given_descendant_target_when_moving_then_tree_is_unchanged() {
        let state = sample();

        assert!(
            run(
                &state,
                TreeCommand::MoveNode {
                    source_id: id("src"),
                    target_id: id("tree"),
                },
            )
            .is_none()
        );
        assert!(
            run(
                &state,
                TreeCommand::MoveNode {
                    source_id: id("src"),
                    target_id: id("src"),
                },
            )
            .is_none()
        );
    }

    #[test]
    fn given_dragging_disabled_when_moving_then_command_is_ignored() {
        let state = sample();
        let options = TreeStoreOptions {
            draggable: false,
            ..TreeStoreOptions::default()
        };

        let result = reduce(
            &state,
            TreeCommand::MoveNode {
                source_id: id("readme"),
                target_id: id("src"),
            },
            &ctx(&options),
        );

        assert!(result.is_none());
    }

    #[test]
    fn given_drag_session_when_target_set_and_ended_then_state_is_tracked_and_reset()
     {
        let state = sample();
        let target = TreeCommand::SetDragTarget {
            target_id: Some(id("src")),
        };
        assert!(run(&state, target).is_none());

        let dragging =
            run(&state, TreeCommand::StartDrag { source_id: id("readme") })
                .expect("start")
                .state;
        let targeted = run(
            &dragging,
            TreeCommand::SetDragTarget {
                target_id: Some(id("src")),
            },
        )
        .expect("target")
        .state;
        assert!(targeted.drag_state().is_dragging());
        assert_eq!(targeted.drag_state().target_id(), Some(&id("src")));
        assert_eq!(targeted.nodes(), state.nodes());

        let ended = run(&targeted, TreeCommand::EndDrag).expect("end").state;
        assert_eq!(ended.drag_state(), &DragState::default());
        assert!(run(&ended, TreeCommand::EndDrag).is_none());
    }

    #[test]
    fn given_new_nodes_when_set_then_auxiliary_state_is_kept() {
        let mut state = sample();
        state.selected_ids.insert(id("main"));

        let next = run(
            &state,
            TreeCommand::SetNodes {
                nodes: vec![TreeNode::leaf("other", "other")],
            },
        )
        .expect("set")
        .state;

        assert_eq!(root_ids(&next), vec!["other"]);
        assert!(next.is_selected("main"));
    }

    #[test]
    fn given_repeated_ids_when_setting_nodes_then_command_is_ignored() {
        let state = sample();

        let reduction = run(
            &state,
            TreeCommand::SetNodes {
                nodes: vec![
                    TreeNode::leaf("same", "first"),
                    TreeNode::branch(
                        "other",
                        "other",
                        vec![TreeNode::leaf("same", "second")],
                    ),
                ],
            },
        );

        assert!(reduction.is_none());
    }
}
