//! Keyboard navigation over the visible rows of a [`TreeState`].
//!
//! Every query flattens the tree afresh and never changes the state; the
//! caller decides whether to focus or select the returned id.

use crate::model::{FlatTreeNode, NodeId, Parent};
use crate::state::TreeState;

fn position(rows: &[FlatTreeNode<'_>], id: &NodeId) -> Option<usize> {
    rows.iter().position(|row| row.node.id() == id)
}

/// Row after the focused one.
///
/// Without focus the first row is returned. The last row and a focused node
/// that is not visible stay where they are.
pub fn next(state: &TreeState) -> Option<&NodeId> {
    let rows = state.visible_nodes();
    let first = rows.first()?;
    let Some(focused) = state.focused_id() else {
        return Some(first.node.id());
    };

    match position(&rows, focused) {
        Some(index) if index + 1 < rows.len() => {
            Some(rows[index + 1].node.id())
        },
        _ => Some(focused),
    }
}

/// Row before the focused one, clamped at the first row.
pub fn previous(state: &TreeState) -> Option<&NodeId> {
    let rows = state.visible_nodes();
    let first = rows.first()?;
    let Some(focused) = state.focused_id() else {
        return Some(first.node.id());
    };

    match position(&rows, focused) {
        Some(index) if index > 0 => Some(rows[index - 1].node.id()),
        _ => Some(focused),
    }
}

pub fn first(state: &TreeState) -> Option<&NodeId> {
    state.visible_nodes().first().map(|row| row.node.id())
}

pub fn last(state: &TreeState) -> Option<&NodeId> {
    state.visible_nodes().last().map(|row| row.node.id())
}

/// Parent of the focused node, `None` for roots or without focus.
pub fn parent(state: &TreeState) -> Option<&NodeId> {
    let focused = state.focused_id()?;
    match state.find_parent_node(focused.as_str())? {
        Parent::Root => None,
        Parent::Node(parent) => Some(parent.id()),
    }
}

/// First child of the focused node, only while that node is expanded.
pub fn first_child(state: &TreeState) -> Option<&NodeId> {
    let focused = state.focused_id()?;
    if !state.is_expanded(focused.as_str()) {
        return None;
    }
    let node = state.find_node(focused.as_str())?;
    node.children()?.first().map(|child| child.id())
}

/// Typeahead: next visible row whose name starts with `prefix`.
///
/// Matching ignores case. The search starts right after the focused row and
/// wraps around, so the focused row itself is checked last.
pub fn find_by_prefix<'a>(
    state: &'a TreeState,
    prefix: &str,
) -> Option<&'a NodeId> {
    let rows = state.visible_nodes();
    let needle = prefix.to_lowercase();
    let start = state
        .focused_id()
        .and_then(|focused| position(&rows, focused))
        .map_or(0, |index| index + 1);

    rows[start..]
        .iter()
        .chain(&rows[..start])
        .find(|row| row.node.name().to_lowercase().starts_with(&needle))
        .map(|row| row.node.id())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TreeNode;

    fn state() -> TreeState {
        let mut state = TreeState::new(vec![
            TreeNode::branch(
                "fruits",
                "Fruits",
                vec![
                    TreeNode::leaf("apple", "apple"),
                    TreeNode::leaf("banana", "Banana"),
                ],
            ),
            TreeNode::branch(
                "veg",
                "Vegetables",
                vec![TreeNode::leaf("avocado", "Avocado")],
            ),
            TreeNode::leaf("berries", "berries"),
        ]);
        state.expanded_ids.insert(NodeId::from("fruits"));
        state
    }

    fn focus(state: &mut TreeState, id: &str) {
        state.focused_id = Some(NodeId::from(id));
    }

    fn as_str(id: Option<&NodeId>) -> Option<&str> {
        id.map(NodeId::as_str)
    }

    #[test]
    fn given_no_focus_when_stepping_then_both_directions_start_at_first_row() {
        let state = state();

        assert_eq!(as_str(next(&state)), Some("fruits"));
        assert_eq!(as_str(previous(&state)), Some("fruits"));
    }

    #[test]
    fn given_focus_when_stepping_then_expanded_children_are_visited() {
        let mut state = state();
        focus(&mut state, "fruits");
        assert_eq!(as_str(next(&state)), Some("apple"));

        focus(&mut state, "banana");
        assert_eq!(as_str(next(&state)), Some("veg"));
        assert_eq!(as_str(previous(&state)), Some("apple"));
    }

    #[test]
    fn given_focus_at_edges_when_stepping_then_focus_is_clamped() {
        let mut state = state();
        focus(&mut state, "berries");
        assert_eq!(as_str(next(&state)), Some("berries"));

        focus(&mut state, "fruits");
        assert_eq!(as_str(previous(&state)), Some("fruits"));
    }

    #[test]
    fn given_hidden_focus_when_stepping_then_focus_is_returned() {
        let mut state = state();
        focus(&mut state, "avocado");

        assert_eq!(as_str(next(&state)), Some("avocado"));
        assert_eq!(as_str(previous(&state)), Some("avocado"));
    }

    #[test]
    fn given_empty_tree_when_navigating_then_nothing_is_returned() {
        let state = TreeState::default();

        assert!(next(&state).is_none());
        assert!(previous(&state).is_none());
        assert!(first(&state).is_none());
        assert!(last(&state).is_none());
        assert!(find_by_prefix(&state, "a").is_none());
    }

    #[test]
    fn given_collapsed_branch_when_jumping_to_last_then_hidden_rows_are_skipped()
    {
        let state = state();

        assert_eq!(as_str(first(&state)), Some("fruits"));
        assert_eq!(as_str(last(&state)), Some("berries"));
    }

    #[test]
    fn given_nested_focus_when_moving_to_parent_then_parent_is_returned() {
        let mut state = state();
        assert!(parent(&state).is_none());

        focus(&mut state, "banana");
        assert_eq!(as_str(parent(&state)), Some("fruits"));

        focus(&mut state, "fruits");
        assert!(parent(&state).is_none());
    }

    #[test]
    fn given_collapsed_focus_when_moving_to_first_child_then_nothing_is_returned()
     {
        let mut state = state();
        focus(&mut state, "veg");
        assert!(first_child(&state).is_none());

        focus(&mut state, "fruits");
        assert_eq!(as_str(first_child(&state)), Some("apple"));

        focus(&mut state, "berries");
        assert!(first_child(&state).is_none());
    }

    #[test]
    fn given_prefix_when_searching_then_match_is_case_insensitive_and_wraps() {
        let mut state = state();
        assert_eq!(as_str(find_by_prefix(&state, "A")), Some("apple"));

        focus(&mut state, "apple");
        assert_eq!(as_str(find_by_prefix(&state, "b")), Some("banana"));

        focus(&mut state, "banana");
        assert_eq!(as_str(find_by_prefix(&state, "b")), Some("berries"));

        focus(&mut state, "berries");
        assert_eq!(as_str(find_by_prefix(&state, "B")), Some("banana"));
    }

    #[test]
    fn given_prefix_matching_only_hidden_rows_when_searching_then_nothing_is_found()
     {
        let state = state();
        assert!(find_by_prefix(&state, "avo").is_none());
    }
}
