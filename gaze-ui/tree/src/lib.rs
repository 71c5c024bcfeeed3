//! Hierarchical tree store behind the tree view widget.
//!
//! This crate is split into two layers:
//! - model helpers ([`TreeNode`], [`flatten_tree`], [`find_node`]) that work
//!   on plain node slices and know nothing about UI state;
//! - [`TreeStore`], which owns a [`TreeState`] snapshot (expansion,
//!   selection, focus, drag and inline edit state) and notifies observers
//!   each time a command produces a new snapshot.
//!
//! The recommended flow for interactive trees:
//! 1. build a store from nodes or JSON;
//! 2. render [`TreeStore::visible_nodes`] or subscribe with
//!    [`TreeStore::subscribe_visible`];
//! 3. translate input events into store calls such as
//!    [`TreeStore::toggle_expand`] or [`TreeStore::move_node`], or into
//!    [`TreeCommand`] values passed to [`TreeStore::dispatch`].
//!
//! See `examples/tree_store.rs` for a complete runnable example.
//!
//! # Quick Example
//!
//! ```
//! use gaze_ui_tree::{TreeNode, TreeStore};
//!
//! let mut store = TreeStore::new(vec![
//!     TreeNode::branch(
//!         "src",
//!         "src",
//!         vec![TreeNode::leaf("main", "main.rs")],
//!     ),
//!     TreeNode::leaf("readme", "README.md"),
//! ]);
//!
//! store.toggle_expand("src");
//! store.select_node("main", false);
//!
//! let rows: Vec<(&str, usize)> = store
//!     .visible_nodes()
//!     .iter()
//!     .map(|row| (row.node.name(), row.depth))
//!     .collect();
//! assert_eq!(rows, [("src", 0), ("main.rs", 1), ("README.md", 0)]);
//!
//! assert!(store.move_node("main", "readme"));
//! assert_eq!(store.state().nodes().len(), 3);
//! ```

mod command;
mod errors;
mod event;
mod model;
pub mod navigation;
mod options;
mod reducer;
mod state;
mod store;

pub use command::TreeCommand;
pub use errors::{Result, TreeError};
pub use event::{
    TreeCreateEvent, TreeDeleteEvent, TreeDropEvent, TreeEffect,
    TreeRenameEvent,
};
pub use model::{
    DragState, FlatTreeNode, NodeId, Parent, TreeNode, descendant_ids,
    find_node, find_parent_node, first_duplicate_id, flatten_tree,
    nodes_from_json, validate_nodes,
};
pub use options::TreeStoreOptions;
pub use state::TreeState;
pub use store::{SubscriptionId, TreeStore, TreeUpdate};
