use anyhow::Context;
use env_logger::Env;
use gaze_ui_tree::{
    FlatTreeNode, NodeId, TreeCommand, TreeEffect, TreeNode, TreeStore,
    TreeStoreOptions,
};

const OPTIONS: &str = r#"{ "initialExpandDepth": 1, "multiSelect": true }"#;

const TREE: &str = r#"[
    {
        "id": "cluster",
        "name": "cluster",
        "iconCollapsed": "folder",
        "iconExpanded": "folder-open",
        "children": [
            {
                "id": "indices",
                "name": "indices",
                "children": [
                    { "id": "logs", "name": "logs-2026.10" },
                    { "id": "metrics", "name": "metrics" }
                ]
            },
            { "id": "nodes", "name": "nodes", "children": [] }
        ]
    },
    { "id": "saved", "name": "saved queries", "editable": false }
]"#;

fn render(rows: &[FlatTreeNode<'_>]) {
    for row in rows {
        let marker = if row.node.is_leaf() { "-" } else { "+" };
        log::info!(
            "{:indent$}{marker} {}",
            "",
            row.node.name(),
            indent = row.depth * 2
        );
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let options = TreeStoreOptions::from_json(OPTIONS)
        .context("failed to parse tree options")?;
    let mut store = TreeStore::from_json(TREE, options)
        .context("failed to load tree")?;

    store.subscribe_visible(|rows| {
        log::info!("{} visible rows", rows.len());
        render(rows);
    });

    store.expand("indices");
    store.select_node("logs", false);
    store.select_range("logs", "nodes");

    let draft = NodeId::generate();
    store.create_node(
        Some("nodes"),
        TreeNode::leaf(draft.clone(), "node-1").with_icons("server", "server"),
    );

    let update = store.dispatch(TreeCommand::MoveNode {
        source_id: NodeId::from("metrics"),
        target_id: NodeId::from("saved"),
    });
    if let Some(TreeEffect::Moved(event)) = update.effect() {
        log::info!(
            "moved {} onto {} (now under {:?})",
            event.source_id,
            event.target_id,
            event.destination_id
        );
    }

    store.start_editing(draft.as_str());
    store.rename_node_with(draft.as_str(), "node-a", |event| {
        log::info!(
            "renamed {} from {} to {}",
            event.id,
            event.old_name,
            event.name
        );
    });

    if !store.start_editing("saved") {
        log::info!("saved queries cannot be renamed");
    }

    let focused = store.navigate_next().cloned();
    store.set_focus(focused.as_ref().map(NodeId::as_str));
    log::info!(
        "focus {:?}, typeahead 'm' -> {:?}",
        store.state().focused_id(),
        store.find_by_letter("m")
    );

    store.delete_node("indices");
    log::info!(
        "selected after delete: {:?}",
        store.state().selected_ids()
    );

    let snapshot = serde_json::to_string_pretty(store.state().nodes())
        .context("failed to serialize tree")?;
    log::info!("final tree:\n{snapshot}");

    Ok(())
}
