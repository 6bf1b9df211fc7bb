//! Wire-format assertions for the exported snapshots.
//!
//! External mirrors consume these as JSON, so the exact shape (tag names,
//! string ids, snake_case variants) is a compatibility contract checked
//! against handcrafted documents here.

use sash_core::{EngineConfig, PixelRect};
use sash_layout::{
    ExternalTreeNode, ManualClock, NoopDelegate, Orientation, PaneEngine, TabSpec,
};
use serde_json::json;

fn two_pane_engine() -> PaneEngine<NoopDelegate, ManualClock> {
    let mut engine =
        PaneEngine::with_clock(EngineConfig::default(), NoopDelegate, ManualClock::new());
    engine.set_container_frame(PixelRect::from_size(1000.0, 500.0));
    engine.create_tab(TabSpec::new("notes"), None).unwrap();
    engine
        .split_pane(None, Orientation::Horizontal, Some(TabSpec::new("scratch")))
        .unwrap();
    let split = engine.split_ids()[0];
    assert!(engine.set_divider_position(split, 0.25, false));
    engine
}

#[test]
fn tree_snapshot_wire_shape() {
    let engine = two_pane_engine();
    let json = serde_json::to_value(engine.tree_snapshot()).unwrap();

    assert_eq!(json["kind"], "split");
    assert_eq!(json["id"], "split-1");
    assert_eq!(json["orientation"], "horizontal");
    assert_eq!(json["divider_position"], 0.25);

    let first = &json["first"];
    assert_eq!(first["kind"], "pane");
    assert_eq!(first["id"], "pane-1");
    assert_eq!(first["frame"]["origin"]["x"], 0.0);
    assert_eq!(first["frame"]["size"]["width"], 250.0);
    assert_eq!(first["frame"]["size"]["height"], 500.0);
    assert_eq!(first["tabs"][0]["id"], "tab-1");
    assert_eq!(first["tabs"][0]["title"], "notes");
    assert_eq!(first["selected_tab"], "tab-1");

    let second = &json["second"];
    assert_eq!(second["id"], "pane-2");
    assert_eq!(second["frame"]["origin"]["x"], 250.0);
    assert_eq!(second["frame"]["size"]["width"], 750.0);
    assert_eq!(second["tabs"][0]["title"], "scratch");
}

#[test]
fn tree_snapshot_round_trips_through_json() {
    let engine = two_pane_engine();
    let tree = engine.tree_snapshot();
    let text = serde_json::to_string(&tree).unwrap();
    let back: ExternalTreeNode = serde_json::from_str(&text).unwrap();
    assert_eq!(back, tree);
}

#[test]
fn handcrafted_tree_document_deserializes() {
    let doc = json!({
        "kind": "split",
        "id": "split-9",
        "orientation": "vertical",
        "divider_position": 0.4,
        "first": {
            "kind": "pane",
            "id": "pane-3",
            "frame": {
                "origin": { "x": 0.0, "y": 0.0 },
                "size": { "width": 640.0, "height": 192.0 }
            },
            "tabs": [ { "id": "tab-7", "title": "log" } ],
            "selected_tab": "tab-7"
        },
        "second": {
            "kind": "pane",
            "id": "pane-4",
            "frame": {
                "origin": { "x": 0.0, "y": 192.0 },
                "size": { "width": 640.0, "height": 288.0 }
            },
            "tabs": []
        }
    });

    let tree: ExternalTreeNode = serde_json::from_value(doc).unwrap();
    let ExternalTreeNode::Split {
        orientation,
        divider_position,
        second,
        ..
    } = tree
    else {
        panic!("document should decode as a split");
    };
    assert_eq!(orientation, Orientation::Vertical);
    assert_eq!(divider_position, 0.4);
    // An empty pane carries no selection.
    let ExternalTreeNode::Pane { selected_tab, tabs, .. } = *second else {
        panic!("second child should decode as a pane");
    };
    assert!(selected_tab.is_none());
    assert!(tabs.is_empty());
}

#[test]
fn layout_snapshot_wire_shape() {
    let engine = two_pane_engine();
    let json = serde_json::to_value(engine.layout_snapshot()).unwrap();

    assert_eq!(json["container_frame"]["size"]["width"], 1000.0);
    assert_eq!(json["focused_pane"], 2);
    assert_eq!(json["timestamp_ms"], 0);

    let panes = json["panes"].as_array().unwrap();
    assert_eq!(panes.len(), 2);
    assert_eq!(panes[0]["pane_id"], 1);
    assert_eq!(panes[0]["selected_tab"], 1);
    assert_eq!(panes[0]["tab_ids"], json!([1]));
    assert_eq!(panes[1]["pane_id"], 2);
    assert_eq!(panes[1]["frame"]["origin"]["x"], 250.0);
}

#[test]
fn config_document_with_unknown_policy_fields_defaults() {
    let config: EngineConfig = serde_json::from_value(json!({
        "allow_splits": false,
        "new_tab_position": "end"
    }))
    .unwrap();
    assert!(!config.allow_splits);
    assert!(!config.allow_close_last_pane);
    assert!(config.allow_tab_reordering);
    assert_eq!(
        serde_json::to_value(config.new_tab_position).unwrap(),
        json!("end")
    );
}
