/*
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */
extern crate lib_graphops;

use lib_graphops::graphops::json::{deserialize, serialize};
use lib_graphops::{Graph, Metadata};

fn build_sample_graph() -> Graph {
    let mut g = Graph::new();
    {
        let a = g.add_node("A", None).unwrap();
        a.metadata_mut().set_property("module", Some("m1"));
        a.metadata_mut().tags(Metadata::UNKEYED).insert("seed");
    }
    g.add_node("B", None).unwrap();
    g.add_node("C", None).unwrap();
    g.connect("A", "B", None).unwrap();
    g.connect("A", "C", None).unwrap();
    g.connect("B", "C", None).unwrap();
    g
}

#[test]
fn round_trip_preserves_nodes_edges_and_metadata() {
    let g = build_sample_graph();
    let text = serialize(&g).unwrap();
    assert!(text.ends_with('\n'));

    let back = deserialize(&text).unwrap();
    assert_eq!(back.node_count(), g.node_count());
    assert_eq!(back.edge_count(), g.edge_count());
    assert_eq!(
        back.get_node("a").unwrap().metadata().get_property("module"),
        Some("m1")
    );
    assert!(back
        .get_node("a")
        .unwrap()
        .metadata()
        .try_get_tags(Metadata::UNKEYED)
        .unwrap()
        .contains("seed"));
    assert!(back.get_edge("a", "b").is_some());
    assert!(back.get_edge("a", "c").is_some());
    assert!(back.get_edge("b", "c").is_some());
}

#[test]
fn deserialize_rejects_non_object_top_level() {
    assert!(deserialize("[1, 2, 3]").is_err());
}

#[test]
fn malformed_tag_entries_do_not_fail_the_whole_load() {
    let text = r#"{
        "nodes": {
            "a": { "tags": ["ok", 7], "targets": {} }
        }
    }"#;
    let g = deserialize(text).unwrap();
    let tags = g.get_node("a").unwrap().metadata().try_get_tags(Metadata::UNKEYED).unwrap();
    assert_eq!(tags.len(), 1);
    assert!(tags.contains("ok"));
}
