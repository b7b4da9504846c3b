/*
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */
extern crate lib_graphops;

use lib_graphops::graphops::rewrites::purify_classic;
use lib_graphops::{Graph, GraphAnalyzer, GraphError};

fn cycle_graph() -> Graph {
    let mut g = Graph::new();
    for k in ["A", "B", "C"] {
        g.add_node(k, None).unwrap();
    }
    g.connect("A", "B", None).unwrap();
    g.connect("B", "C", None).unwrap();
    g.connect("C", "A", None).unwrap();
    g
}

#[test]
fn reach_map_fails_on_cycle_without_sink() {
    let g = cycle_graph();
    let analyzer = GraphAnalyzer::snapshot(&g);
    let err = analyzer.get_reach_map().unwrap_err();
    assert!(matches!(err, GraphError::Cycle(_)));
}

#[test]
fn reach_map_with_sink_cuts_cycle_and_reports_one_edge() {
    let g = cycle_graph();
    let analyzer = GraphAnalyzer::snapshot(&g);
    let mut cycle_edges = lib_graphops::KeySetMap::new();
    let reach = analyzer.get_reach_map_with_cycle_sink(&mut cycle_edges);
    assert_eq!(cycle_edges.pair_count(), 1);
    for k in ["a", "b", "c"] {
        assert!(reach.get(k).is_some());
    }
}

#[test]
fn purify_classic_drops_the_shortcut_edge() {
    let mut g = Graph::new();
    for k in ["A", "B", "C"] {
        g.add_node(k, None).unwrap();
    }
    g.connect("A", "B", None).unwrap();
    g.connect("B", "C", None).unwrap();
    g.connect("A", "C", None).unwrap();

    purify_classic(&mut g, false).unwrap();

    assert_eq!(g.edge_count(), 2);
    assert!(g.get_edge("a", "b").is_some());
    assert!(g.get_edge("b", "c").is_some());
    assert!(g.get_edge("a", "c").is_none());
}

#[test]
fn purify_on_acyclic_graph_is_exact_transitive_reduction() {
    let mut g = Graph::new();
    for k in ["s", "a", "b", "t"] {
        g.add_node(k, None).unwrap();
    }
    g.connect("s", "a", None).unwrap();
    g.connect("s", "b", None).unwrap();
    g.connect("s", "t", None).unwrap();
    g.connect("a", "t", None).unwrap();
    g.connect("b", "t", None).unwrap();

    purify_classic(&mut g, false).unwrap();

    // s -> t is redundant: t is reachable via a and via b.
    assert!(g.get_edge("s", "t").is_none());
    assert!(g.get_edge("s", "a").is_some());
    assert!(g.get_edge("s", "b").is_some());
    assert!(g.get_edge("a", "t").is_some());
    assert!(g.get_edge("b", "t").is_some());
}

#[test]
fn purify_classic_with_collect_cycles_tags_the_cut_edge() {
    let mut g = cycle_graph();
    purify_classic(&mut g, true).unwrap();

    let tagged: Vec<_> = g
        .edges()
        .filter(|e| e.metadata().try_get_tags(lib_graphops::Metadata::UNKEYED).is_some())
        .collect();
    assert_eq!(tagged.len(), 1);
    assert_eq!(tagged[0].metadata().get_property("color"), Some("red"));
}
