/*
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */
extern crate lib_graphops;

use lib_graphops::{Graph, GraphAnalyzer, KeySet, Scc};

fn scc_sample_graph() -> Graph {
    let mut g = Graph::new();
    for k in ["A", "B", "C", "D"] {
        g.add_node(k, None).unwrap();
    }
    g.connect("A", "B", None).unwrap();
    g.connect("B", "A", None).unwrap();
    g.connect("B", "C", None).unwrap();
    g.connect("C", "D", None).unwrap();
    g
}

#[test]
fn scc_forward_topological_order_and_naming() {
    let g = scc_sample_graph();
    let analyzer = GraphAnalyzer::snapshot(&g);
    let scc = Scc::compute(&analyzer, Some(Scc::DEFAULT_PREFIX));

    assert_eq!(scc.component_count(), 3);
    assert_eq!(scc.names, vec!["SCC-000", "SCC-001", "SCC-002"]);

    let ab = scc.component_for_node("a").unwrap();
    let c = scc.component_for_node("c").unwrap();
    let d = scc.component_for_node("d").unwrap();
    assert_eq!(scc.component_for_node("b"), Some(ab));
    assert!(ab < c && c < d);
}

#[test]
fn component_graph_has_two_edges_and_sccindex_properties() {
    let g = scc_sample_graph();
    let analyzer = GraphAnalyzer::snapshot(&g);
    let scc = Scc::compute(&analyzer, Some(Scc::DEFAULT_PREFIX));
    let cg = scc.component_graph(&g).unwrap();

    assert_eq!(cg.node_count(), 3);
    assert_eq!(cg.edge_count(), 2);
    for (i, name) in scc.names.iter().enumerate() {
        assert_eq!(
            cg.get_node(name).unwrap().metadata().get_property("sccindex"),
            Some(i.to_string().as_str())
        );
    }
}

#[test]
fn components_partition_the_node_set() {
    let g = scc_sample_graph();
    let analyzer = GraphAnalyzer::snapshot(&g);
    let scc = Scc::compute(&analyzer, Some(Scc::DEFAULT_PREFIX));

    let mut seen = KeySet::new();
    for component in &scc.components {
        for node in component {
            assert!(!seen.contains(node));
            seen.insert(node);
        }
    }
    assert_eq!(seen.len(), analyzer.node_count());
}

#[test]
fn component_membership_matches_mutual_reachability() {
    let g = scc_sample_graph();
    let analyzer = GraphAnalyzer::snapshot(&g);
    let scc = Scc::compute(&analyzer, Some(Scc::DEFAULT_PREFIX));

    // A and B reach each other and are in the same component.
    assert_eq!(scc.component_for_node("a"), scc.component_for_node("b"));
    // C cannot reach back to A or B, and is in a different component.
    assert_ne!(scc.component_for_node("c"), scc.component_for_node("a"));
}
