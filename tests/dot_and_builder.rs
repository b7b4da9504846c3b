/*
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */
extern crate lib_graphops;

use lib_graphops::graphops::dot::{write_graph, write_scoped, DotGroup, DotOptions};
use lib_graphops::{EdgeListBuilder, EdgeRow, GraphBuilder};

#[test]
fn edge_list_builder_produces_a_graph_usable_by_the_dot_writer() {
    let rows = vec![
        EdgeRow::new("Core", "Io"),
        EdgeRow::new("Io", "Net"),
        EdgeRow::new("Core", "Net"),
    ];
    let graph = EdgeListBuilder.build(&rows).unwrap();
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 3);

    let out = write_graph(&graph, &DotOptions::default());
    assert!(out.contains("\"core\" -> \"io\""));
    assert!(out.contains("\"core\" -> \"net\""));
    assert!(out.contains("\"io\" -> \"net\""));
}

#[test]
fn scoped_dot_output_groups_nodes_into_named_subgraphs() {
    let rows = vec![EdgeRow::new("Core", "Io")];
    let graph = EdgeListBuilder.build(&rows).unwrap();

    let groups = vec![
        DotGroup::named("cluster_core", vec!["core".to_string()]),
        DotGroup::named("cluster_io", vec!["io".to_string()]),
    ];

    let out = write_scoped(&graph, &groups, &DotOptions::default());
    assert!(out.contains("subgraph \"cluster_core\""));
    assert!(out.contains("subgraph \"cluster_io\""));
    assert!(out.contains("\"core\" -> \"io\""));
}

#[test]
fn scoped_dot_output_supports_anonymous_same_rank_groups() {
    let rows = vec![EdgeRow::new("Core", "Io")];
    let graph = EdgeListBuilder.build(&rows).unwrap();

    let groups = vec![DotGroup::anonymous(vec!["core".to_string(), "io".to_string()])];
    let out = write_scoped(&graph, &groups, &DotOptions::default());
    assert!(out.contains("subgraph {\n"));
}
