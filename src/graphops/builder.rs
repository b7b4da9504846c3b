/*
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */
//! The graph-builder capability: the core accepts pre-built
//! graphs, or fills them via an injected builder. The .NET-specific
//! probing that discovers assemblies, parses config files, and walks type
//! trees is an external collaborator and lives outside this crate; what
//! belongs here is only the single-method contract it implements.

use crate::graphops::error::GraphResult;
use crate::graphops::graph::Graph;
use crate::graphops::metadata::Metadata;

/// One row of input: an edge from `source` to `target`, with optional
/// metadata for each endpoint and for the edge itself.
pub struct EdgeRow {
    pub source: String,
    pub target: String,
    pub source_metadata: Option<Metadata>,
    pub target_metadata: Option<Metadata>,
    pub edge_metadata: Option<Metadata>,
}

impl EdgeRow {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            source_metadata: None,
            target_metadata: None,
            edge_metadata: None,
        }
    }
}

/// Capability-set contract: anything that can turn some `RowType`
/// collection into a `Graph`. External front-ends (the .NET assembly
/// prober, a CSV importer) implement this; the core only depends on the
/// trait, never on a concrete prober.
pub trait GraphBuilder {
    type RowType;

    fn build(&self, rows: &[Self::RowType]) -> GraphResult<Graph>;
}

/// Reference implementation over `EdgeRow`: adds each endpoint on first
/// sight (merging metadata if it reappears), then connects them,
/// merging edge metadata on repeated rows between the same pair.
pub struct EdgeListBuilder;

impl GraphBuilder for EdgeListBuilder {
    type RowType = EdgeRow;

    fn build(&self, rows: &[EdgeRow]) -> GraphResult<Graph> {
        let mut graph = Graph::new();
        for row in rows {
            ensure_node(&mut graph, &row.source, row.source_metadata.as_ref())?;
            ensure_node(&mut graph, &row.target, row.target_metadata.as_ref())?;
        }
        for row in rows {
            graph.connect_or_merge_edge(&row.source, &row.target, row.edge_metadata.clone())?;
        }
        Ok(graph)
    }
}

fn ensure_node(graph: &mut Graph, key: &str, metadata: Option<&Metadata>) -> GraphResult<()> {
    if let Some(node) = graph.get_node_mut(key) {
        if let Some(incoming) = metadata {
            node.metadata_mut().import(incoming, true, true);
        }
        return Ok(());
    }
    graph.add_node(key, metadata.cloned())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_list_builder_merges_repeated_rows() {
        let rows = vec![
            EdgeRow::new("A", "B"),
            EdgeRow::new("A", "B"),
            EdgeRow::new("A", "C"),
        ];
        let graph = EdgeListBuilder.build(&rows).unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn edge_list_builder_merges_node_metadata() {
        let mut first_meta = Metadata::new();
        first_meta.set_property("module", Some("core"));
        let mut row1 = EdgeRow::new("A", "B");
        row1.source_metadata = Some(first_meta);

        let mut second_meta = Metadata::new();
        second_meta.tags(Metadata::UNKEYED).insert("seed");
        let mut row2 = EdgeRow::new("A", "C");
        row2.source_metadata = Some(second_meta);

        let graph = EdgeListBuilder.build(&[row1, row2]).unwrap();
        let a = graph.get_node("a").unwrap();
        assert_eq!(a.metadata().get_property("module"), Some("core"));
        assert!(a.metadata().try_get_tags(Metadata::UNKEYED).unwrap().contains("seed"));
    }
}
