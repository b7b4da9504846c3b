/*
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */
//! Transitive-reduction-like pruning. An edge `(s, t)` survives iff
//! `t` is not reachable from `s` via some *other* direct target of `s`.

use crate::graphops::analyzer::GraphAnalyzer;
use crate::graphops::error::GraphResult;
use crate::graphops::graph::Graph;
use crate::graphops::keymap::{KeySet, KeySetMap};
use crate::graphops::metadata::Metadata;
use crate::graphops::scc::Scc;

const CYCLE_TAG: &str = "cyclelink";
const CYCLE_COLOR: &str = "red";

/// Classic purify: snapshots `graph`, computes its reach
/// closure, keeps only the edges whose target is not also reachable
/// through another direct target, and applies the result. If
/// `collect_cycles` is set, cycles are cut rather than failing the
/// operation, and the cut edges are re-added afterward tagged with an
/// unkeyed `cyclelink` tag and a `color` property, so the caller can still
/// see (and e.g. render) where cycles were broken.
pub fn purify_classic(graph: &mut Graph, collect_cycles: bool) -> GraphResult<()> {
    let analyzer = GraphAnalyzer::snapshot(graph);
    let mut cycle_edges = KeySetMap::new();
    let reach = if collect_cycles {
        analyzer.get_reach_map_with_cycle_sink(&mut cycle_edges)
    } else {
        analyzer.get_reach_map()?
    };

    let survivors = reach.not_in_self_projection_map(analyzer.target_edges());
    graph.disconnect_targets_except(&survivors, true);
    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "purified graph (classic)"
    );

    if collect_cycles {
        for (source, targets) in cycle_edges.iter() {
            for target in targets.iter() {
                let mut meta = Metadata::new();
                meta.tags(Metadata::UNKEYED).insert(CYCLE_TAG);
                meta.set_property("color", Some(CYCLE_COLOR));
                graph.connect_or_merge_edge(source, target, Some(meta))?;
            }
        }
    }
    Ok(())
}

/// SCC-mode purify: purifies the (necessarily acyclic) SCC
/// quotient DAG exactly, then rebuilds the full graph, keeping every
/// intra-component edge and only the inter-component edges whose quotient
/// counterpart survived.
pub fn purify_scc(graph: &mut Graph) -> GraphResult<()> {
    let analyzer = GraphAnalyzer::snapshot(graph);
    let scc = Scc::compute(&analyzer, Some(Scc::DEFAULT_PREFIX));
    let mut quotient = scc.component_graph(graph)?;
    purify_classic(&mut quotient, false)?;

    let mut surviving_quotient_edges = KeySetMap::new();
    for node in quotient.nodes() {
        surviving_quotient_edges.insert(node.key(), KeySet::from_iter(node.targets().iter().cloned()));
    }

    let mut keep_map = KeySetMap::new();
    for node in graph.nodes() {
        let source_component = scc.component_for_node(node.key());
        let mut keep = KeySet::new();
        for target in node.targets() {
            let target_component = scc.component_for_node(target);
            match (source_component, target_component) {
                (Some(sc), Some(tc)) if sc == tc => {
                    keep.insert(target);
                }
                (Some(sc), Some(tc)) => {
                    let source_name = &scc.names[sc];
                    let target_name = &scc.names[tc];
                    let survives = surviving_quotient_edges
                        .get(source_name)
                        .map(|set| set.contains(target_name))
                        .unwrap_or(false);
                    if survives {
                        keep.insert(target);
                    }
                }
                _ => {}
            }
        }
        keep_map.insert(node.key(), keep);
    }
    graph.disconnect_targets_except(&keep_map, true);
    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "purified graph (scc mode)"
    );
    Ok(())
}
