/*
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */
//! Targeted edge/node removal. These are thin wrappers over
//! `Graph`'s own disconnect/remove primitives, which already scrub
//! dangling edges on node removal.

use crate::graphops::graph::Graph;
use crate::graphops::keymap::KeySet;

/// Removes a single edge, if present. A no-op if either endpoint or the
/// edge itself doesn't exist.
pub fn prune_edge(graph: &mut Graph, source: &str, target: &str) {
    graph.disconnect(source, target);
}

/// Removes every edge pointing into `target`.
pub fn prune_edges_into(graph: &mut Graph, target: &str) {
    graph.disconnect_all_sources(target);
}

/// Removes every edge leaving `source`.
pub fn prune_edges_out(graph: &mut Graph, source: &str) {
    graph.disconnect_all_targets(source);
}

/// Removes `key` and every edge touching it.
pub fn prune_node(graph: &mut Graph, key: &str) {
    let mut doomed = KeySet::new();
    doomed.insert(key);
    graph.remove_nodes(&doomed);
}
