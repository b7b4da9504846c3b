/*
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */
//! Tag-based node filtering: keep (or drop) the nodes carrying
//! a given tag, scrubbing any edge left dangling by the removal.

use crate::graphops::graph::Graph;
use crate::graphops::keymap::KeySet;
use crate::graphops::metadata::Metadata;

/// Keeps only nodes tagged with any of `tags` under `tag_key` (default:
/// unkeyed), removing every other node and any edge touching one.
pub fn filter_include(graph: &mut Graph, tags: &[&str], tag_key: Option<&str>) {
    let keep = KeySet::from_iter(graph.find_tagged_node_keys(tags, tag_key));
    graph.remove_other_nodes(&keep);
}

/// Removes every node tagged with any of `tags` under `tag_key` (default:
/// unkeyed), keeping everything else.
pub fn filter_exclude(graph: &mut Graph, tags: &[&str], tag_key: Option<&str>) {
    let doomed = KeySet::from_iter(graph.find_tagged_node_keys(tags, tag_key));
    graph.remove_nodes(&doomed);
}
