/*
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */
//! Round-trippable JSON encoding of a graph. Node and edge alphabetization
//! falls out of `serde_json::Map`, which (absent the `preserve_order`
//! feature, which this crate does not enable) is backed by a `BTreeMap`
//! and therefore always iterates in ascending key order, with no extra
//! sort step needed at the call site.

use crate::graphops::error::{GraphError, GraphResult};
use crate::graphops::graph::Graph;
use crate::graphops::metadata::Metadata;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::Path;

const NODE_RESERVED: [&str; 4] = ["key", "targets", "tags", "keytags"];
const GRAPH_RESERVED: [&str; 3] = ["nodes", "tags", "keytags"];

pub fn to_value(graph: &Graph) -> Value {
    let mut root = Map::new();
    let mut nodes_obj = Map::new();
    for node in graph.nodes() {
        let mut node_obj = Map::new();
        node.metadata().add_to_object(&mut node_obj);

        let mut targets_obj = Map::new();
        for target_key in node.targets() {
            if let Some(edge) = graph.get_edge(node.key(), target_key) {
                let mut edge_obj = Map::new();
                edge.metadata().add_to_object(&mut edge_obj);
                targets_obj.insert(target_key.clone(), Value::Object(edge_obj));
            }
        }
        node_obj.insert("targets".to_string(), Value::Object(targets_obj));
        nodes_obj.insert(node.key().to_string(), Value::Object(node_obj));
    }
    root.insert("nodes".to_string(), Value::Object(nodes_obj));
    graph.metadata().add_to_object(&mut root);
    Value::Object(root)
}

/// Serializes `graph` to its JSON wire format. The result always ends in
/// a single trailing newline.
pub fn serialize(graph: &Graph) -> GraphResult<String> {
    let value = to_value(graph);
    let mut text = serde_json::to_string_pretty(&value)?;
    text.push('\n');
    Ok(text)
}

pub fn from_value(value: &Value) -> GraphResult<Graph> {
    let root = value
        .as_object()
        .ok_or_else(|| GraphError::malformed("top-level JSON value must be an object"))?;

    let mut graph = Graph::new();
    let node_reserved: HashSet<&str> = NODE_RESERVED.into_iter().collect();

    if let Some(nodes_obj) = root.get("nodes").and_then(Value::as_object) {
        for (key, node_value) in nodes_obj.iter() {
            let node_obj = match node_value.as_object() {
                Some(o) => o,
                None => continue,
            };
            let meta = Metadata::fill_from_object(node_obj, &node_reserved);
            graph.add_node(key, Some(meta))?;
        }
        for (key, node_value) in nodes_obj.iter() {
            let node_obj = match node_value.as_object() {
                Some(o) => o,
                None => continue,
            };
            if let Some(Value::Object(targets_obj)) = node_obj.get("targets") {
                for (target_key, edge_value) in targets_obj.iter() {
                    if !graph.has_node(target_key) {
                        return Err(GraphError::malformed(format!(
                            "edge from '{}' references unknown target '{}'",
                            key, target_key
                        )));
                    }
                    let empty = Map::new();
                    let edge_obj = edge_value.as_object().unwrap_or(&empty);
                    let edge_meta = Metadata::fill_from_object(edge_obj, &HashSet::new());
                    graph.connect(key, target_key, Some(edge_meta))?;
                }
            }
        }
    }

    let graph_reserved: HashSet<&str> = GRAPH_RESERVED.into_iter().collect();
    *graph.metadata_mut() = Metadata::fill_from_object(root, &graph_reserved);
    Ok(graph)
}

pub fn deserialize(text: &str) -> GraphResult<Graph> {
    let value: Value = serde_json::from_str(text)?;
    from_value(&value)
}

pub fn load_file(path: impl AsRef<Path>) -> GraphResult<Graph> {
    let text = std::fs::read_to_string(path)?;
    deserialize(&text)
}

pub fn save_file(path: impl AsRef<Path>, graph: &Graph) -> GraphResult<()> {
    let text = serialize(graph)?;
    std::fs::write(path, text)?;
    Ok(())
}
