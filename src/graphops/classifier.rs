/*
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */
//! Node classification: mapping node keys into equivalence classes,
//! and building the quotient ("super") graph over a classification.

use crate::graphops::error::{GraphError, GraphResult};
use crate::graphops::graph::Graph;
use crate::graphops::keymap::KeyMap;

/// Maps a node key to an optional class; `None` means "skip this node".
pub trait Classifier {
    fn classify(&self, key: &str) -> Option<String>;

    /// Classifies every key in `keys`, preserving each key's relative
    /// order within its class.
    fn classify_all<'a, I>(&self, keys: I) -> KeyMap<Vec<String>>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut out: KeyMap<Vec<String>> = KeyMap::new();
        for k in keys {
            if let Some(class) = self.classify(k) {
                out.entry_or_insert_with(&class, Vec::new).push(k.clone());
            }
        }
        out
    }
}

/// Classifies by the value of a fixed node property, snapshotted from a
/// graph at construction time. Nodes where the property is missing or
/// empty are skipped.
pub struct PropertyClassifier {
    values: KeyMap<String>,
}

impl PropertyClassifier {
    pub fn new(graph: &Graph, property_key: &str) -> Self {
        let mut values = KeyMap::new();
        for node in graph.nodes() {
            if let Some(v) = node.metadata().get_property(property_key) {
                if !v.is_empty() {
                    values.insert(node.key(), v.to_owned());
                }
            }
        }
        Self { values }
    }
}

impl Classifier for PropertyClassifier {
    fn classify(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Classifies via an explicit key -> class mapping.
pub struct MapClassifier {
    mapping: KeyMap<String>,
}

impl MapClassifier {
    pub fn new(mapping: KeyMap<String>) -> Self {
        Self { mapping }
    }

    /// Builds a `MapClassifier` from the inverse direction (class -> list
    /// of keys). Fails if the same key is assigned to two different
    /// classes.
    pub fn from_class_map(class_to_keys: &KeyMap<Vec<String>>) -> GraphResult<Self> {
        let mut mapping: KeyMap<String> = KeyMap::new();
        for (class, keys) in class_to_keys.iter() {
            for key in keys {
                if let Some(existing) = mapping.get(key) {
                    if existing != class {
                        return Err(GraphError::invariant(format!(
                            "node '{}' assigned to conflicting classes '{}' and '{}'",
                            key, existing, class
                        )));
                    }
                    continue;
                }
                mapping.insert(key, class.clone());
            }
        }
        Ok(Self { mapping })
    }
}

impl Classifier for MapClassifier {
    fn classify(&self, key: &str) -> Option<String> {
        self.mapping.get(key).cloned()
    }
}

/// Builds the quotient graph over `classifier`'s classification:
/// one node per class (with a `sublabel` property recording the member
/// count), and one edge per pair of classes joined by at least one
/// original cross-class edge. Self-edges are never created. If
/// `add_nodes`, each class node also carries a keyed `node` tag per
/// underlying member, for traceability back to the original graph.
pub fn super_graph(
    graph: &Graph,
    classifier: &dyn Classifier,
    add_nodes: bool,
) -> GraphResult<Graph> {
    let adjacency = graph.edges_snapshot();
    let class_map = classifier.classify_all(graph.keys());

    let mut sg = Graph::new();
    for (class, members) in class_map.iter() {
        let node = sg.add_node(class, None)?;
        node.metadata_mut()
            .set_property("sublabel", Some(&format!("({} nodes)", members.len())));
        if add_nodes {
            for member in members {
                node.metadata_mut().tags("node").insert(member);
            }
        }
    }

    for (class, members) in class_map.iter() {
        for member in members {
            let Some(targets) = adjacency.get(member) else {
                continue;
            };
            for target in targets.iter() {
                let Some(target_class) = classifier.classify(target) else {
                    continue;
                };
                if &target_class == class {
                    continue;
                }
                if sg.find_edge(class, &target_class)?.is_some() {
                    continue;
                }
                sg.connect(class, &target_class, None)?;
            }
        }
    }

    Ok(sg)
}
