/*
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */
//! The mutable, in-memory graph: a node table keyed by canonical string
//! key, plus an edge arena keyed by `(source, target)`.

use crate::graphops::edge::Edge;
use crate::graphops::error::{GraphError, GraphResult};
use crate::graphops::keymap::{canonical, KeyMap, KeySet, KeySetMap, MapView};
use crate::graphops::metadata::Metadata;
use crate::graphops::node::Node;
use fxhash::FxHashMap;

pub struct Graph {
    metadata: Metadata,
    nodes: FxHashMap<String, Node>,
    order: Vec<String>,
    edges: FxHashMap<(String, String), Edge>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    pub fn new() -> Self {
        Self {
            metadata: Metadata::new(),
            nodes: FxHashMap::default(),
            order: Vec::new(),
            edges: FxHashMap::default(),
        }
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn has_node(&self, key: &str) -> bool {
        self.nodes.contains_key(&canonical(key))
    }

    pub fn get_node(&self, key: &str) -> Option<&Node> {
        self.nodes.get(&canonical(key))
    }

    pub fn get_node_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.nodes.get_mut(&canonical(key))
    }

    /// Canonical node keys, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.order.iter()
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.order.iter().map(move |k| &self.nodes[k])
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn get_edge(&self, source: &str, target: &str) -> Option<&Edge> {
        self.edges.get(&(canonical(source), canonical(target)))
    }

    pub fn add_node(&mut self, key: &str, metadata: Option<Metadata>) -> GraphResult<&mut Node> {
        let canon = canonical(key);
        if self.nodes.contains_key(&canon) {
            return Err(GraphError::invariant(format!(
                "node '{}' already exists",
                key
            )));
        }
        self.nodes.insert(
            canon.clone(),
            Node::new(canon.clone(), key.to_owned(), metadata.unwrap_or_default()),
        );
        self.order.push(canon.clone());
        Ok(self.nodes.get_mut(&canon).unwrap())
    }

    fn require_node(&self, key: &str) -> GraphResult<()> {
        if !self.nodes.contains_key(key) {
            return Err(GraphError::invariant(format!(
                "node '{}' does not exist",
                key
            )));
        }
        Ok(())
    }

    pub fn connect(
        &mut self,
        source: &str,
        target: &str,
        metadata: Option<Metadata>,
    ) -> GraphResult<&Edge> {
        let s = canonical(source);
        let t = canonical(target);
        self.require_node(&s)?;
        self.require_node(&t)?;
        if self.edges.contains_key(&(s.clone(), t.clone())) {
            return Err(GraphError::invariant(format!(
                "edge '{}' -> '{}' already exists",
                source, target
            )));
        }
        self.edges.insert(
            (s.clone(), t.clone()),
            Edge::new(s.clone(), t.clone(), metadata.unwrap_or_default()),
        );
        self.nodes.get_mut(&s).unwrap().targets_mut().insert(t.clone());
        self.nodes.get_mut(&t).unwrap().sources_mut().insert(s.clone());
        Ok(&self.edges[&(s, t)])
    }

    /// Creates the edge if absent; otherwise merges `metadata` into the
    /// existing edge's metadata.
    pub fn connect_or_merge_edge(
        &mut self,
        source: &str,
        target: &str,
        metadata: Option<Metadata>,
    ) -> GraphResult<&Edge> {
        let s = canonical(source);
        let t = canonical(target);
        self.require_node(&s)?;
        self.require_node(&t)?;
        if let Some(existing) = self.edges.get_mut(&(s.clone(), t.clone())) {
            if let Some(incoming) = metadata {
                existing.metadata_mut().import(&incoming, true, true);
            }
            return Ok(&self.edges[&(s, t)]);
        }
        self.edges.insert(
            (s.clone(), t.clone()),
            Edge::new(s.clone(), t.clone(), metadata.unwrap_or_default()),
        );
        self.nodes.get_mut(&s).unwrap().targets_mut().insert(t.clone());
        self.nodes.get_mut(&t).unwrap().sources_mut().insert(s.clone());
        Ok(&self.edges[&(s, t)])
    }

    /// Fails if either endpoint is missing; otherwise returns the edge, if
    /// any.
    pub fn find_edge(&self, source: &str, target: &str) -> GraphResult<Option<&Edge>> {
        let s = canonical(source);
        let t = canonical(target);
        self.require_node(&s)?;
        self.require_node(&t)?;
        Ok(self.edges.get(&(s, t)))
    }

    /// Lenient: returns `None` if the edge (or either endpoint) is absent.
    pub fn disconnect(&mut self, source: &str, target: &str) -> Option<Edge> {
        let s = canonical(source);
        let t = canonical(target);
        let edge = self.edges.remove(&(s.clone(), t.clone()))?;
        if let Some(n) = self.nodes.get_mut(&s) {
            n.targets_mut().remove(&t);
        }
        if let Some(n) = self.nodes.get_mut(&t) {
            n.sources_mut().remove(&s);
        }
        Some(edge)
    }

    pub fn disconnect_all_sources(&mut self, target: &str) -> Vec<Edge> {
        let t = canonical(target);
        let sources: Vec<String> = match self.nodes.get(&t) {
            Some(n) => n.sources().iter().cloned().collect(),
            None => return Vec::new(),
        };
        sources
            .into_iter()
            .filter_map(|s| self.disconnect(&s, &t))
            .collect()
    }

    pub fn disconnect_all_targets(&mut self, source: &str) -> Vec<Edge> {
        let s = canonical(source);
        let targets: Vec<String> = match self.nodes.get(&s) {
            Some(n) => n.targets().iter().cloned().collect(),
            None => return Vec::new(),
        };
        targets
            .into_iter()
            .filter_map(|t| self.disconnect(&s, &t))
            .collect()
    }

    /// On `node_key`'s outgoing side, disconnects every edge whose target
    /// is not in `keep`.
    pub fn disconnect_all_except(&mut self, node_key: &str, keep: &KeySet) -> Vec<Edge> {
        let s = canonical(node_key);
        let targets: Vec<String> = match self.nodes.get(&s) {
            Some(n) => n.targets().iter().cloned().collect(),
            None => return Vec::new(),
        };
        let mut removed = Vec::new();
        for t in targets {
            if !keep.contains(&t) {
                if let Some(edge) = self.disconnect(&s, &t) {
                    removed.push(edge);
                }
            }
        }
        removed
    }

    /// Drops each node in `keys`, then scrubs dangling edges from the
    /// remaining nodes in a single pass. The scrub never attempts to
    /// disconnect "the other side" of a removed node, since that node no
    /// longer exists.
    pub fn remove_nodes(&mut self, keys: &KeySet) {
        for k in keys.iter() {
            self.nodes.remove(k);
        }
        self.order.retain(|k| !keys.contains(k));
        self.edges
            .retain(|(s, t), _| !keys.contains(s) && !keys.contains(t));
        for node in self.nodes.values_mut() {
            node.sources_mut().retain(|k| !keys.contains(k));
            node.targets_mut().retain(|k| !keys.contains(k));
        }
    }

    pub fn remove_other_nodes(&mut self, keep: &KeySet) {
        let all = KeySet::from_iter(self.order.clone());
        self.remove_nodes(&all.difference(keep));
    }

    /// For each source present in `target_edge_map`, keeps only edges to
    /// the listed targets. Sources absent from the map are fully
    /// disconnected if `disconnect_missing`, otherwise left untouched.
    pub fn disconnect_targets_except(
        &mut self,
        target_edge_map: &KeySetMap,
        disconnect_missing: bool,
    ) {
        let sources: Vec<String> = self.order.clone();
        for s in sources {
            if let Some(keep) = target_edge_map.get(&s) {
                self.disconnect_all_except(&s, keep);
            } else if disconnect_missing {
                self.disconnect_all_targets(&s);
            }
        }
    }

    /// Classifies nodes by `projector`, preserving iteration order within
    /// each class. `projector` returning `None` skips that node.
    pub fn classify_nodes<F>(&self, mut projector: F) -> KeyMap<Vec<String>>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut out: KeyMap<Vec<String>> = KeyMap::new();
        for k in &self.order {
            if let Some(class) = projector(k) {
                out.entry_or_insert_with(&class, Vec::new).push(k.clone());
            }
        }
        out
    }

    /// An independent snapshot of node-key -> target-key set. Mutating the
    /// graph after taking this snapshot never changes it.
    pub fn edges_snapshot(&self) -> MapView {
        let mut view = KeySetMap::new();
        for k in &self.order {
            let targets = KeySet::from_iter(self.nodes[k].targets().iter().cloned());
            view.insert(k, targets);
        }
        MapView::new(view)
    }

    /// Keys of nodes whose metadata has any of `tags` under `tag_key`
    /// (default: unkeyed).
    pub fn find_tagged_node_keys(&self, tags: &[&str], tag_key: Option<&str>) -> Vec<String> {
        let key = tag_key.unwrap_or(Metadata::UNKEYED);
        self.order
            .iter()
            .filter(|k| self.nodes[*k].metadata().has_any_tag(key, tags.iter().copied()))
            .cloned()
            .collect()
    }

    pub fn find_tagged_nodes(&self, tags: &[&str], tag_key: Option<&str>) -> Vec<&Node> {
        self.find_tagged_node_keys(tags, tag_key)
            .into_iter()
            .map(|k| &self.nodes[&k])
            .collect()
    }
}
