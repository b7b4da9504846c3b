/*
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */
//! Tarjan's strongly-connected-components algorithm, plus
//! quotient-DAG ("component graph") construction.

use crate::graphops::analyzer::GraphAnalyzer;
use crate::graphops::error::GraphResult;
use crate::graphops::graph::Graph;
use crate::graphops::keymap::{KeyMap, KeySet};

/// Result of running Tarjan's algorithm: components in forward
/// topological order of the quotient DAG, plus O(1) lookup indexes.
pub struct Scc {
    /// Each entry is the (canonical) node keys belonging to that
    /// component, in forward topological order.
    pub components: Vec<Vec<String>>,
    /// Parallel to `components`: the assigned name for each index.
    pub names: Vec<String>,
    by_name: KeyMap<usize>,
    by_node: KeyMap<usize>,
}

impl Scc {
    pub const DEFAULT_PREFIX: &'static str = "SCC-";

    /// Runs Tarjan's algorithm over the analyzer's target adjacency.
    /// `prefix` controls component naming: `Some(p)` names components
    /// `p` followed by a fixed-width zero-padded index; `None` derives
    /// the name from the component's first node, suffixed `+N-1` when
    /// the component has more than one member.
    pub fn compute(analyzer: &GraphAnalyzer, prefix: Option<&str>) -> Self {
        let components = tarjan(analyzer);
        tracing::debug!(
            nodes = analyzer.node_count(),
            components = components.len(),
            "computed strongly-connected components"
        );
        let width = if components.len() <= 999 {
            3
        } else if components.len() <= 9999 {
            4
        } else {
            5
        };

        let mut names = Vec::with_capacity(components.len());
        let mut by_name = KeyMap::new();
        let mut by_node = KeyMap::new();
        for (i, component) in components.iter().enumerate() {
            let name = match prefix {
                Some(p) => format!("{}{:0width$}", p, i, width = width),
                None => {
                    let first = &component[0];
                    if component.len() > 1 {
                        format!("{}+{}-1", first, component.len())
                    } else {
                        first.clone()
                    }
                }
            };
            by_name.insert(&name, i);
            for node in component {
                by_node.insert(node, i);
            }
            names.push(name);
        }

        Self {
            components,
            names,
            by_name,
            by_node,
        }
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn component_for_node(&self, key: &str) -> Option<usize> {
        self.by_node.get(key).copied()
    }

    pub fn component_by_name(&self, name: &str) -> Option<&[String]> {
        let idx = *self.by_name.get(name)?;
        Some(&self.components[idx])
    }

    /// Materializes the quotient DAG: one node per component (named per
    /// `compute`'s `prefix`, carrying a `sccindex` property), with one
    /// edge per pair of components connected by at least one original
    /// cross-component edge. Self-edges at the component level are
    /// suppressed; nodes of `source` absent from this SCC's node set are
    /// tolerated (their edges are ignored).
    pub fn component_graph(&self, source: &Graph) -> GraphResult<Graph> {
        let mut sg = Graph::new();
        for (i, name) in self.names.iter().enumerate() {
            let node = sg.add_node(name, None)?;
            node.metadata_mut().set_property("sccindex", Some(&i.to_string()));
        }
        for edge in source.edges() {
            if edge.is_self_edge() {
                continue;
            }
            let (Some(si), Some(ti)) = (
                self.component_for_node(edge.source()),
                self.component_for_node(edge.target()),
            ) else {
                continue;
            };
            if si == ti {
                continue;
            }
            let sname = self.names[si].clone();
            let tname = self.names[ti].clone();
            sg.connect_or_merge_edge(&sname, &tname, None)?;
        }
        Ok(sg)
    }
}

/// Classic Tarjan's algorithm. Returns components in *emission* order
/// reversed, which is a valid forward topological order of the quotient
/// DAG: a component precedes every component reachable from it.
fn tarjan(analyzer: &GraphAnalyzer) -> Vec<Vec<String>> {
    struct State {
        index_counter: usize,
        index: KeyMap<usize>,
        lowlink: KeyMap<usize>,
        on_stack: KeySet,
        stack: Vec<String>,
        components: Vec<Vec<String>>,
    }

    fn strongconnect(v: &str, edges: &crate::graphops::keymap::KeySetMap, state: &mut State) {
        state.index.insert(v, state.index_counter);
        state.lowlink.insert(v, state.index_counter);
        state.index_counter += 1;
        state.stack.push(v.to_string());
        state.on_stack.insert(v);

        if let Some(targets) = edges.get(v) {
            let targets: Vec<String> = targets.iter().cloned().collect();
            for w in targets {
                if !state.index.contains_key(&w) {
                    strongconnect(&w, edges, state);
                    let wl = *state.lowlink.get(&w).unwrap();
                    let vl = *state.lowlink.get(v).unwrap();
                    state.lowlink.insert(v, vl.min(wl));
                } else if state.on_stack.contains(&w) {
                    let wi = *state.index.get(&w).unwrap();
                    let vl = *state.lowlink.get(v).unwrap();
                    state.lowlink.insert(v, vl.min(wi));
                }
            }
        }

        if state.lowlink.get(v) == state.index.get(v) {
            let mut component = Vec::new();
            loop {
                let w = state.stack.pop().expect("tarjan stack underflow");
                state.on_stack.remove(&w);
                let is_v = w == v;
                component.push(w);
                if is_v {
                    break;
                }
            }
            state.components.push(component);
        }
    }

    let mut state = State {
        index_counter: 0,
        index: KeyMap::new(),
        lowlink: KeyMap::new(),
        on_stack: KeySet::new(),
        stack: Vec::new(),
        components: Vec::new(),
    };

    for node in analyzer.node_keys().iter() {
        if !state.index.contains_key(node) {
            strongconnect(node, analyzer.target_edges(), &mut state);
        }
    }

    state.components.reverse();
    state.components
}

#[cfg(test)]
mod tests {
    use super::*;

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
        let mut sizes: Vec<usize> = scc.components.iter().map(|c| c.len()).collect();
        sizes.sort_unstable();
        assert_eq!(sizes, vec![1, 1, 2]);

        // {A,B} must precede {C}, which must precede {D}.
        let ab = scc.component_for_node("a").unwrap();
        let c = scc.component_for_node("c").unwrap();
        let d = scc.component_for_node("d").unwrap();
        assert!(ab < c);
        assert!(c < d);
        assert_eq!(scc.component_for_node("b"), Some(ab));

        assert_eq!(scc.names, vec!["SCC-000", "SCC-001", "SCC-002"]);
    }

    #[test]
    fn component_graph_has_no_self_edges() {
        let g = scc_sample_graph();
        let analyzer = GraphAnalyzer::snapshot(&g);
        let scc = Scc::compute(&analyzer, Some(Scc::DEFAULT_PREFIX));
        let cg = scc.component_graph(&g).unwrap();

        assert_eq!(cg.node_count(), 3);
        assert_eq!(cg.edge_count(), 2);
        for node in cg.nodes() {
            assert!(!node.targets().contains(node.key()));
        }
        let ab_name = &scc.names[scc.component_for_node("a").unwrap()];
        assert_eq!(
            cg.get_node(ab_name)
                .unwrap()
                .metadata()
                .get_property("sccindex"),
            Some(scc.component_for_node("a").unwrap().to_string().as_str())
        );
    }

    #[test]
    fn components_partition_the_node_set() {
        let g = scc_sample_graph();
        let analyzer = GraphAnalyzer::snapshot(&g);
        let scc = Scc::compute(&analyzer, Some(Scc::DEFAULT_PREFIX));
        let mut seen = KeySet::new();
        for component in &scc.components {
            for node in component {
                assert!(!seen.contains(node), "node in more than one component");
                seen.insert(node);
            }
        }
        assert_eq!(seen.len(), analyzer.node_count());
    }
}
