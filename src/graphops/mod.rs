/*
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */
//! A tagged/attributed directed multigraph engine for dependency analysis:
//! reachability and domain closures, cycle detection, strongly-connected
//! components, node classification and quotient graphs, and the
//! `purify`/`prune`/`filter` rewrites, all over a JSON-persisted graph.

pub mod analyzer;
pub mod builder;
pub mod classifier;
pub mod dot;
pub mod edge;
pub mod error;
pub mod graph;
pub mod json;
pub mod keymap;
pub mod metadata;
pub mod node;
pub mod rewrites;
pub mod scc;

pub use analyzer::GraphAnalyzer;
pub use builder::{EdgeListBuilder, EdgeRow, GraphBuilder};
pub use classifier::{super_graph, Classifier, MapClassifier, PropertyClassifier};
pub use edge::Edge;
pub use error::{GraphError, GraphResult};
pub use graph::Graph;
pub use keymap::{KeyMap, KeySet, KeySetMap, MapView};
pub use metadata::Metadata;
pub use node::{Node, NodeKind};
pub use scc::Scc;
