/*
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

pub mod graphops;

pub use graphops::{
    super_graph, Classifier, Edge, EdgeListBuilder, EdgeRow, Graph, GraphAnalyzer, GraphBuilder,
    GraphError, GraphResult, KeyMap, KeySet, KeySetMap, MapClassifier, MapView, Metadata, Node,
    NodeKind, PropertyClassifier, Scc,
};
