/*
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */
//! Composable graph rewrites: `purify`, `prune`, `filter`.

pub mod filter;
pub mod prune;
pub mod purify;

pub use filter::{filter_exclude, filter_include};
pub use prune::{prune_edge, prune_edges_into, prune_edges_out, prune_node};
pub use purify::{purify_classic, purify_scc};
