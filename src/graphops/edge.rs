/*
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */
//! Directed edges. An edge only stores its endpoints' canonical keys; the
//! graph is the sole owner of both the node table and the edge table (see
//! `graph.rs`), so there is never a cyclic reference between a `Node` and
//! an `Edge` to manage.

use crate::graphops::metadata::Metadata;

pub struct Edge {
    source: String,
    target: String,
    metadata: Metadata,
}

impl Edge {
    pub(crate) fn new(source: String, target: String, metadata: Metadata) -> Self {
        Self {
            source,
            target,
            metadata,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    pub fn is_self_edge(&self) -> bool {
        self.source == self.target
    }
}
