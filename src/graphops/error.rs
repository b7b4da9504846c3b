/*
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */
// https://blog.burntsushi.net/rust-error-handling/

use thiserror::Error;

pub type GraphResult<T> = std::result::Result<T, GraphError>;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("{0}")]
    Generic(String),

    #[error("invariant violation: {0}")]
    Invariant(String),

    #[error("cycle detected: {0}")]
    Cycle(String),

    #[error("malformed input: {0}")]
    Malformed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GraphError {
    pub fn new(msg: &str) -> Self {
        Self::Generic(msg.to_owned())
    }
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::Invariant(msg.into())
    }
    pub fn cycle(msg: impl Into<String>) -> Self {
        Self::Cycle(msg.into())
    }
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
    pub fn err_none() -> Self {
        Self::Generic("unexpectedly empty Option encountered".to_owned())
    }
}

impl From<String> for GraphError {
    fn from(str: String) -> Self {
        GraphError::Generic(str)
    }
}

impl From<&str> for GraphError {
    fn from(str: &str) -> Self {
        GraphError::Generic(str.to_owned())
    }
}
