//! Error types for the B-tree set.

use thiserror::Error;

/// Result type alias for B-tree operations
pub type Result<T> = std::result::Result<T, BTreeError>;

/// Errors that can occur when building or checking a B-tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BTreeError {
    /// The requested fan-out cannot keep nodes at minimum occupancy
    #[error("Invalid order: {order} (min: {min})")]
    InvalidOrder { order: usize, min: usize },

    /// A structural invariant was found broken
    #[error("Corruption detected: {0}")]
    Corruption(String),
}

impl BTreeError {
    /// Create a corruption error with a message
    pub fn corruption(msg: impl Into<String>) -> Self {
        Self::Corruption(msg.into())
    }
}
