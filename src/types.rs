//! Common types used throughout the B-tree.

use crate::error::{BTreeError, Result};
use serde::{Deserialize, Serialize};

/// Smallest fan-out for which splitting leaves both halves non-empty
pub const MIN_ORDER: usize = 3;

/// Default fan-out (small enough to keep trees easy to inspect)
pub const DEFAULT_ORDER: usize = 5;

/// BTree configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BTreeConfig {
    /// Maximum number of children per internal node
    pub order: usize,
}

impl Default for BTreeConfig {
    fn default() -> Self {
        Self {
            order: DEFAULT_ORDER,
        }
    }
}

impl BTreeConfig {
    /// Create a new config with the given order
    pub fn new(order: usize) -> Self {
        Self { order }
    }

    /// Set the order
    pub fn order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    /// Check that the order can produce a well-formed tree
    pub fn validate(&self) -> Result<()> {
        if self.order < MIN_ORDER {
            return Err(BTreeError::InvalidOrder {
                order: self.order,
                min: MIN_ORDER,
            });
        }
        Ok(())
    }

    /// Minimum number of keys in a non-root node: `ceil(order / 2) - 1`
    pub fn min_keys(&self) -> usize {
        ((self.order + 1) / 2).saturating_sub(1)
    }

    /// Maximum number of keys in any node
    pub fn max_keys(&self) -> usize {
        self.order.saturating_sub(1)
    }

    /// Index of the key promoted when a node overflows to `order` keys.
    ///
    /// Equal to `min_keys()`, so the left half is exactly minimal and the
    /// right half gets the remainder.
    pub fn split_index(&self) -> usize {
        self.order.saturating_sub(1) / 2
    }
}
