//! # BTree Set
//!
//! An in-memory B-tree holding a set of totally ordered values, with the
//! fan-out (order) chosen at construction time.
//!
//! ## Architecture
//!
//! - **Configuration** (`types`): order and the occupancy bounds derived from it
//! - **B-Tree Layer** (`btree`): node model, search, insertion with splits,
//!   deletion with borrow/merge, and the in-order cursor
//! - **Shared handle** (`SharedBTreeSet`): lock-guarded access across threads
//!
//! ## Usage
//!
//! ```rust
//! use btree_set::BTreeSet;
//!
//! let mut set = BTreeSet::new(4)?;
//!
//! assert!(set.add(3));
//! assert!(set.add(1));
//! assert!(!set.add(3)); // duplicates are rejected
//!
//! assert!(set.has(&1));
//! assert!(set.delete(&1));
//!
//! for value in &set {
//!     println!("{}", value);
//! }
//! # Ok::<(), btree_set::BTreeError>(())
//! ```

pub mod btree;
pub mod error;
pub mod types;

pub use btree::{BTreeSet, Iter};
pub use error::{BTreeError, Result};
pub use types::{BTreeConfig, DEFAULT_ORDER, MIN_ORDER};

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::sync::Arc;

/// Node snapshot for visualization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode<T> {
    /// Distance from the leaves
    pub height: usize,
    /// Whether this is a leaf node
    pub is_leaf: bool,
    /// Keys in this node
    pub keys: Vec<T>,
    /// Child nodes (only for internal nodes)
    pub children: Vec<TreeNode<T>>,
}

/// Tree statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeStats {
    /// Number of values stored
    pub len: usize,
    /// Configured order
    pub order: usize,
    /// Height of the B-tree
    pub tree_height: usize,
    /// Total number of nodes
    pub node_count: usize,
    /// Number of leaf nodes
    pub leaf_count: usize,
}

/// Thread-safe handle to a `BTreeSet`
///
/// The set itself performs no synchronization. This handle serializes
/// every operation through a reader-writer lock, so clones of it can be
/// shared freely between threads.
pub struct SharedBTreeSet<T> {
    set: Arc<RwLock<BTreeSet<T>>>,
}

impl<T> Clone for SharedBTreeSet<T> {
    fn clone(&self) -> Self {
        Self {
            set: Arc::clone(&self.set),
        }
    }
}

impl<T: Ord> SharedBTreeSet<T> {
    /// Create an empty shared set with the given order
    pub fn new(order: usize) -> Result<Self> {
        Self::with_config(BTreeConfig::new(order))
    }

    /// Create an empty shared set from a configuration
    pub fn with_config(config: BTreeConfig) -> Result<Self> {
        Ok(Self::from(BTreeSet::with_config(config)?))
    }

    /// Add a value
    ///
    /// Returns `false` if it was already present.
    pub fn add(&self, value: T) -> bool {
        self.set.write().add(value)
    }

    /// Delete a value
    ///
    /// Returns `true` if the value existed and was deleted.
    pub fn delete<Q: ?Sized>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord,
    {
        self.set.write().delete(value)
    }

    /// Check if a value exists
    pub fn has<Q: ?Sized>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord,
    {
        self.set.read().has(value)
    }

    /// Remove all values
    pub fn clear(&self) {
        self.set.write().clear()
    }

    /// Number of values in the set
    pub fn len(&self) -> usize {
        self.set.read().len()
    }

    /// Returns true if the set contains no values
    pub fn is_empty(&self) -> bool {
        self.set.read().is_empty()
    }

    /// Get the configured order
    pub fn order(&self) -> usize {
        self.set.read().order()
    }

    /// Collect all values in ascending order
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.set.read().iter().cloned().collect()
    }

    /// Get statistics about the tree
    pub fn stats(&self) -> TreeStats {
        self.set.read().stats()
    }

    /// Export the tree structure for visualization
    pub fn export_tree(&self) -> TreeNode<T>
    where
        T: Clone,
    {
        self.set.read().export_tree()
    }

    /// Lock for reading, e.g. to iterate without copying
    pub fn read(&self) -> RwLockReadGuard<'_, BTreeSet<T>> {
        self.set.read()
    }

    /// Lock for writing, e.g. to apply a batch of changes atomically
    pub fn write(&self) -> RwLockWriteGuard<'_, BTreeSet<T>> {
        self.set.write()
    }
}

impl<T> From<BTreeSet<T>> for SharedBTreeSet<T> {
    fn from(set: BTreeSet<T>) -> Self {
        Self {
            set: Arc::new(RwLock::new(set)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_basic_operations() -> Result<()> {
        let set = SharedBTreeSet::new(4)?;

        assert!(set.add(10));
        assert!(!set.add(10));
        assert!(set.has(&10));
        assert_eq!(set.order(), 4);

        assert!(set.delete(&10));
        assert!(!set.delete(&10));
        assert!(set.is_empty());

        Ok(())
    }

    #[test]
    fn test_invalid_order() {
        assert!(matches!(
            SharedBTreeSet::<u32>::new(2),
            Err(BTreeError::InvalidOrder { order: 2, .. })
        ));
    }

    #[test]
    fn test_concurrent_adds() -> Result<()> {
        let set = SharedBTreeSet::new(5)?;

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let set = set.clone();
                thread::spawn(move || {
                    for i in 0..250 {
                        set.add(t * 250 + i);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(set.len(), 1000);
        assert_eq!(set.to_vec(), (0..1000).collect::<Vec<_>>());
        set.read().validate()?;

        set.clear();
        assert!(set.is_empty());
        Ok(())
    }

    #[test]
    fn test_batched_write() -> Result<()> {
        let set = SharedBTreeSet::new(3)?;
        {
            let mut guard = set.write();
            guard.extend(0..20);
            assert!(guard.delete(&5));
        }
        assert_eq!(set.len(), 19);
        assert!(!set.has(&5));
        Ok(())
    }

    #[test]
    fn test_export_tree_json() -> Result<()> {
        let mut tree = BTreeSet::new(3)?;
        tree.extend([1, 2, 3]);
        let set = SharedBTreeSet::from(tree);

        let json = serde_json::to_value(set.export_tree()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "height": 1,
                "isLeaf": false,
                "keys": [2],
                "children": [
                    { "height": 0, "isLeaf": true, "keys": [1], "children": [] },
                    { "height": 0, "isLeaf": true, "keys": [3], "children": [] }
                ]
            })
        );
        Ok(())
    }

    #[test]
    fn test_stats() -> Result<()> {
        let set = SharedBTreeSet::new(3)?;
        for i in 0..3 {
            set.add(i);
        }
        assert_eq!(
            set.stats(),
            TreeStats {
                len: 3,
                order: 3,
                tree_height: 1,
                node_count: 3,
                leaf_count: 2,
            }
        );
        Ok(())
    }
}
