//! B-tree core implementation.
//!
//! This module provides the main BTreeSet struct with operations for:
//! - has: Membership tests
//! - add: Insertions (duplicates rejected)
//! - delete: Removals with rebalancing
//! - iter: Ascending traversal

use std::borrow::Borrow;
use std::fmt;
use std::mem;

use super::cursor::Iter;
use super::insert::{insert_recursive, InsertResult};
use super::node::Node;
use super::remove::remove_recursive;
use super::search::{search_tree, SearchResult};
use crate::error::{BTreeError, Result};
use crate::types::BTreeConfig;
use crate::{TreeNode, TreeStats};

/// An ordered set backed by an in-memory B-tree.
///
/// The order (maximum number of children per node) is fixed at
/// construction. Every node other than the root holds between
/// `ceil(order / 2) - 1` and `order - 1` keys, and all leaves sit at the
/// same depth.
///
/// It is a logic error for a value to be modified in such a way that its
/// ordering relative to any other value changes while it is in the set.
#[derive(Clone)]
pub struct BTreeSet<T> {
    config: BTreeConfig,
    /// Always present; an empty leaf when the set is empty
    root: Node<T>,
    len: usize,
}

impl<T> BTreeSet<T> {
    /// Create an empty set with the given order
    pub fn new(order: usize) -> Result<Self> {
        Self::with_config(BTreeConfig::new(order))
    }

    /// Create an empty set from a configuration
    pub fn with_config(config: BTreeConfig) -> Result<Self> {
        config.validate()?;
        tracing::trace!(target: "btree_set::tree", order = config.order, "created tree");
        Ok(Self {
            config,
            root: Node::new_leaf(),
            len: 0,
        })
    }

    /// Get the configured order
    pub fn order(&self) -> usize {
        self.config.order
    }

    /// Get the configuration
    pub fn config(&self) -> BTreeConfig {
        self.config
    }

    /// Returns the number of values in the set
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the set contains no values
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the height of the tree (0 when the root is a leaf)
    pub fn height(&self) -> usize {
        self.root.height()
    }

    /// Removes all values, leaving a single empty leaf as the root
    pub fn clear(&mut self) {
        tracing::trace!(target: "btree_set::tree", len = self.len, "cleared tree");
        self.root = Node::new_leaf();
        self.len = 0;
    }

    /// Gets an iterator over the values in ascending order
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.root, self.len)
    }

    /// Returns the smallest value
    pub fn first(&self) -> Option<&T> {
        let mut node = &self.root;
        while let Some(child) = node.child(0) {
            node = child;
        }
        node.keys().first()
    }

    /// Returns the largest value
    pub fn last(&self) -> Option<&T> {
        let mut node = &self.root;
        while let Some(child) = node.child(node.len()) {
            node = child;
        }
        node.keys().last()
    }

    /// Count nodes and leaves
    pub fn stats(&self) -> TreeStats {
        fn walk<T>(node: &Node<T>, stats: &mut TreeStats) {
            stats.node_count += 1;
            if node.is_leaf() {
                stats.leaf_count += 1;
            }
            for child in node.children() {
                walk(child, stats);
            }
        }

        let mut stats = TreeStats {
            len: self.len,
            order: self.config.order,
            tree_height: self.height(),
            node_count: 0,
            leaf_count: 0,
        };
        walk(&self.root, &mut stats);
        stats
    }

    /// Export the tree structure for visualization
    pub fn export_tree(&self) -> TreeNode<T>
    where
        T: Clone,
    {
        fn export<T: Clone>(node: &Node<T>) -> TreeNode<T> {
            TreeNode {
                height: node.height(),
                is_leaf: node.is_leaf(),
                keys: node.keys().to_vec(),
                children: node.children().iter().map(export).collect(),
            }
        }

        export(&self.root)
    }
}

impl<T: Ord> BTreeSet<T> {
    /// Returns true if the set contains the value.
    ///
    /// The value may be any borrowed form of the set's value type, but the
    /// ordering on the borrowed form *must* match the ordering on the value
    /// type.
    pub fn has<Q: ?Sized>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord,
    {
        matches!(search_tree(&self.root, value), (_, SearchResult::Found(_)))
    }

    /// Adds a value to the set.
    ///
    /// Returns `false`, leaving the set untouched, if an equal value is
    /// already present.
    pub fn add(&mut self, value: T) -> bool {
        match insert_recursive(&mut self.root, value, &self.config) {
            InsertResult::Duplicate => return false,
            InsertResult::Fit => {}
            InsertResult::Split(separator, right) => self.split_root(separator, right),
        }
        self.len += 1;
        true
    }

    /// Removes a value from the set.
    ///
    /// Returns `true` if the value was present.
    pub fn delete<Q: ?Sized>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord,
    {
        self.take(value).is_some()
    }

    /// Removes and returns the stored value equal to `value`, if any
    pub fn take<Q: ?Sized>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord,
    {
        let removed = remove_recursive(&mut self.root, value, &self.config)?;
        if self.root.len() == 0 && !self.root.is_leaf() {
            self.collapse_root();
        }
        self.len -= 1;
        Some(removed)
    }

    /// Check every structural invariant of the tree.
    ///
    /// Verifies occupancy bounds, strict ordering within and across nodes,
    /// uniform leaf depth, child counts and the stored length.
    pub fn validate(&self) -> Result<()> {
        if self.len == 0 {
            if !self.root.is_leaf() || self.root.len() != 0 {
                return Err(BTreeError::corruption(
                    "empty set must have a single empty leaf as root",
                ));
            }
            return Ok(());
        }
        if self.root.len() == 0 {
            return Err(BTreeError::corruption("non-empty set has a root without keys"));
        }

        let mut count = 0;
        self.validate_node(&self.root, true, None, &mut count)?;
        if count != self.len {
            return Err(BTreeError::corruption(format!(
                "stored length {} but tree holds {} values",
                self.len, count
            )));
        }
        Ok(())
    }

    /// Validate a subtree whose keys must all exceed `lower`.
    ///
    /// Returns the largest key in the subtree.
    fn validate_node<'a>(
        &self,
        node: &'a Node<T>,
        is_root: bool,
        mut lower: Option<&'a T>,
        count: &mut usize,
    ) -> Result<Option<&'a T>> {
        let len = node.len();
        if len > self.config.max_keys() {
            return Err(BTreeError::corruption(format!(
                "node at height {} holds {} keys (max: {})",
                node.height(),
                len,
                self.config.max_keys()
            )));
        }
        if !is_root && len < self.config.min_keys() {
            return Err(BTreeError::corruption(format!(
                "node at height {} holds {} keys (min: {})",
                node.height(),
                len,
                self.config.min_keys()
            )));
        }

        let children = node.children();
        if node.is_leaf() {
            if !children.is_empty() {
                return Err(BTreeError::corruption("leaf has children"));
            }
        } else {
            if children.len() != len + 1 {
                return Err(BTreeError::corruption(format!(
                    "node at height {} has {} keys but {} children",
                    node.height(),
                    len,
                    children.len()
                )));
            }
            if let Some(child) = children.iter().find(|c| c.height() + 1 != node.height()) {
                return Err(BTreeError::corruption(format!(
                    "child at height {} under node at height {}",
                    child.height(),
                    node.height()
                )));
            }
        }

        for (i, key) in node.keys().iter().enumerate() {
            if let Some(child) = children.get(i) {
                lower = self.validate_node(child, false, lower, count)?;
            }
            if let Some(previous) = lower {
                if previous >= key {
                    return Err(BTreeError::corruption(format!(
                        "keys out of order at height {}",
                        node.height()
                    )));
                }
            }
            lower = Some(key);
            *count += 1;
        }
        if let Some(child) = children.get(len) {
            lower = self.validate_node(child, false, lower, count)?;
        }

        Ok(lower)
    }

    /// Grow the tree by one level after the root split
    fn split_root(&mut self, separator: T, right: Node<T>) {
        let left = mem::replace(&mut self.root, Node::new_leaf());
        self.root = Node::new_root(left, separator, right);
        tracing::trace!(
            target: "btree_set::root",
            height = self.root.height(),
            "split root"
        );
    }

    /// Shrink the tree by one level after a merge emptied the root
    fn collapse_root(&mut self) {
        let old_root = mem::replace(&mut self.root, Node::new_leaf());
        self.root = old_root.into_only_child();
        tracing::trace!(
            target: "btree_set::root",
            height = self.root.height(),
            "collapsed root"
        );
    }
}

impl<T> Default for BTreeSet<T> {
    fn default() -> Self {
        Self {
            config: BTreeConfig::default(),
            root: Node::new_leaf(),
            len: 0,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for BTreeSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Ord> Extend<T> for BTreeSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for BTreeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<'a, T> IntoIterator for &'a BTreeSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
