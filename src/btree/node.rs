//! B-tree node model.
//!
//! A node is tagged by its height: height 0 is a leaf with no children,
//! height `h > 0` is an internal node owning exactly `len() + 1` children
//! of height `h - 1`. Children are owned directly, so subtrees move between
//! parents during split, borrow and merge without any shared pointers.

use std::mem;

/// A leaf or internal node
#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    height: usize,
    keys: Vec<T>,
    children: Vec<Node<T>>,
}

impl<T> Node<T> {
    /// Create an empty leaf
    pub fn new_leaf() -> Self {
        Self {
            height: 0,
            keys: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create a root one level above `left` holding a single separator
    pub fn new_root(left: Node<T>, key: T, right: Node<T>) -> Self {
        debug_assert_eq!(left.height, right.height);
        Self {
            height: left.height + 1,
            keys: vec![key],
            children: vec![left, right],
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of keys stored in this node
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.height == 0
    }

    pub fn keys(&self) -> &[T] {
        &self.keys
    }

    pub fn children(&self) -> &[Node<T>] {
        &self.children
    }

    /// Child at edge `idx`, or `None` for leaves and out-of-range edges
    pub fn child(&self, idx: usize) -> Option<&Node<T>> {
        self.children.get(idx)
    }

    pub(crate) fn keys_mut(&mut self) -> &mut Vec<T> {
        &mut self.keys
    }

    pub(crate) fn child_mut(&mut self, idx: usize) -> &mut Node<T> {
        &mut self.children[idx]
    }

    /// Insert `key` at `idx` and, for internal nodes, `right` as the edge
    /// immediately after it
    pub fn insert_at(&mut self, idx: usize, key: T, right: Option<Node<T>>) {
        self.keys.insert(idx, key);
        if let Some(edge) = right {
            debug_assert_eq!(edge.height + 1, self.height);
            self.children.insert(idx + 1, edge);
        }
    }

    /// Split an overfull node around `at`.
    ///
    /// Keeps keys `..at` (and edges `..=at`) in place and returns the
    /// promoted key together with a new right sibling holding the rest.
    pub fn split(&mut self, at: usize) -> (T, Node<T>) {
        debug_assert!(at < self.keys.len());
        let right_keys = self.keys.split_off(at + 1);
        let right_children = if self.is_leaf() {
            Vec::new()
        } else {
            self.children.split_off(at + 1)
        };
        let median = match self.keys.pop() {
            Some(key) => key,
            None => unreachable!("split index {} is within the key range", at),
        };

        tracing::trace!(
            target: "btree_set::split",
            height = self.height,
            left = self.keys.len(),
            right = right_keys.len(),
            "split overfull node"
        );

        let right = Node {
            height: self.height,
            keys: right_keys,
            children: right_children,
        };
        (median, right)
    }

    /// Move the last key of child `idx - 1` up into separator `idx - 1`,
    /// and the old separator down to the front of child `idx`
    pub fn rotate_right(&mut self, idx: usize) {
        let (lefts, rights) = self.children.split_at_mut(idx);
        let left = &mut lefts[idx - 1];
        let child = &mut rights[0];

        let (key, edge) = match left.pop_back() {
            Some(popped) => popped,
            None => unreachable!("lending sibling has spare keys"),
        };
        let separator = mem::replace(&mut self.keys[idx - 1], key);
        child.keys.insert(0, separator);
        if let Some(edge) = edge {
            child.children.insert(0, edge);
        }

        tracing::trace!(
            target: "btree_set::borrow",
            height = child.height,
            child = idx,
            direction = "left",
            "borrowed key from left sibling"
        );
    }

    /// Move the first key of child `idx + 1` up into separator `idx`,
    /// and the old separator down to the back of child `idx`
    pub fn rotate_left(&mut self, idx: usize) {
        let (lefts, rights) = self.children.split_at_mut(idx + 1);
        let child = &mut lefts[idx];
        let right = &mut rights[0];

        let key = right.keys.remove(0);
        let edge = if right.is_leaf() {
            None
        } else {
            Some(right.children.remove(0))
        };
        let separator = mem::replace(&mut self.keys[idx], key);
        child.keys.push(separator);
        if let Some(edge) = edge {
            child.children.push(edge);
        }

        tracing::trace!(
            target: "btree_set::borrow",
            height = child.height,
            child = idx,
            direction = "right",
            "borrowed key from right sibling"
        );
    }

    /// Merge child `idx + 1` and separator `idx` into child `idx`
    pub fn merge_children(&mut self, idx: usize) {
        let right = self.children.remove(idx + 1);
        let separator = self.keys.remove(idx);
        let left = &mut self.children[idx];

        left.keys.push(separator);
        left.keys.extend(right.keys);
        left.children.extend(right.children);

        tracing::trace!(
            target: "btree_set::merge",
            height = left.height,
            survivor = idx,
            keys = left.keys.len(),
            "merged sibling into left child"
        );
    }

    /// Collapse an internal node with no keys into its only child
    pub fn into_only_child(mut self) -> Node<T> {
        debug_assert!(self.keys.is_empty() && self.children.len() == 1);
        match self.children.pop() {
            Some(child) => child,
            None => unreachable!("internal node without children"),
        }
    }

    /// Remove the last key, and for internal nodes the last edge
    fn pop_back(&mut self) -> Option<(T, Option<Node<T>>)> {
        let key = self.keys.pop()?;
        let edge = if self.is_leaf() {
            None
        } else {
            self.children.pop()
        };
        Some((key, edge))
    }
}
