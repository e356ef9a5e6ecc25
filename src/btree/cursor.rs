//! B-tree cursor for iteration.
//!
//! The cursor walks the tree in order. It keeps a stack of
//! (node, key_index) pairs describing the path from the root to the next
//! key to yield; each `next` either advances within the current node or
//! pops up to the nearest ancestor with keys left.

use std::iter::FusedIterator;

use super::node::Node;

/// An ascending iterator over the values of a `BTreeSet`
#[derive(Debug)]
pub struct Iter<'a, T> {
    /// Path to the next key; the index is the next key to yield in that node
    stack: Vec<(&'a Node<T>, usize)>,
    /// Values left to yield
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    /// Create a cursor positioned before the smallest value
    pub(crate) fn new(root: &'a Node<T>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::with_capacity(root.height() + 1),
            remaining: len,
        };
        iter.descend_to_leftmost(root);
        iter
    }

    /// Push the path from `node` down to its leftmost leaf
    fn descend_to_leftmost(&mut self, node: &'a Node<T>) {
        let mut current = node;
        loop {
            self.stack.push((current, 0));
            match current.child(0) {
                Some(child) => current = child,
                None => break,
            }
        }
    }
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        loop {
            let (node, idx) = self.stack.last_mut()?;
            let node: &'a Node<T> = *node;

            if *idx < node.len() {
                let value = &node.keys()[*idx];
                *idx += 1;
                let edge = *idx;

                // Everything in the edge after this key comes next
                if let Some(child) = node.child(edge) {
                    self.descend_to_leftmost(child);
                }
                self.remaining -= 1;
                return Some(value);
            }

            self.stack.pop();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}
