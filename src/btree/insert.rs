//! Insertion with node splitting.

use super::node::Node;
use super::search::{search_node, SearchResult};
use crate::types::BTreeConfig;

/// Outcome of inserting into a subtree
pub(crate) enum InsertResult<T> {
    /// The value was already present; nothing changed
    Duplicate,
    /// The value was stored without overflowing this node
    Fit,
    /// This node overflowed and was split: promote the key and link the
    /// new right sibling into the parent
    Split(T, Node<T>),
}

/// Recursive insert
///
/// Descends to the target leaf, then splits every node that reaches
/// `order` keys on the way back up.
pub(crate) fn insert_recursive<T: Ord>(
    node: &mut Node<T>,
    value: T,
    config: &BTreeConfig,
) -> InsertResult<T> {
    let idx = match search_node(node, &value) {
        SearchResult::Found(_) => return InsertResult::Duplicate,
        SearchResult::GoDown(idx) => idx,
    };

    if node.is_leaf() {
        node.insert_at(idx, value, None);
    } else {
        // Handle child split
        match insert_recursive(node.child_mut(idx), value, config) {
            InsertResult::Split(separator, right) => node.insert_at(idx, separator, Some(right)),
            done => return done,
        }
    }

    if node.len() < config.order {
        return InsertResult::Fit;
    }

    let (median, right) = node.split(config.split_index());
    debug_assert!(node.len() >= config.min_keys() && right.len() >= config.min_keys());
    InsertResult::Split(median, right)
}
