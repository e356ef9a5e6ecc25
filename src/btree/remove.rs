//! Deletion with sibling borrowing and merging.
//!
//! Keys found in internal nodes are replaced by their in-order predecessor,
//! so every physical removal happens in a leaf. On the way back up, each
//! parent repairs the child it descended into if that child fell below
//! minimum occupancy: borrow from a sibling with a spare key when possible,
//! otherwise merge with a sibling. The parent may be left underfull itself,
//! which its own parent repairs in turn. Root collapse is handled by the
//! caller.

use std::borrow::Borrow;
use std::mem;

use super::node::Node;
use super::search::{search_node, SearchResult};
use crate::types::BTreeConfig;

/// Recursive delete
///
/// Returns the removed key, or `None` if the subtree does not hold it.
pub(crate) fn remove_recursive<T, Q: ?Sized>(
    node: &mut Node<T>,
    key: &Q,
    config: &BTreeConfig,
) -> Option<T>
where
    T: Borrow<Q>,
    Q: Ord,
{
    match search_node(node, key) {
        SearchResult::Found(idx) if node.is_leaf() => Some(node.keys_mut().remove(idx)),
        SearchResult::Found(idx) => {
            let predecessor = pop_max(node.child_mut(idx), config);
            let removed = mem::replace(&mut node.keys_mut()[idx], predecessor);
            fix_underflow(node, idx, config);
            Some(removed)
        }
        SearchResult::GoDown(_) if node.is_leaf() => None,
        SearchResult::GoDown(idx) => {
            let removed = remove_recursive(node.child_mut(idx), key, config)?;
            fix_underflow(node, idx, config);
            Some(removed)
        }
    }
}

/// Remove and return the largest key of a non-root subtree
fn pop_max<T>(node: &mut Node<T>, config: &BTreeConfig) -> T {
    if node.is_leaf() {
        return match node.keys_mut().pop() {
            Some(key) => key,
            None => unreachable!("non-root leaf holds at least one key"),
        };
    }

    let last = node.len();
    let max = pop_max(node.child_mut(last), config);
    fix_underflow(node, last, config);
    max
}

/// Restore minimum occupancy of child `idx`, preferring a borrow over a merge
fn fix_underflow<T>(node: &mut Node<T>, idx: usize, config: &BTreeConfig) {
    let min = config.min_keys();
    let children = node.children();
    if children[idx].len() >= min {
        return;
    }

    let has_left = idx > 0;
    let has_right = idx < node.len();

    if has_left && children[idx - 1].len() > min {
        node.rotate_right(idx);
    } else if has_right && children[idx + 1].len() > min {
        node.rotate_left(idx);
    } else if has_left {
        node.merge_children(idx - 1);
    } else {
        debug_assert!(has_right, "internal node with a single child");
        node.merge_children(idx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::btree::node::tests::{internal, leaf};

    fn child_keys(node: &Node<i32>) -> Vec<Vec<i32>> {
        node.children().iter().map(|c| c.keys().to_vec()).collect()
    }

    #[test]
    fn test_remove_from_leaf() {
        let config = BTreeConfig::new(5);
        let mut node = leaf(&[1, 2, 3]);
        assert_eq!(remove_recursive(&mut node, &2, &config), Some(2));
        assert_eq!(remove_recursive(&mut node, &7, &config), None);
        assert_eq!(node.keys(), &[1, 3]);
    }

    #[test]
    fn test_remove_borrows_from_left() {
        let config = BTreeConfig::new(3);
        let mut node = internal(&[10], vec![leaf(&[1, 5]), leaf(&[15])]);
        assert_eq!(remove_recursive(&mut node, &15, &config), Some(15));
        assert_eq!(node.keys(), &[5]);
        assert_eq!(child_keys(&node), vec![vec![1], vec![10]]);
    }

    #[test]
    fn test_remove_borrows_from_right() {
        let config = BTreeConfig::new(3);
        let mut node = internal(&[10], vec![leaf(&[5]), leaf(&[15, 20])]);
        assert_eq!(remove_recursive(&mut node, &5, &config), Some(5));
        assert_eq!(node.keys(), &[15]);
        assert_eq!(child_keys(&node), vec![vec![10], vec![20]]);
    }

    #[test]
    fn test_remove_prefers_borrow_over_merge() {
        let config = BTreeConfig::new(3);
        // left sibling is minimal, right sibling can lend
        let mut node = internal(&[10, 20], vec![leaf(&[5]), leaf(&[15]), leaf(&[25, 30])]);
        assert_eq!(remove_recursive(&mut node, &15, &config), Some(15));
        assert_eq!(node.keys(), &[10, 25]);
        assert_eq!(child_keys(&node), vec![vec![5], vec![20], vec![30]]);
    }

    #[test]
    fn test_remove_merges_minimal_siblings() {
        let config = BTreeConfig::new(3);
        let mut node = internal(&[10, 20], vec![leaf(&[5]), leaf(&[15]), leaf(&[25])]);
        assert_eq!(remove_recursive(&mut node, &25, &config), Some(25));
        assert_eq!(node.keys(), &[10]);
        assert_eq!(child_keys(&node), vec![vec![5], vec![15, 20]]);
    }

    #[test]
    fn test_remove_internal_key_uses_predecessor() {
        let config = BTreeConfig::new(5);
        let mut node = internal(&[10], vec![leaf(&[3, 6, 9]), leaf(&[12, 14])]);
        assert_eq!(remove_recursive(&mut node, &10, &config), Some(10));
        assert_eq!(node.keys(), &[9]);
        assert_eq!(child_keys(&node), vec![vec![3, 6], vec![12, 14]]);
    }

    #[test]
    fn test_remove_merge_cascades_to_empty_root() {
        let config = BTreeConfig::new(3);
        let mut root = internal(&[10], vec![leaf(&[5]), leaf(&[15])]);
        assert_eq!(remove_recursive(&mut root, &10, &config), Some(10));
        assert_eq!(root.len(), 0);
        assert_eq!(child_keys(&root), vec![vec![5, 15]]);
    }
}
