//! Key search within and across nodes.

use std::borrow::Borrow;
use std::cmp::Ordering;

use super::node::Node;

use self::SearchResult::*;

/// Outcome of searching a single node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SearchResult {
    /// The key is stored at this index
    Found(usize),
    /// The key is absent here; descend (or insert) at this edge
    GoDown(usize),
}

/// Find `key` in one node: the index of an equal key, or the first key
/// greater than it
pub(crate) fn search_node<T, Q: ?Sized>(node: &Node<T>, key: &Q) -> SearchResult
where
    T: Borrow<Q>,
    Q: Ord,
{
    for (i, k) in node.keys().iter().enumerate() {
        match key.cmp(k.borrow()) {
            Ordering::Greater => {}
            Ordering::Equal => return Found(i),
            Ordering::Less => return GoDown(i),
        }
    }
    GoDown(node.len())
}

/// Descend from `node` until `key` is found or a leaf is exhausted.
///
/// Returns the node holding the key with its index, or the leaf where the
/// key would be inserted with the insertion index.
pub(crate) fn search_tree<'a, T, Q: ?Sized>(
    mut node: &'a Node<T>,
    key: &Q,
) -> (&'a Node<T>, SearchResult)
where
    T: Borrow<Q>,
    Q: Ord,
{
    loop {
        match search_node(node, key) {
            Found(idx) => return (node, Found(idx)),
            GoDown(idx) => match node.child(idx) {
                Some(child) => node = child,
                None => return (node, GoDown(idx)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SearchResult::*;
    use super::*;
    use crate::btree::node::tests::{internal, leaf};

    #[test]
    fn test_search_node() {
        let node = leaf(&[10, 20, 30]);
        assert_eq!(search_node(&node, &5), GoDown(0));
        assert_eq!(search_node(&node, &10), Found(0));
        assert_eq!(search_node(&node, &25), GoDown(2));
        assert_eq!(search_node(&node, &30), Found(2));
        assert_eq!(search_node(&node, &31), GoDown(3));
    }

    #[test]
    fn test_search_empty_leaf() {
        let node: Node<i32> = Node::new_leaf();
        assert_eq!(search_node(&node, &1), GoDown(0));
        let (found_in, result) = search_tree(&node, &1);
        assert!(found_in.is_leaf());
        assert_eq!(result, GoDown(0));
    }

    #[test]
    fn test_search_tree_descends() {
        let root = internal(&[10, 20], vec![leaf(&[1, 5]), leaf(&[12, 15]), leaf(&[25])]);

        let (node, result) = search_tree(&root, &20);
        assert_eq!(node.height(), 1);
        assert_eq!(result, Found(1));

        let (node, result) = search_tree(&root, &15);
        assert_eq!(node.keys(), &[12, 15]);
        assert_eq!(result, Found(1));

        let (node, result) = search_tree(&root, &13);
        assert_eq!(node.keys(), &[12, 15]);
        assert_eq!(result, GoDown(1));

        let (node, result) = search_tree(&root, &99);
        assert_eq!(node.keys(), &[25]);
        assert_eq!(result, GoDown(1));
    }

    #[test]
    fn test_search_borrowed_form() {
        let mut node: Node<String> = Node::new_leaf();
        node.insert_at(0, "b".to_string(), None);
        assert_eq!(search_node(&node, "a"), GoDown(0));
        assert_eq!(search_node(&node, "b"), Found(0));
    }
}
