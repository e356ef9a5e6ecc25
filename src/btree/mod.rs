//! B-tree implementation.
//!
//! This module provides an in-memory B-tree set that supports:
//! - Membership tests (has)
//! - Insertions with node splitting (add)
//! - Deletions with borrowing, merging and root collapse (delete)
//! - Ascending iteration

mod cursor;
mod insert;
mod node;
mod remove;
mod search;
mod tree;

pub use cursor::Iter;
pub use tree::BTreeSet;
