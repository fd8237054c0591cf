//! A self-balancing ordered set.
//!
//! [`AvlTree`] is a binary search tree that maintains the AVL height-balance
//! invariant as values are inserted and removed, bounding search, insertion
//! and removal to O(log n) comparisons in the worst case regardless of
//! insertion order.
//!
//! Values are kept in the order defined by a comparator injected at
//! construction time - the [`Ord`] implementation of the value type by
//! default:
//!
//! ```rust
//! use avlset::AvlTree;
//!
//! let mut t = AvlTree::new();
//!
//! t.insert(42).unwrap();
//! t.insert(24).unwrap();
//!
//! assert_eq!(t.get(&42), Ok(&42));
//! assert_eq!(t.len(), 2);
//!
//! // Values are yielded in comparator order.
//! assert_eq!(t.iter().collect::<Vec<_>>(), [&24, &42]);
//!
//! // Inserting a value already present is rejected, leaving the tree
//! // unchanged.
//! assert!(t.insert(42).is_err());
//!
//! t.remove(&42).unwrap();
//! assert!(!t.contains(&42));
//! ```
//!
//! Nodes are stored in an index-based arena: child links exclusively own
//! their slot while parent back-references are plain indexes, and dropping
//! the tree releases every node in a single pass over the backing storage
//! rather than descending the (possibly deep) tree structure.

mod arena;
mod balance;
mod error;
mod iter;
mod node;
mod tree;


pub use error::TreeError;
pub use iter::{IntoIter, Iter};
pub use tree::AvlTree;
