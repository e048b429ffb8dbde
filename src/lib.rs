//! AVL order-statistic set for Rust.
//!
//! This crate provides [`AvlSet`], an ordered set with the familiar
//! `BTreeSet` surface plus O(log n) order-statistic operations and an explicit
//! bidirectional [`Cursor`]:
//!
//! - [`get_by_rank`](AvlSet::get_by_rank) - Get the element at a given sorted position
//! - [`rank_of`](AvlSet::rank_of) - Get the sorted position of a value
//! - [`lower_bound`](AvlSet::lower_bound) / [`find`](AvlSet::find) - Position a cursor by value
//! - Indexing by [`Rank`] - e.g., `set[Rank(0)]` for the first element
//!
//! # Example
//!
//! ```
//! use avl_ost::{AvlSet, Rank};
//!
//! let mut set = AvlSet::new();
//! for value in [4, 2, 6, 1, 3, 5, 7] {
//!     set.insert(value);
//! }
//!
//! // Standard set operations work as expected
//! assert!(set.contains(&5));
//! assert_eq!(set.len(), 7);
//!
//! // Order-statistic operations (O(log n))
//! assert_eq!(set.get_by_rank(3), Some(&4));
//! assert_eq!(set.rank_of(&6), Some(5));
//! assert_eq!(set[Rank(0)], 1);
//!
//! // Cursors step in both directions and stop at either end
//! let mut cursor = set.lower_bound(&6);
//! assert_eq!(cursor.key(), Some(&6));
//! cursor.move_next();
//! cursor.move_next();
//! assert_eq!(cursor, set.end());
//! cursor.move_prev();
//! assert_eq!(cursor.key(), Some(&7));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **O(log n) rank operations** - Efficient order-statistic queries via subtree size augmentation
//! - **Stackless cursors** - Stepping follows parent links; a logical rank marks both ends
//!
//! # Implementation
//!
//! The set is an AVL tree whose nodes live in a handle-addressed arena. Every
//! node stores its subtree height (for balancing) and subtree size (for rank
//! queries), plus a parent handle so that cursors can step to a neighbour
//! without keeping a stack. Cursors borrow the set, so the tree cannot change
//! underneath one.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod order_statistic;
mod raw;

pub mod avl_set;

pub use avl_set::{AvlSet, Cursor};
pub use error::{Error, Result};
pub use order_statistic::Rank;
