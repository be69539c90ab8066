//! This is a library to maintain a forest over the elements of a [partial hierarchy](https://en.wikipedia.org/wiki/Partially_ordered_set).
//!
//! The order between elements is not given by explicit edges. Instead, a [SuccessorOracle]
//! answers whether one element is a transitive successor of another. The [Forest] keeps an
//! index of the contained elements that reflects every successor relation between them and
//! updates it incrementally on every insertion and removal.
//!
//! Elements that succeed several unrelated elements get several parents, so the forest is a
//! DAG below a sentinel root.
//!
//! # Examples
//!
//! ```rust
//! # use std::error::Error;
//! #
//! # fn main() -> Result<(), Box<dyn Error>> {
//! use partial_hierarchy::{Forest, Total};
//!
//! // an element succeeds every element that is a prefix of it
//! let oracle = Total(|a: &&str, b: &&str| a.len() > b.len() && a.starts_with(*b));
//! let mut forest = Forest::<&str, _>::new(oracle);
//!
//! forest.insert_all(["src/lib.rs", "src/", "src/forest/", "src/forest/insert.rs"])?;
//!
//! let src = forest.find(&"src/")?.unwrap();
//! assert_eq!(forest.children(src).count(), 2);
//! assert_eq!(forest.dfs_order(), [&"src/", &"src/lib.rs", &"src/forest/", &"src/forest/insert.rs"]);
//!
//! // removing an element moves its children up
//! forest.remove(&"src/forest/")?;
//! assert_eq!(forest.children(src).count(), 2);
//! assert_eq!(forest.leaves().count(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! Oracles may fail. A `HierarchyError` aborts the operation and leaves the forest unchanged.
//! ```rust
//! use partial_hierarchy::{Forest, HierarchyError};
//!
//! let oracle = |a: &i32, b: &i32| -> Result<bool, HierarchyError<i32>> {
//!     if *a < 0 {
//!         return Err(HierarchyError::new(vec![*a, *b, *a], *a));
//!     }
//!     Ok(a > b)
//! };
//! let mut forest = Forest::<i32, _>::new(oracle);
//! assert_eq!(forest.insert(1), Ok(true));
//! assert!(forest.insert(-1).is_err());
//! assert_eq!(forest.len(), 1);
//! ```
//!
//! # Concurrency
//!
//! Mutations take `&mut self`. Use [SharedForest] to share a forest between threads behind a
//! single lock.

#![forbid(unsafe_code)]
#![doc(test(attr(deny(warnings, rust_2018_idioms), allow(dead_code))))]
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms, unreachable_pub)]

mod forest;
mod oracle;
mod shared;

#[cfg(test)]
mod tests;

pub use forest::Comparator;
pub use forest::Forest;
pub use forest::NodeRef;
pub use oracle::HierarchyError;
pub use oracle::SuccessorOracle;
pub use oracle::Total;
pub use shared::SharedForest;
