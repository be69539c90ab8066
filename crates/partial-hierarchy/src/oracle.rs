use std::fmt::Debug;

use thiserror::Error;

/// A cycle found by an oracle while answering a successor query.
///
/// The forest never detects cycles itself. An oracle that walks an underlying relation and
/// runs into a cycle reports it with this error, and the forest hands it back to the caller
/// unchanged.
#[derive(Error, Clone, Debug, Eq, PartialEq, Hash)]
#[error("cycle detected at {element:?} (path: {path:?})")]
pub struct HierarchyError<T> {
    /// The elements on the cycle, in traversal order.
    pub path: Vec<T>,
    /// The element at which the cycle was closed.
    pub element: T,
}

impl<T> HierarchyError<T> {
    /// Create a new cycle error.
    pub fn new(path: Vec<T>, element: T) -> Self {
        Self { path, element }
    }
}

/// Decides the order between elements of a partial hierarchy.
///
/// `is_successor_of(candidate, reference)` must return `true` exactly if `candidate` is a
/// transitive successor (descendant) of `reference`. Answers must not change for a pair of
/// elements during the lifetime of a [Forest](crate::Forest) that contains them. The
/// relation is strict: an element is never its own successor.
///
/// Every closure `Fn(&T, &T) -> Result<bool, HierarchyError<T>>` is an oracle. Use [Total] for
/// predicates that cannot fail.
///
/// ```rust
/// use partial_hierarchy::{HierarchyError, SuccessorOracle};
///
/// let divides = |a: &u32, b: &u32| -> Result<bool, HierarchyError<u32>> { Ok(a != b && a % b == 0) };
/// assert_eq!(divides.is_successor_of(&8, &4), Ok(true));
/// assert_eq!(divides.is_successor_of(&4, &8), Ok(false));
/// ```
pub trait SuccessorOracle<T> {
    /// Returns whether `candidate` is a transitive successor of `reference`.
    fn is_successor_of(&self, candidate: &T, reference: &T) -> Result<bool, HierarchyError<T>>;
}

impl<T, F> SuccessorOracle<T> for F
where
    F: Fn(&T, &T) -> Result<bool, HierarchyError<T>>,
{
    #[inline]
    fn is_successor_of(&self, candidate: &T, reference: &T) -> Result<bool, HierarchyError<T>> {
        self(candidate, reference)
    }
}

/// Adapts an infallible predicate to a [SuccessorOracle].
///
/// ```rust
/// use partial_hierarchy::{Forest, Total};
///
/// let mut forest = Forest::<u32, _>::new(Total(|a: &u32, b: &u32| a != b && a % b == 0));
/// assert_eq!(forest.insert(3), Ok(true));
/// assert_eq!(forest.insert(9), Ok(true));
/// assert_eq!(forest.dfs_order(), [&3, &9]);
/// ```
#[derive(Copy, Clone, Debug, Default)]
pub struct Total<F>(pub F);

impl<T, F> SuccessorOracle<T> for Total<F>
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn is_successor_of(&self, candidate: &T, reference: &T) -> Result<bool, HierarchyError<T>> {
        Ok((self.0)(candidate, reference))
    }
}
