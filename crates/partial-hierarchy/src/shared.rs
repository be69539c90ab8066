use std::fmt::{Debug, Formatter};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::forest::Forest;
use crate::oracle::{HierarchyError, SuccessorOracle};

/// A [Forest] behind a single lock.
///
/// Insertions and removals take the write lock, all queries take the read lock, so
/// structural changes never interleave with each other or with reads.
///
/// ```rust
/// use std::thread;
///
/// use partial_hierarchy::{Forest, SharedForest, Total};
///
/// let forest = SharedForest::new(Forest::<u32, _>::new(Total(|a: &u32, b: &u32| a != b && a % b == 0)));
/// thread::scope(|s| {
///     for chunk in [[2, 4], [8, 16]] {
///         let forest = &forest;
///         s.spawn(move || chunk.into_iter().for_each(|v| assert_eq!(forest.insert(v), Ok(true))));
///     }
/// });
/// assert_eq!(forest.dfs_order(), [2, 4, 8, 16]);
/// ```
pub struct SharedForest<T, O> {
    inner: RwLock<Forest<T, O>>,
}

impl<T, O> SharedForest<T, O> {
    /// Wrap a forest.
    pub fn new(forest: Forest<T, O>) -> Self {
        Self { inner: RwLock::new(forest) }
    }

    /// Lock the forest for reading.
    pub fn read(&self) -> RwLockReadGuard<'_, Forest<T, O>> {
        // Changes are only committed after every oracle call succeeded, so a panicking oracle
        // cannot leave a half-changed forest behind.
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Forest<T, O>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Unwrap the forest.
    pub fn into_inner(self) -> Forest<T, O> {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the number of contained elements.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns whether the forest contains no elements.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

impl<T: PartialEq, O: SuccessorOracle<T>> SharedForest<T, O> {
    /// See [Forest::insert].
    pub fn insert(&self, value: T) -> Result<bool, HierarchyError<T>> {
        self.write().insert(value)
    }

    /// See [Forest::insert_tolerant].
    pub fn insert_tolerant(&self, value: T) -> bool
    where
        T: Debug,
    {
        self.write().insert_tolerant(value)
    }

    /// See [Forest::remove].
    pub fn remove(&self, value: &T) -> Result<bool, HierarchyError<T>> {
        self.write().remove(value)
    }

    /// See [Forest::contains].
    pub fn contains(&self, value: &T) -> Result<bool, HierarchyError<T>> {
        self.read().contains(value)
    }
}

impl<T: Clone, O> SharedForest<T, O> {
    /// See [Forest::dfs_order].
    pub fn dfs_order(&self) -> Vec<T> {
        self.read().dfs_order().into_iter().cloned().collect()
    }

    /// See [Forest::contents].
    pub fn contents(&self) -> Vec<T> {
        self.read().contents().cloned().collect()
    }

    /// See [Forest::leaves].
    pub fn leaves(&self) -> Vec<T> {
        self.read().leaves().cloned().collect()
    }
}

impl<T: Debug, O> Debug for SharedForest<T, O> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedForest").field("forest", &*self.read()).finish()
    }
}
