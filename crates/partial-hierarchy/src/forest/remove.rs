use petgraph::stable_graph::NodeIndex;
use petgraph::Incoming;
use tracing::{debug, instrument};

use crate::forest::Forest;
use crate::oracle::{HierarchyError, SuccessorOracle};

impl<T: PartialEq, O: SuccessorOracle<T>> Forest<T, O> {
    /// Remove an element.
    ///
    /// The node of the element is detached from all of its parents and each of its children
    /// becomes a child of each of its former parents.
    ///
    /// Returns `false` if the element is not contained.
    ///
    /// # Errors
    ///
    /// Returns the oracle's `HierarchyError` from locating the element. The forest is
    /// unchanged in that case.
    #[instrument(skip_all)]
    pub fn remove(&mut self, value: &T) -> Result<bool, HierarchyError<T>> {
        let Some(node) = self.find(value)? else {
            return Ok(false);
        };
        self.splice_out(node.0);
        Ok(true)
    }

    /// Remove all elements in iteration order. Returns whether at least one element was
    /// removed.
    ///
    /// # Errors
    ///
    /// Stops at the first `HierarchyError`. Elements before the failing one stay removed.
    pub fn remove_all<'a>(&mut self, values: impl IntoIterator<Item = &'a T>) -> Result<bool, HierarchyError<T>>
    where
        T: 'a,
    {
        let mut changed = false;
        for value in values {
            changed |= self.remove(value)?;
        }
        Ok(changed)
    }

    fn splice_out(&mut self, node: NodeIndex) {
        debug_assert_ne!(node, self.root.0, "the root cannot be removed");
        let parents: Vec<_> = self.tree.neighbors_directed(node, Incoming).collect();
        let children = self.ordered_children(node);
        for &parent in &parents {
            for &child in &children {
                self.attach(parent, child);
            }
        }
        self.tree.remove_node(node);
        debug!(node = node.index(), parents = parents.len(), children = children.len(), "removed element");
    }
}
