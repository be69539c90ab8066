use std::collections::HashSet;
use std::fmt::Debug;

use petgraph::stable_graph::NodeIndex;
use tracing::{debug, instrument, warn};

use crate::forest::Forest;
use crate::oracle::{HierarchyError, SuccessorOracle};

impl<T: PartialEq, O: SuccessorOracle<T>> Forest<T, O> {
    /// Insert an element.
    ///
    /// The element is attached below every node whose element it succeeds and that has no
    /// child it succeeds as well. Existing nodes at those places that succeed the new element
    /// are moved below it.
    ///
    /// Returns `false` without changing the forest if the element is already contained.
    ///
    /// # Errors
    ///
    /// Returns the oracle's `HierarchyError`. All oracle queries happen before the first
    /// change, so the forest is unchanged in that case.
    #[instrument(skip_all)]
    pub fn insert(&mut self, value: T) -> Result<bool, HierarchyError<T>> {
        if self.find(&value)?.is_some() {
            return Ok(false);
        }

        let parents = self.attachment_points(&value)?;
        let (promoted, adopted) = self.successors_below(&value, &parents)?;

        let node = self.tree.add_node(Some(value));
        for &parent in &parents {
            self.attach(parent, node);
        }
        for &(parent, sibling) in &promoted {
            self.detach(parent, sibling);
            self.attach(node, sibling);
        }
        for &successor in &adopted {
            self.attach(node, successor);
        }

        debug!(
            node = node.index(),
            parents = parents.len(),
            promoted = promoted.len(),
            adopted = adopted.len(),
            "inserted element"
        );
        Ok(true)
    }

    /// Insert an element, logging and swallowing oracle errors.
    ///
    /// Returns `true` exactly if [Forest::insert] would have returned `Ok(true)`.
    pub fn insert_tolerant(&mut self, value: T) -> bool
    where
        T: Debug,
    {
        match self.insert(value) {
            Ok(inserted) => inserted,
            Err(err) => {
                warn!(%err, "could not insert element");
                false
            }
        }
    }

    /// Insert all elements in iteration order. Returns whether at least one element was
    /// inserted.
    ///
    /// # Errors
    ///
    /// Stops at the first `HierarchyError`. Elements before the failing one stay inserted.
    pub fn insert_all(&mut self, values: impl IntoIterator<Item = T>) -> Result<bool, HierarchyError<T>> {
        let mut changed = false;
        for value in values {
            changed |= self.insert(value)?;
        }
        Ok(changed)
    }

    /// Nodes that become parents of `value`.
    ///
    /// Starting at the root, descend into every child whose element `value` succeeds. A
    /// visited node without such a child is an attachment point. Children are examined in
    /// storage order.
    fn attachment_points(&self, value: &T) -> Result<Vec<NodeIndex>, HierarchyError<T>> {
        let mut points = vec![];
        let mut visited = HashSet::new();
        let mut stack = vec![self.root.0];
        while let Some(current) = stack.pop() {
            let mut deeper = vec![];
            for child in self.ordered_children(current) {
                if self.succeeds(value, child)? {
                    deeper.push(child);
                }
            }
            if deeper.is_empty() {
                points.push(current);
            }
            stack.extend(deeper.into_iter().rev().filter(|child| visited.insert(*child)));
        }
        Ok(points)
    }

    /// Existing nodes that succeed `value` and have to be reachable from it.
    ///
    /// Children of the attachment points that succeed `value` are promoted: the returned
    /// `(parent, sibling)` pairs move from the attachment point to the new node. Successors
    /// that hang below an unrelated sibling are adopted: they get the new node as an
    /// additional parent. Only the topmost successors on every path are returned.
    fn successors_below(
        &self,
        value: &T,
        parents: &[NodeIndex],
    ) -> Result<(Vec<(NodeIndex, NodeIndex)>, Vec<NodeIndex>), HierarchyError<T>> {
        let mut promoted = vec![];
        let mut adopted = vec![];
        let mut visited = HashSet::new();
        let mut unrelated = vec![];
        for &parent in parents {
            for sibling in self.ordered_children(parent) {
                if self.oracle.is_successor_of(self.element(sibling), value)? {
                    visited.insert(sibling);
                    promoted.push((parent, sibling));
                } else {
                    unrelated.push(sibling);
                }
            }
        }

        // Below an unrelated node every child is either a successor of `value` or unrelated
        // as well. A successor's own subtree is already covered through it.
        while let Some(node) = unrelated.pop() {
            if !visited.insert(node) {
                continue;
            }
            for child in self.ordered_children(node) {
                if visited.contains(&child) {
                    continue;
                }
                if self.oracle.is_successor_of(self.element(child), value)? {
                    visited.insert(child);
                    adopted.push(child);
                } else {
                    unrelated.push(child);
                }
            }
        }

        // A successor reached through an unrelated node may also hang below another successor.
        let covered: HashSet<_> = promoted
            .iter()
            .map(|(_, sibling)| *sibling)
            .chain(adopted.iter().copied())
            .flat_map(|successor| self.walk(successor))
            .collect();
        adopted.retain(|successor| !covered.contains(successor));
        Ok((promoted, adopted))
    }
}
