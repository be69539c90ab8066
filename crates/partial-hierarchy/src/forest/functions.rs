use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use petgraph::stable_graph::NodeIndex;
use petgraph::{Incoming, Outgoing};

use crate::forest::{Forest, NodeRef};
use crate::oracle::{HierarchyError, SuccessorOracle};

impl<T: PartialEq, O: SuccessorOracle<T>> Forest<T, O> {
    /// Find the node of an element.
    ///
    /// The search only enters the subtree of a node if `value` is a successor of the node's
    /// element, so unrelated parts of the forest are skipped.
    ///
    /// # Errors
    ///
    /// Returns the oracle's `HierarchyError`.
    pub fn find(&self, value: &T) -> Result<Option<NodeRef>, HierarchyError<T>> {
        let mut visited = HashSet::new();
        let mut stack = vec![self.root.0];
        while let Some(node) = stack.pop() {
            let mut deeper = vec![];
            for child in self.ordered_children(node) {
                if self.element(child) == value {
                    return Ok(Some(NodeRef(child)));
                }
                if visited.insert(child) && self.succeeds(value, child)? {
                    deeper.push(child);
                }
            }
            stack.extend(deeper.into_iter().rev());
        }
        Ok(None)
    }

    /// Returns whether the forest contains an element.
    ///
    /// # Errors
    ///
    /// Returns the oracle's `HierarchyError`.
    pub fn contains(&self, value: &T) -> Result<bool, HierarchyError<T>> {
        Ok(self.find(value)?.is_some())
    }
}

impl<T, O> Forest<T, O> {
    /// Return the elements in depth-first pre-order. Children are visited in storage order
    /// and every element appears once, at its first visit.
    pub fn dfs_order(&self) -> Vec<&T> {
        self.walk(self.root.0).into_iter().map(|node| self.element(node)).collect()
    }

    /// Return all nodes below `node` in depth-first pre-order, each once. `node` itself is
    /// not included.
    pub fn descendants(&self, node: NodeRef) -> Vec<NodeRef> {
        self.walk(node.0).into_iter().map(NodeRef).collect()
    }

    /// Return an iterator over the elements of nodes without children.
    pub fn leaves(&self) -> impl Iterator<Item = &T> + '_ {
        self.tree
            .node_indices()
            .filter(move |node| *node != self.root.0)
            .filter(move |node| self.tree.neighbors_directed(*node, Outgoing).next().is_none())
            .map(move |node| self.element(node))
    }

    /// Return an iterator for the children of the root in storage order.
    pub fn root_level_nodes(&self) -> impl Iterator<Item = NodeRef> + '_ {
        self.children(self.root)
    }

    /// Return the children of the root sorted by the comparator of the forest, or in storage
    /// order if it has none.
    pub fn root_level_nodes_sorted(&self) -> Vec<NodeRef> {
        self.sorted_children(self.root)
    }

    /// Return the children of the root sorted by `compare`.
    pub fn root_level_nodes_sorted_by<F>(&self, mut compare: F) -> Vec<NodeRef>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut nodes: Vec<_> = self.root_level_nodes().collect();
        nodes.sort_by(|a, b| compare(self.element(a.0), self.element(b.0)));
        nodes
    }

    /// Return the length of the longest path from `node` up to the root. The root has depth
    /// 0 and its children have depth 1.
    ///
    /// ```rust
    /// use partial_hierarchy::{Forest, Total};
    ///
    /// let mut forest = Forest::<u32, _>::new(Total(|a: &u32, b: &u32| a != b && a % b == 0));
    /// forest.insert_all([2, 3, 4, 12]).unwrap();
    ///
    /// // 12 hangs below 3 and below 4, the longer way is 12 -> 4 -> 2 -> root
    /// let twelve = forest.find(&12).unwrap().unwrap();
    /// assert_eq!(forest.parents(twelve).count(), 2);
    /// assert_eq!(forest.max_depth(twelve), 3);
    /// assert_eq!(forest.max_depth(forest.root()), 0);
    /// ```
    pub fn max_depth(&self, node: NodeRef) -> usize {
        let mut depths = HashMap::new();
        self.fill_depths(node.0, &mut depths)
    }

    /// Return the maximal depth of every node except the root. See [Forest::max_depth].
    pub fn depths(&self) -> HashMap<NodeRef, usize> {
        let mut depths = HashMap::new();
        for node in self.tree.node_indices() {
            self.fill_depths(node, &mut depths);
        }
        depths.remove(&self.root.0);
        depths.into_iter().map(|(node, depth)| (NodeRef(node), depth)).collect()
    }

    /// Computes the depth of `node` and all of its ancestors in post-order, reusing the
    /// depths that are already known.
    fn fill_depths(&self, node: NodeIndex, depths: &mut HashMap<NodeIndex, usize>) -> usize {
        let mut stack = vec![(node, false)];
        while let Some((current, expanded)) = stack.pop() {
            if depths.contains_key(&current) {
                continue;
            }
            if expanded {
                let depth = self
                    .tree
                    .neighbors_directed(current, Incoming)
                    .map(|parent| depths[&parent] + 1)
                    .max()
                    .unwrap_or(0);
                depths.insert(current, depth);
            } else {
                stack.push((current, true));
                let parents = self.tree.neighbors_directed(current, Incoming);
                stack.extend(parents.filter(|parent| !depths.contains_key(parent)).map(|parent| (parent, false)));
            }
        }
        depths[&node]
    }

    /// Pre-order walk below `start`, excluding `start`.
    pub(crate) fn walk(&self, start: NodeIndex) -> Vec<NodeIndex> {
        let mut order = vec![];
        let mut visited = HashSet::new();
        let mut stack = self.ordered_children(start);
        stack.reverse();
        while let Some(node) = stack.pop() {
            if !visited.insert(node) {
                continue;
            }
            order.push(node);
            stack.extend(self.ordered_children(node).into_iter().rev().filter(|child| !visited.contains(child)));
        }
        order
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use crate::tests::{assert_consistent, divisibility, divisibility_forest, payloads};
    use crate::Forest;

    #[test]
    fn find_skips_unrelated_subtrees() {
        use std::cell::Cell;

        let calls = Cell::new(0);
        let oracle = |a: &u32, b: &u32| -> Result<bool, crate::HierarchyError<u32>> {
            calls.set(calls.get() + 1);
            Ok(a != b && a % b == 0)
        };
        let mut forest = Forest::<u32, _>::new(oracle);
        forest.insert_all([2, 4, 8, 16, 3]).unwrap();

        calls.set(0);
        assert!(forest.find(&9).unwrap().is_none());
        // the chain below 2 is never entered and 3 has no children
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn find_below_several_parents() {
        let forest = divisibility_forest([2, 3, 6, 12]);
        let twelve = forest.find(&12).unwrap().unwrap();
        assert_eq!(forest.payload(twelve), Some(&12));
        assert_eq!(forest.contains(&12), Ok(true));
        assert_eq!(forest.contains(&24), Ok(false));
    }

    #[test]
    fn dfs_order_visits_shared_children_once() {
        let forest = divisibility_forest([2, 3, 6, 5]);
        assert_eq!(forest.dfs_order(), [&2, &6, &3, &5]);
    }

    #[test]
    fn dfs_order_is_restartable() {
        let forest = divisibility_forest([12, 2, 3, 9, 4, 6]);
        assert_eq!(forest.dfs_order(), forest.dfs_order());
    }

    #[test]
    fn root_is_never_content() {
        let empty = Forest::<u32, _>::new(divisibility());
        assert_eq!(empty.leaves().count(), 0);
        assert!(empty.dfs_order().is_empty());

        let forest = divisibility_forest([2, 4, 3]);
        let root = forest.root();
        assert!(!forest.nodes().any(|node| node == root));
        assert_eq!(forest.nodes().count(), 3);
        assert_eq!(forest.contents().count(), 3);
        assert_eq!(forest.dfs_order().len(), 3);
        assert!(!forest.depths().contains_key(&root));
    }

    #[test]
    fn leaves_include_root_level_nodes() {
        let forest = divisibility_forest([2, 4, 3, 8, 5]);
        let leaves: HashSet<_> = forest.leaves().copied().collect();
        assert_eq!(leaves, HashSet::from([8, 3, 5]));
    }

    #[test]
    fn depth_uses_longest_path() {
        let forest = divisibility_forest([2, 4, 8, 3, 24]);
        let depths = forest.depths();
        let depth_of = |value: u32| depths[&forest.find(&value).unwrap().unwrap()];
        assert_eq!(depth_of(2), 1);
        assert_eq!(depth_of(3), 1);
        assert_eq!(depth_of(4), 2);
        assert_eq!(depth_of(8), 3);
        assert_eq!(depth_of(24), 4);
        assert_eq!(forest.max_depth(forest.find(&24).unwrap().unwrap()), 4);
    }

    #[test]
    fn depth_of_long_chain() {
        let values: Vec<u32> = (0..24).map(|i| 1 << i).collect();
        let forest = divisibility_forest(values.iter().rev().copied());
        assert_consistent(&forest);
        let last = forest.find(&(1 << 23)).unwrap().unwrap();
        assert_eq!(forest.max_depth(last), 24);
    }

    #[test]
    fn descendants_of_a_node() {
        let forest = divisibility_forest([2, 4, 6, 12, 3]);
        let two = forest.find(&2).unwrap().unwrap();
        assert_eq!(payloads(&forest, forest.descendants(two).into_iter()), [4, 12, 6]);
        let three = forest.find(&3).unwrap().unwrap();
        assert_eq!(payloads(&forest, forest.descendants(three).into_iter()), [6, 12]);
    }

    #[test]
    fn root_level_views() {
        let forest = divisibility_forest([7, 2, 5, 3]).with_comparator(|a: &u32, b: &u32| a.cmp(b));
        assert_eq!(payloads(&forest, forest.root_level_nodes()), [7, 2, 5, 3]);
        assert_eq!(payloads(&forest, forest.root_level_nodes_sorted().into_iter()), [2, 3, 5, 7]);
        assert_eq!(payloads(&forest, forest.root_level_nodes_sorted_by(|a, b| b.cmp(a)).into_iter()), [7, 5, 3, 2]);
        assert_eq!(payloads(&forest, forest.root_level_nodes()), [7, 2, 5, 3]);
    }
}
