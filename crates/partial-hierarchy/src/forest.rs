use std::cmp::Ordering;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::{Incoming, Outgoing};
use tracing::trace;

use crate::oracle::{HierarchyError, SuccessorOracle};

mod functions;
mod insert;
mod remove;

/// Display ordering for elements. Only used for sorted views, never by the structural
/// algorithms.
pub type Comparator<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// A forest over the elements of a partial hierarchy.
///
/// The forest keeps every contained element in exactly one node. A node is reachable from
/// the node of another element exactly if the [SuccessorOracle] reports it as a successor
/// of that element. Nodes may have more than one parent, so the structure is a DAG below a
/// sentinel root node that carries no element.
///
/// ```rust
/// # use std::error::Error;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// use partial_hierarchy::{Forest, Total};
///
/// // an element succeeds every element that divides it
/// let mut forest = Forest::<u32, _>::new(Total(|a: &u32, b: &u32| a != b && a % b == 0));
/// forest.insert_all([4, 8, 3, 2])?;
///
/// assert_eq!(forest.dfs_order(), [&3, &2, &4, &8]);
///
/// let eight = forest.find(&8)?.unwrap();
/// assert_eq!(forest.max_depth(eight), 3);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Forest<T, O> {
    tree: StableDiGraph<Option<T>, ()>,
    root: NodeRef,
    oracle: O,
    comparator: Option<Comparator<T>>,
}

/// Node identifier.
///
/// A handle stays valid until its node is removed. Handles of removed nodes may be reused
/// by later insertions.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeRef(pub(crate) NodeIndex);

impl Debug for NodeRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("NodeRef").field(&self.0.index()).finish()
    }
}

impl NodeRef {
    /// Returns the index as `usize`.
    pub fn index(&self) -> usize {
        self.0.index()
    }
}

impl<T, O> Forest<T, O> {
    /// Create an empty forest that orders its elements with `oracle`.
    pub fn new(oracle: O) -> Self {
        let mut tree = StableDiGraph::new();
        let root = NodeRef(tree.add_node(None));
        Self { tree, root, oracle, comparator: None }
    }

    /// Use `comparator` for the sorted views of this forest.
    pub fn with_comparator(mut self, comparator: impl Fn(&T, &T) -> Ordering + Send + Sync + 'static) -> Self {
        self.comparator = Some(Arc::new(comparator));
        self
    }

    /// Replace the comparator used for sorted views. `None` falls back to storage order.
    pub fn set_comparator(&mut self, comparator: Option<Comparator<T>>) {
        self.comparator = comparator;
    }

    /// Returns the oracle of this forest.
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Return the sentinel root. It has no element and is only a starting point for
    /// traversals.
    #[inline(always)]
    pub fn root(&self) -> NodeRef {
        self.root
    }

    /// Returns whether `node` is the sentinel root.
    #[inline(always)]
    pub fn is_root(&self, node: NodeRef) -> bool {
        node == self.root
    }

    /// Return the number of contained elements.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.tree.node_count() - 1
    }

    /// Returns whether the forest contains no elements.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Access the element of a node.
    ///
    /// If the node does not exist or is the root, return None.
    pub fn payload(&self, node: NodeRef) -> Option<&T> {
        self.tree.node_weight(node.0).and_then(Option::as_ref)
    }

    /// Return an iterator for the parents of a node. Nodes directly below the root have the
    /// root as their only parent.
    pub fn parents(&self, node: NodeRef) -> impl Iterator<Item = NodeRef> + '_ {
        self.tree.neighbors_directed(node.0, Incoming).map(NodeRef)
    }

    /// Return an iterator for the children of a node in storage order, which is the order
    /// in which they were attached.
    pub fn children(&self, node: NodeRef) -> impl Iterator<Item = NodeRef> + '_ {
        self.ordered_children(node.0).into_iter().map(NodeRef)
    }

    /// Return the children of a node sorted by the comparator, or in storage order if the
    /// forest has no comparator.
    pub fn sorted_children(&self, node: NodeRef) -> Vec<NodeRef> {
        let mut children: Vec<_> = self.children(node).collect();
        if let Some(comparator) = &self.comparator {
            children.sort_by(|a, b| comparator(self.element(a.0), self.element(b.0)));
        }
        children
    }

    /// Return an iterator over all nodes except the root.
    pub fn nodes(&self) -> impl Iterator<Item = NodeRef> + '_ {
        self.tree.node_indices().filter(move |node| *node != self.root.0).map(NodeRef)
    }

    /// Return an iterator over all contained elements.
    pub fn contents(&self) -> impl Iterator<Item = &T> + '_ {
        self.tree.node_indices().filter_map(move |node| self.tree[node].as_ref())
    }

    /// Returns a structurally independent copy of this forest.
    ///
    /// Node handles of `self` refer to the same elements in the copy. Elements are cloned,
    /// so shared handles such as `Arc<_>` keep pointing at the same values.
    pub fn copy_with_sub_tree(&self) -> Self
    where
        T: Clone,
        O: Clone,
    {
        self.clone()
    }

    /// Convert to [StableDiGraph].
    ///
    /// This allows the use of [petgraph] algorithms. Edges point from parents to children,
    /// the root is the only node with weight `None`.
    pub fn into_digraph(self) -> StableDiGraph<Option<T>, ()> {
        self.tree
    }

    /// The element of a non-root node.
    pub(crate) fn element(&self, node: NodeIndex) -> &T {
        self.tree[node].as_ref().expect("only the root has no element")
    }

    /// Children in storage order.
    ///
    /// petgraph prepends new edges to the adjacency list of a node, so the neighbor iterator
    /// yields the most recently attached child first.
    pub(crate) fn ordered_children(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut children: Vec<_> = self.tree.neighbors_directed(node, Outgoing).collect();
        children.reverse();
        children
    }

    /// Adds the edge `parent -> child` unless it already exists.
    pub(crate) fn attach(&mut self, parent: NodeIndex, child: NodeIndex) {
        if self.tree.find_edge(parent, child).is_none() {
            self.tree.add_edge(parent, child, ());
        }
    }

    /// Removes the edge `parent -> child` if it exists.
    pub(crate) fn detach(&mut self, parent: NodeIndex, child: NodeIndex) {
        if let Some(edge) = self.tree.find_edge(parent, child) {
            self.tree.remove_edge(edge);
        }
    }
}

impl<T, O: SuccessorOracle<T>> Forest<T, O> {
    /// Asks the oracle whether `candidate` is a successor of the element of `reference`.
    /// Every element is a successor of the root.
    pub(crate) fn succeeds(&self, candidate: &T, reference: NodeIndex) -> Result<bool, HierarchyError<T>> {
        match &self.tree[reference] {
            None => Ok(true),
            Some(element) => {
                let answer = self.oracle.is_successor_of(candidate, element)?;
                trace!(reference = reference.index(), answer);
                Ok(answer)
            }
        }
    }
}

impl<T: Debug, O> Debug for Forest<T, O> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Forest")
            .field("len", &self.len())
            .field("dfs_order", &self.dfs_order())
            .field("sorted", &self.comparator.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod test {
    use petgraph::Outgoing;

    use crate::tests::{divisibility, divisibility_forest};
    use crate::{Forest, NodeRef};

    #[test]
    fn empty_forest() {
        let forest = Forest::<u32, _>::new(divisibility());
        assert!(forest.is_empty());
        assert_eq!(forest.len(), 0);
        assert_eq!(forest.nodes().count(), 0);
        assert_eq!(forest.contents().count(), 0);
        assert_eq!(forest.payload(forest.root()), None);
        assert!(forest.is_root(forest.root()));
        assert_eq!(forest.parents(forest.root()).count(), 0);
    }

    #[test]
    fn children_keep_attachment_order() {
        let forest = divisibility_forest([5, 3, 7, 2]);
        let children: Vec<_> = forest.children(forest.root()).map(|c| *forest.payload(c).unwrap()).collect();
        assert_eq!(children, [5, 3, 7, 2]);
    }

    #[test]
    fn sorted_children_do_not_change_storage_order() {
        let forest = divisibility_forest([5, 3, 7, 2]).with_comparator(|a: &u32, b: &u32| a.cmp(b));
        let sorted: Vec<_> =
            forest.sorted_children(forest.root()).into_iter().map(|c| *forest.payload(c).unwrap()).collect();
        assert_eq!(sorted, [2, 3, 5, 7]);
        let children: Vec<_> = forest.children(forest.root()).map(|c| *forest.payload(c).unwrap()).collect();
        assert_eq!(children, [5, 3, 7, 2]);
    }

    #[test]
    fn sorted_children_without_comparator() {
        let mut forest = divisibility_forest([9, 3, 1]).with_comparator(|a: &u32, b: &u32| b.cmp(a));
        forest.set_comparator(None);
        let one = forest.find(&1).unwrap().unwrap();
        let sorted: Vec<_> = forest.sorted_children(one).into_iter().map(|c| *forest.payload(c).unwrap()).collect();
        assert_eq!(sorted, [3]);
    }

    #[test]
    fn copy_is_independent() {
        let forest = divisibility_forest([2, 4, 8]);
        let mut copy = forest.copy_with_sub_tree();
        assert_eq!(copy.dfs_order(), forest.dfs_order());

        let four = forest.find(&4).unwrap().unwrap();
        assert_eq!(copy.payload(four), Some(&4));

        assert_eq!(copy.remove(&4), Ok(true));
        assert_eq!(copy.dfs_order(), [&2, &8]);
        assert_eq!(forest.dfs_order(), [&2, &4, &8]);
    }

    #[test]
    fn forest_and_digraph_are_equivalent() {
        let forest = divisibility_forest([2, 3, 6]);
        let root = forest.root();
        let digraph = forest.into_digraph();
        assert_eq!(digraph.node_weight(root.0), Some(&None));
        assert_eq!(digraph.neighbors_directed(root.0, Outgoing).count(), 2);
        assert_eq!(digraph.node_count(), 4);
        assert_eq!(digraph.edge_count(), 4);
    }

    #[test]
    fn node_ref_fmt() {
        let node = NodeRef(petgraph::stable_graph::NodeIndex::new(42));
        assert_eq!(format!("{:?}", node), "NodeRef(42)".to_string());
        assert_eq!(node.index(), 42);
    }

    #[test]
    fn forest_fmt() {
        let forest = divisibility_forest([2, 4]);
        assert_eq!(format!("{:?}", forest), "Forest { len: 2, dfs_order: [2, 4], sorted: false, .. }".to_string());
    }
}
