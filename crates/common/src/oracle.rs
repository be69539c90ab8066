use std::collections::HashMap;

use partial_hierarchy::{HierarchyError, SuccessorOracle};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{depth_first_search, Control, DfsEvent};
use tracing::trace;

/// Answers successor queries by searching an explicit relation.
///
/// An element succeeds another if it can be reached from it along the edges of the relation.
/// Elements that are not part of the relation are unrelated to everything. A cycle found
/// during a search is reported as `HierarchyError`.
#[derive(Clone, Debug)]
pub struct RelationOracle {
    graph: DiGraph<String, ()>,
    index: HashMap<String, NodeIndex>,
}

impl RelationOracle {
    pub fn new(graph: DiGraph<String, ()>) -> Self {
        let index = graph.node_indices().map(|node| (graph[node].clone(), node)).collect();
        Self { graph, index }
    }

    /// Return the elements of the relation in the order of their nodes.
    pub fn elements(&self) -> impl Iterator<Item = &String> + '_ {
        self.graph.node_weights()
    }

    fn cycle(&self, predecessor: &HashMap<NodeIndex, NodeIndex>, last: NodeIndex, first: NodeIndex) -> HierarchyError<String> {
        let mut path = vec![first];
        let mut node = last;
        while node != first {
            path.push(node);
            node = predecessor[&node];
        }
        path[1..].reverse();
        path.push(first);
        let path = path.into_iter().map(|node| self.graph[node].clone()).collect();
        HierarchyError::new(path, self.graph[first].clone())
    }
}

impl SuccessorOracle<String> for RelationOracle {
    fn is_successor_of(&self, candidate: &String, reference: &String) -> Result<bool, HierarchyError<String>> {
        let (Some(&target), Some(&start)) = (self.index.get(candidate), self.index.get(reference)) else {
            return Ok(false);
        };

        let mut predecessor = HashMap::new();
        let outcome = depth_first_search(&self.graph, Some(start), |event| match event {
            DfsEvent::Discover(node, _) if node == target && node != start => Control::Break(Ok(true)),
            DfsEvent::TreeEdge(u, v) => {
                predecessor.insert(v, u);
                Control::Continue
            }
            DfsEvent::BackEdge(u, v) => Control::Break(Err((u, v))),
            _ => Control::Continue,
        });

        match outcome {
            Control::Break(Ok(found)) => Ok(found),
            Control::Break(Err((last, first))) => {
                let err = self.cycle(&predecessor, last, first);
                trace!(%err, "cycle in relation");
                Err(err)
            }
            _ => Ok(false),
        }
    }
}
