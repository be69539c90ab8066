use std::collections::HashSet;
use std::fmt::Debug;

use crate::{Forest, HierarchyError, NodeRef, SuccessorOracle, Total};

pub(crate) type Divisibility = Total<fn(&u32, &u32) -> bool>;

/// `a` succeeds `b` if `b` is a proper divisor of `a`.
pub(crate) fn divisibility() -> Divisibility {
    let divides: fn(&u32, &u32) -> bool = |a, b| a != b && a % b == 0;
    Total(divides)
}

pub(crate) fn divisibility_forest(values: impl IntoIterator<Item = u32>) -> Forest<u32, Divisibility> {
    let mut forest = Forest::new(divisibility());
    for value in values {
        assert_eq!(forest.insert(value), Ok(true));
    }
    forest
}

/// Divisibility, except that every query involving `element` reports a cycle through it.
pub(crate) fn cyclic_on(element: u32) -> impl Fn(&u32, &u32) -> Result<bool, HierarchyError<u32>> + Clone {
    move |a, b| {
        if *a == element || *b == element {
            Err(HierarchyError::new(vec![element, element], element))
        } else {
            Ok(a != b && a % b == 0)
        }
    }
}

pub(crate) fn payloads<O>(forest: &Forest<u32, O>, nodes: impl Iterator<Item = NodeRef>) -> Vec<u32> {
    nodes.map(|node| *forest.payload(node).expect("non-root node")).collect()
}

/// Checks the structural invariants of a forest against its oracle.
pub(crate) fn assert_consistent<T, O>(forest: &Forest<T, O>)
where
    T: PartialEq + Debug,
    O: SuccessorOracle<T>,
{
    let root = forest.root();
    assert_eq!(forest.payload(root), None);
    assert_eq!(forest.parents(root).count(), 0);

    let nodes: Vec<_> = forest.nodes().collect();
    for &node in &nodes {
        let element = forest.payload(node).expect("non-root nodes carry an element");
        assert_ne!(forest.parents(node).count(), 0, "{element:?} is detached");

        for parent in forest.parents(node) {
            assert!(forest.children(parent).any(|child| child == node));
            if let Some(parent) = forest.payload(parent) {
                assert_eq!(forest.oracle().is_successor_of(element, parent), Ok(true), "{element:?} below {parent:?}");
            }
        }
        for child in forest.children(node) {
            assert!(forest.parents(child).any(|parent| parent == node));
        }

        let below: HashSet<_> = forest.descendants(node).into_iter().collect();
        assert!(!below.contains(&node), "{element:?} is on a cycle");
        for &other in &nodes {
            let other_element = forest.payload(other).expect("non-root nodes carry an element");
            if other != node {
                assert_ne!(element, other_element);
            }
            if forest.oracle().is_successor_of(other_element, element) == Ok(true) {
                assert!(below.contains(&other), "{other_element:?} is not reachable from {element:?}");
            }
        }
    }
}
