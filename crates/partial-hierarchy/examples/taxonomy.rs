use std::collections::HashMap;
use std::error::Error;

use partial_hierarchy::{Forest, HierarchyError, SuccessorOracle};
use petgraph::dot::Config::EdgeNoLabel;
use petgraph::dot::Dot;

/// Concepts with their direct generalizations.
struct Taxonomy(HashMap<&'static str, Vec<&'static str>>);

impl Taxonomy {
    fn from_is_a(pairs: impl IntoIterator<Item = (&'static str, &'static str)>) -> Self {
        let mut map: HashMap<_, Vec<_>> = HashMap::new();
        for (concept, general) in pairs {
            map.entry(concept).or_default().push(general);
        }
        Self(map)
    }
}

impl SuccessorOracle<&'static str> for Taxonomy {
    fn is_successor_of(
        &self,
        candidate: &&'static str,
        reference: &&'static str,
    ) -> Result<bool, HierarchyError<&'static str>> {
        let mut stack = vec![*candidate];
        let mut seen = vec![];
        while let Some(concept) = stack.pop() {
            for general in self.0.get(concept).into_iter().flatten() {
                if general == reference {
                    return Ok(true);
                }
                if general == candidate {
                    return Err(HierarchyError::new(vec![*candidate, concept, *general], *general));
                }
                if !seen.contains(general) {
                    seen.push(*general);
                    stack.push(*general);
                }
            }
        }
        Ok(false)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let taxonomy = Taxonomy::from_is_a([
        ("pet", "animal"),
        ("mammal", "animal"),
        ("dog", "mammal"),
        ("dog", "pet"),
        ("cat", "mammal"),
        ("cat", "pet"),
        ("goldfish", "pet"),
    ]);

    let mut forest = Forest::new(taxonomy).with_comparator(|a: &&str, b: &&str| a.cmp(b));
    for concept in ["dog", "goldfish", "cat", "pet", "mammal", "animal"] {
        forest.insert_tolerant(concept);
    }

    for node in forest.root_level_nodes_sorted() {
        println!("root level: {:?}", forest.payload(node));
    }
    let dog = forest.find(&"dog")?.ok_or("dog is missing")?;
    let parents: Vec<_> = forest.parents(dog).filter_map(|parent| forest.payload(parent)).collect();
    println!("dog is a {:?} at depth {}", parents, forest.max_depth(dog));

    let tree = forest.into_digraph();
    println!("{:?}", Dot::with_config(&tree, &[EdgeNoLabel]));
    Ok(())
}
