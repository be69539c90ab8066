use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use petgraph::graph::{DiGraph, NodeIndex};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadRelationError {
    #[error("invalid line {line} (expected '(element)' or '(general) (specific)', got {content})")]
    InvalidLine { line: usize, content: String },
    #[error("io error")]
    IoError(#[from] std::io::Error),
}

/// Reads a relation between named elements.
///
/// Every line either names a single element or a pair `general specific`, meaning that
/// `specific` is a direct successor of `general`. Lines starting with `%` and empty lines are
/// skipped. Edges point from the general to the specific element. Nodes appear in the order
/// in which their names are first mentioned.
///
/// The relation is not checked for cycles.
pub fn read_relation<P>(path: P) -> Result<DiGraph<String, ()>, ReadRelationError>
where
    P: AsRef<Path>,
{
    let file = File::open(path)?;
    parse_relation(BufReader::new(file))
}

/// See [read_relation].
pub fn parse_relation<R: BufRead>(reader: R) -> Result<DiGraph<String, ()>, ReadRelationError> {
    let mut graph = DiGraph::new();
    let mut nodes: HashMap<String, NodeIndex> = HashMap::new();
    let mut node = |graph: &mut DiGraph<String, ()>, name: &str| -> NodeIndex {
        *nodes.entry(name.to_string()).or_insert_with(|| graph.add_node(name.to_string()))
    };

    for (line_idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.starts_with('%') {
            continue;
        }
        let tokens: Vec<_> = line.split_ascii_whitespace().collect();
        match tokens[..] {
            [] => {}
            [element] => {
                node(&mut graph, element);
            }
            [general, specific] => {
                let u = node(&mut graph, general);
                let v = node(&mut graph, specific);
                graph.update_edge(u, v, ());
            }
            _ => return Err(ReadRelationError::InvalidLine { line: line_idx + 1, content: line.clone() }),
        }
    }
    Ok(graph)
}
