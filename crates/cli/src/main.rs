use std::collections::HashSet;
use std::error::Error;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use common::io::read_relation;
use common::RelationOracle;
use partial_hierarchy::{Forest, NodeRef};
use tracing::{info, Level};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum Order {
    Given,
    Reverse,
}

#[derive(Debug, Parser)]
struct Cli {
    /// File with one element or one `general specific` pair per line.
    #[arg(long)]
    relation: PathBuf,
    /// Elements to insert. Defaults to every element of the relation.
    #[arg(long)]
    element: Vec<String>,
    #[arg(long, value_enum, default_value = "given")]
    order: Order,
    /// Elements to remove after all insertions.
    #[arg(long)]
    remove: Vec<String>,
    /// Print children in lexicographic order instead of attachment order.
    #[arg(long)]
    sorted: bool,
    #[arg(long)]
    log_level: Option<Level>,
    #[arg(long)]
    json_log: bool,
}

fn write_forest<W: Write>(out: &mut W, forest: &Forest<String, RelationOracle>) -> std::io::Result<()> {
    let depths = forest.depths();
    let mut visited = HashSet::new();
    let mut stack: Vec<NodeRef> = forest.sorted_children(forest.root()).into_iter().rev().collect();
    while let Some(node) = stack.pop() {
        if !visited.insert(node) {
            continue;
        }
        let Some(element) = forest.payload(node) else { continue };
        let depth = depths[&node];
        let parents: Vec<_> = forest.parents(node).filter_map(|parent| forest.payload(parent)).map(String::as_str).collect();
        writeln!(out, "{}{} [depth {}] <- [{}]", "  ".repeat(depth - 1), element, depth, parents.join(", "))?;
        stack.extend(forest.sorted_children(node).into_iter().rev());
    }

    let mut leaves: Vec<_> = forest.leaves().map(String::as_str).collect();
    leaves.sort_unstable();
    writeln!(out, "leaves: {}", leaves.join(" "))?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(level) = cli.log_level {
        let builder = FmtSubscriber::builder().with_max_level(level).with_span_events(FmtSpan::CLOSE);
        if cli.json_log {
            builder.json().finish().init();
        } else {
            builder.finish().init();
        }
    };

    let oracle = RelationOracle::new(read_relation(&cli.relation)?);
    let mut elements = if cli.element.is_empty() {
        oracle.elements().cloned().collect()
    } else {
        cli.element.clone()
    };
    if cli.order == Order::Reverse {
        elements.reverse();
    }

    let forest = Forest::<String, _>::new(oracle);
    let mut forest = if cli.sorted { forest.with_comparator(|a: &String, b: &String| a.cmp(b)) } else { forest };
    let requested = elements.len();
    let inserted = elements.into_iter().filter(|element| forest.insert_tolerant(element.clone())).count();
    info!(requested, inserted, "built forest");

    for element in &cli.remove {
        if !forest.remove(element)? {
            info!(%element, "not contained");
        }
    }

    let mut out = BufWriter::new(stdout().lock());
    write_forest(&mut out, &forest)?;
    out.flush()?;
    Ok(())
}
