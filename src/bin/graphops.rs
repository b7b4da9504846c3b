/*
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */
//! CLI front-end over the core graph engine. Parses a subcommand,
//! loads a graph from `-i`, calls the corresponding core operation,
//! and writes the result to `-o`. The core itself never prints; this
//! binary is the only thing in the crate that does.

use clap::{Parser, Subcommand};
use lib_graphops::graphops::dot::{write_graph, DotOptions};
use lib_graphops::graphops::json::{load_file, save_file};
use lib_graphops::graphops::rewrites::{
    filter_exclude, filter_include, prune_edge, prune_edges_into, prune_edges_out, prune_node,
    purify_classic, purify_scc,
};
use lib_graphops::graphops::{GraphAnalyzer, PropertyClassifier, Scc};
use lib_graphops::GraphResult;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "graphops", version, about = "Analyze .NET assembly/type dependency graphs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List node keys carrying any of the given tags.
    Tags {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(required = true, num_args = 1..)]
        tags: Vec<String>,
        #[arg(long)]
        tag_key: Option<String>,
    },
    /// Compute strongly-connected components and write the quotient graph.
    Scc {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        #[arg(long, default_value = "SCC-")]
        prefix: String,
    },
    /// Report cycles found while computing the reach closure.
    Cycles {
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Transitive-reduction-like pruning.
    Purify {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        #[arg(long)]
        scc: bool,
        #[arg(long)]
        collect_cycles: bool,
    },
    /// Keep or drop nodes carrying any of the given tags.
    Filter {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        #[arg(required = true, num_args = 1..)]
        tags: Vec<String>,
        #[arg(long)]
        tag_key: Option<String>,
        #[arg(long)]
        exclude: bool,
    },
    /// Remove an edge, a node, or all edges into/out of a node.
    Prune {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        #[arg(long)]
        node: Option<String>,
        #[arg(long)]
        edge_source: Option<String>,
        #[arg(long)]
        edge_target: Option<String>,
        #[arg(long)]
        edges_into: Option<String>,
        #[arg(long)]
        edges_out: Option<String>,
    },
    /// Emit GraphViz DOT.
    Dot {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        #[arg(long)]
        undirected: bool,
        #[arg(long)]
        horizontal: bool,
    },
    /// Build the quotient graph over a classifying node property.
    Supergraph {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        #[arg(long)]
        property: String,
        #[arg(long)]
        add_nodes: bool,
    },
    /// Dump node keys as CSV.
    Csv {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

fn run(cli: Cli) -> GraphResult<()> {
    match cli.command {
        Command::Tags { input, tags, tag_key } => {
            let graph = load_file(&input)?;
            let tag_refs: Vec<&str> = tags.iter().map(String::as_str).collect();
            let keys = graph.find_tagged_node_keys(&tag_refs, tag_key.as_deref());
            info!(count = keys.len(), tags = %tags.join(","), "matched nodes");
            for key in keys {
                println!("{}", key);
            }
        }
        Command::Scc { input, output, prefix } => {
            let graph = load_file(&input)?;
            let analyzer = GraphAnalyzer::snapshot(&graph);
            let scc = Scc::compute(&analyzer, Some(prefix.as_str()));
            debug!(components = scc.component_count(), "computed scc");
            let component_graph = scc.component_graph(&graph)?;
            save_file(&output, &component_graph)?;
        }
        Command::Cycles { input } => {
            let graph = load_file(&input)?;
            let analyzer = GraphAnalyzer::snapshot(&graph);
            let mut cycle_edges = lib_graphops::KeySetMap::new();
            analyzer.get_reach_map_with_cycle_sink(&mut cycle_edges);
            debug!(cuts = cycle_edges.pair_count(), "cycle detected and cut");
            for (source, targets) in cycle_edges.iter() {
                for target in targets.iter() {
                    println!("{} -> {}", source, target);
                }
            }
        }
        Command::Purify { input, output, scc, collect_cycles } => {
            let mut graph = load_file(&input)?;
            if scc {
                purify_scc(&mut graph)?;
            } else {
                purify_classic(&mut graph, collect_cycles)?;
            }
            debug!(nodes = graph.node_count(), edges = graph.edge_count(), "purified");
            save_file(&output, &graph)?;
        }
        Command::Filter { input, output, tags, tag_key, exclude } => {
            let mut graph = load_file(&input)?;
            let tag_refs: Vec<&str> = tags.iter().map(String::as_str).collect();
            if exclude {
                filter_exclude(&mut graph, &tag_refs, tag_key.as_deref());
            } else {
                filter_include(&mut graph, &tag_refs, tag_key.as_deref());
            }
            save_file(&output, &graph)?;
        }
        Command::Prune { input, output, node, edge_source, edge_target, edges_into, edges_out } => {
            let mut graph = load_file(&input)?;
            if let Some(key) = node {
                prune_node(&mut graph, &key);
            }
            if let (Some(source), Some(target)) = (edge_source, edge_target) {
                prune_edge(&mut graph, &source, &target);
            }
            if let Some(target) = edges_into {
                prune_edges_into(&mut graph, &target);
            }
            if let Some(source) = edges_out {
                prune_edges_out(&mut graph, &source);
            }
            save_file(&output, &graph)?;
        }
        Command::Dot { input, output, undirected, horizontal } => {
            let graph = load_file(&input)?;
            let options = DotOptions {
                directed: !undirected,
                horizontal,
                graph_id: None,
            };
            let text = write_graph(&graph, &options);
            std::fs::write(&output, text)?;
        }
        Command::Supergraph { input, output, property, add_nodes } => {
            let graph = load_file(&input)?;
            let classifier = PropertyClassifier::new(&graph, &property);
            let sg = lib_graphops::super_graph(&graph, &classifier, add_nodes)?;
            save_file(&output, &sg)?;
        }
        Command::Csv { input, output } => {
            let graph = load_file(&input)?;
            let mut text = String::from("key\n");
            for key in graph.keys() {
                text.push_str(key);
                text.push('\n');
            }
            std::fs::write(&output, text)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
