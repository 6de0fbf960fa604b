//! lpgx CLI - extract labeled property graphs from serialized semantic models.

use anyhow::Context;
use clap::{Parser, Subcommand};
use indexmap::IndexMap;
use lpgx::config::LpgxConfig;
use lpgx::{extract_graph, CyJsonCodec, GraphCodec, SemanticModel, SourceModel};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lpgx")]
#[command(about = "lpgx CLI - code graph extraction and metrics", long_about = None)]
struct Cli {
    /// Path to an lpgx.toml config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a graph from a model snapshot and emit CyJSON
    Extract {
        /// Serialized model snapshot (JSON)
        model: PathBuf,

        /// Output file (stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Include symbols outside the analyzed source set
        #[arg(long)]
        include_external: bool,

        /// Skip Halstead metric calculation
        #[arg(long)]
        no_halstead: bool,
    },

    /// Extract a graph and print node/edge counts per label
    Stats {
        /// Serialized model snapshot (JSON)
        model: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli
        .config
        .as_deref()
        .map(LpgxConfig::load)
        .unwrap_or_default();

    match cli.command {
        Commands::Extract {
            model,
            output,
            include_external,
            no_halstead,
        } => {
            let model = SourceModel::load(&model)?;

            let mut options = config.extract_options();
            options.include_external |= include_external;
            options.halstead &= !no_halstead;

            let graph = extract_graph(&model, &options)?;
            let codec = CyJsonCodec::new();

            match output {
                Some(path) => {
                    codec
                        .write_to_file(&graph, &path)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!(
                        "✓ Wrote {} nodes, {} edges to {}",
                        graph.node_count(),
                        graph.edge_count(),
                        path.display()
                    );
                }
                None => {
                    let encoded = codec.encode_graph(&graph);
                    let rendered = if config.output.pretty {
                        serde_json::to_string_pretty(&encoded)?
                    } else {
                        serde_json::to_string(&encoded)?
                    };
                    println!("{rendered}");
                }
            }
        }

        Commands::Stats { model } => {
            let model = SourceModel::load(&model)?;
            let graph = extract_graph(&model, &config.extract_options())?;

            println!("Graph for {}", model.name());
            println!("─────────────────");
            println!("Nodes: {}", graph.node_count());
            let mut node_labels: IndexMap<&str, usize> = IndexMap::new();
            for node in graph.nodes() {
                for label in &node.labels {
                    *node_labels.entry(label.as_str()).or_default() += 1;
                }
            }
            for (label, count) in &node_labels {
                println!("  {label}: {count}");
            }

            println!("Edges: {}", graph.edge_count());
            let mut edge_labels: IndexMap<&str, usize> = IndexMap::new();
            for edge in graph.edges() {
                *edge_labels.entry(edge.label.as_str()).or_default() += 1;
            }
            for (label, count) in &edge_labels {
                println!("  {label}: {count}");
            }
        }
    }

    Ok(())
}
