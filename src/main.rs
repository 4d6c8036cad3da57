use anyhow::Result;
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use cooccur::cooccurrence::read_data;
use cooccur::report::{build_report, default_dot_path, export_to_graphvis, write_json, write_text};

/// Rank CSV column labels by how often they hold values on the same row.
///
/// The full graph is also written as Graphviz DOT, next to the input by default.
#[derive(Parser, Debug)]
#[command(name = "cooccur")]
#[command(version)]
#[command(about, long_about = None)]
struct Cli {
    /// CSV file whose first line holds the column labels
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Print the neighbors of this label, heaviest first and as CSV
    #[arg(value_name = "LABEL")]
    label: Option<String>,

    /// How many of the most connected labels get a neighbor listing
    #[arg(long, default_value = "10")]
    top: usize,

    /// Where to write the DOT export (default: <INPUT>.dot)
    #[arg(long, value_name = "PATH")]
    dot: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Log more to stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();

    let (labels, graph) = read_data(&cli.input)?;
    info!(
        "{} labels, {} of them co-occurring",
        labels.len(),
        graph.node_count()
    );

    let report = build_report(&labels, &graph, cli.label.as_deref(), cli.top);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.json {
        write_json(&mut out, &report)?;
    } else {
        write_text(&mut out, &report)?;
    }
    out.flush()?;

    let dot_path = cli.dot.unwrap_or_else(|| default_dot_path(&cli.input));
    export_to_graphvis(&graph, &dot_path)?;

    Ok(())
}
