use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use mtxcut::{default_output_name, read_edge_list, EdgeListStats, ExtractConfig, ThresholdEdgeExtractor};

#[derive(Parser, Debug)]
#[command(name = "mtxcut")]
#[command(version)]
#[command(about = "Threshold a similarity matrix CSV into a sparse edge list")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Keep lower-triangle pairs with cutoff < value < upper and write them as an edge list
    Extract(ExtractArgs),
    /// Summarise an existing edge list
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// Similarity matrix CSV
    input: PathBuf,
    /// Output edge list; defaults to over<cutoff>.mtx
    #[arg(short, long)]
    output: Option<PathBuf>,
    #[arg(long, env = "MTXCUT_CUTOFF")]
    cutoff: Option<f64>,
    #[arg(long, env = "MTXCUT_UPPER")]
    upper: Option<f64>,
    #[arg(long)]
    delimiter: Option<char>,
    /// Rows between progress events
    #[arg(long)]
    progress_every: Option<usize>,
    /// JSON file with ExtractConfig fields; flags override it
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct InspectArgs {
    mtx: PathBuf,
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Extract(args) => run_extract(args),
        Command::Inspect(args) => run_inspect(args),
    }
}

fn resolve_config(args: &ExtractArgs) -> anyhow::Result<ExtractConfig> {
    let mut cfg = match &args.config {
        Some(path) => ExtractConfig::from_json_file(path)?,
        None => ExtractConfig::default(),
    };
    if let Some(v) = args.cutoff {
        cfg.cutoff = v;
    }
    if let Some(v) = args.upper {
        cfg.upper = v;
    }
    if let Some(v) = args.delimiter {
        cfg.delimiter = v;
    }
    if let Some(v) = args.progress_every {
        cfg.progress_interval = v;
    }
    Ok(cfg)
}

fn run_extract(args: ExtractArgs) -> anyhow::Result<()> {
    let cfg = resolve_config(&args)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(default_output_name(cfg.cutoff)));

    let extractor = ThresholdEdgeExtractor::new(cfg)?;
    let summary = extractor
        .run(&args.input, &output)
        .with_context(|| format!("extract {:?} -> {:?} failed", args.input, output))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("done with {} edges", summary.edges);
    }
    Ok(())
}

fn run_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let list = read_edge_list(&args.mtx).with_context(|| format!("inspect {:?} failed", args.mtx))?;
    let stats = EdgeListStats::from_edge_list(&list);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!(
            "dimension={} edges={} self_pairs={} connected_nodes={} max_degree={}",
            stats.dimension, stats.edges, stats.self_pairs, stats.connected_nodes, stats.max_degree
        );
    }
    Ok(())
}
