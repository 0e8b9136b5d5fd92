//! Runs the reference benchmark and prints the report.
//!
//! Run with:
//! ```bash
//! cargo run --release --features cli -- --format table
//! ```
//!
//! Logs go to stderr; set `RUST_LOG=contesa=info` to follow progress.

use clap::{Parser, ValueEnum};
use contesa::benchmark::{Benchmark, BenchmarkConfig};
use contesa::report::json::JsonRenderer;
use contesa::report::table::{TableRenderer, TableStyle};
use tracing_subscriber::EnvFilter;

/// Output format for the report.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// One line per measurement
    #[default]
    Plain,
    /// Pretty ASCII tables
    Table,
    /// JSON snapshot
    Json,
}

/// Table style selection.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum StyleChoice {
    Ascii,
    #[default]
    Rounded,
    Sharp,
    Modern,
    Markdown,
    Blank,
}

impl From<StyleChoice> for TableStyle {
    fn from(choice: StyleChoice) -> Self {
        match choice {
            StyleChoice::Ascii => TableStyle::Ascii,
            StyleChoice::Rounded => TableStyle::Rounded,
            StyleChoice::Sharp => TableStyle::Sharp,
            StyleChoice::Modern => TableStyle::Modern,
            StyleChoice::Markdown => TableStyle::Markdown,
            StyleChoice::Blank => TableStyle::Blank,
        }
    }
}

/// Benchmarks shared-counter and parallel-sum strategies.
///
/// Runs five reduction strategies over one million random integers, then
/// drives four counter strategies through 100 rounds of 1000 concurrent
/// actors, once on raw threads and once on a bounded worker pool.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    format: OutputFormat,

    /// Table style (for table format)
    #[arg(short, long, value_enum, default_value = "rounded")]
    style: StyleChoice,

    /// Pretty print JSON output
    #[arg(long)]
    pretty: bool,

    /// Include timestamp in JSON output
    #[arg(long)]
    timestamp: bool,

    /// Seed the input generator for a reproducible collection
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> contesa::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = BenchmarkConfig::new();
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let report = Benchmark::new(config).run();
    if !report.is_consistent() {
        tracing::warn!("report contains failed or inconsistent results");
    }

    match args.format {
        OutputFormat::Plain => print!("{}", report),
        OutputFormat::Table => {
            let renderer = TableRenderer::new().with_style(args.style.into());
            println!("{}", renderer.render(&report));
        }
        OutputFormat::Json => {
            let json = JsonRenderer::new()
                .pretty(args.pretty)
                .include_timestamp(args.timestamp)
                .to_json(&report)?;
            println!("{}", json);
        }
    }

    Ok(())
}
