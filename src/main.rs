use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use std::path::PathBuf;

use compute_sales::Report;

/// Computes the total cost of a sales record using a product price catalogue.
///
/// Rows with unknown products or bad quantities are skipped with a warning.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Price catalogue: a JSON list of `{"title", "price"}` objects, or CSV
    catalogue: PathBuf,
    /// Sales record: a JSON list of `{"Product", "Quantity"}` objects, or CSV
    sales: PathBuf,
    /// Append the report to this file
    #[arg(short = 'o', long, default_value = "SalesResults.txt")]
    results: PathBuf,
    /// Don't write a results file
    #[arg(long)]
    no_results: bool,
    /// Sort products by revenue rather than units sold
    #[arg(short = 'r', long)]
    by_revenue: bool,
    /// Format of the report printed to standard output
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();
    let mut report = Report::from_files(&args.catalogue, &args.sales)?;
    report.sort_by_revenue = args.by_revenue;
    for w in report.warnings() {
        warn!(source = %w.source, row = w.row, kind = %w.kind, "{}", w.detail);
    }
    match args.format {
        Format::Text => println!("{report}"),
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    if !args.no_results {
        report.append_to(&args.results)?;
    }
    Ok(())
}
