use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Synthetic earthquake catalog forecasts.
#[derive(Parser)]
#[command(
    name = "syncat",
    version,
    about = "Synthetic earthquake catalog forecasts from historical seismicity"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Generate a forecast from a parameter file and a historical catalog.
    Generate(GenerateArgs),
    /// Summarize an existing forecast file as JSON.
    Summarize(SummarizeArgs),
}

/// Arguments for the `generate` subcommand.
#[derive(clap::Args)]
pub struct GenerateArgs {
    /// Parameter file (`.toml`, or legacy `key = value` lines).
    #[arg(short, long)]
    pub params: PathBuf,

    /// Override the historical catalog path from the parameter file.
    #[arg(short, long)]
    pub catalog: Option<PathBuf>,

    /// Override the output folder.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the random seed.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Override the number of synthetic catalogs.
    #[arg(short, long = "n-sims")]
    pub n_sims: Option<usize>,

    /// Name the output file after both window dates.
    #[arg(long)]
    pub name_with_end_date: bool,

    /// Forecast this many consecutive windows, each shifted by one day and
    /// seeded from a master stream.
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub days: u32,
}

/// Arguments for the `summarize` subcommand.
#[derive(clap::Args)]
pub struct SummarizeArgs {
    /// Forecast CSV file.
    #[arg(short, long)]
    pub forecast: PathBuf,

    /// Number of synthetic catalogs, when trailing catalogs may be empty.
    #[arg(short, long = "n-sims")]
    pub n_sims: Option<usize>,

    /// Path for the JSON summary; printed to stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
