mod commands;
mod config;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::catalog::TargetsArgs;
use commands::period::{CumulativeArgs, GrowthArgs, StatsArgs};
use commands::snapshot::{ChartArgs, ExportArgs, SnapshotArgs};
use commands::Context;
use config::DashboardConfig;

/// Payment-channel statistics for a region's branches
#[derive(Parser)]
#[command(
    name = "bstats",
    version,
    about = "Payment-channel statistics for a region's branches",
    long_about = "Reads the daily and monthly branch snapshots and computes region \
                  totals, per-branch other-channel shares, cumulative shares across \
                  months, month-over-month growth and export rows."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// YAML config file (default: ./bstats.yaml when present)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Snapshot root, overriding the config's data_dir
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Region totals and invoice shares for one snapshot
    Overview(SnapshotArgs),
    /// Other-channel share per branch plus the region total
    Chart(ChartArgs),
    /// Shares accumulated across several months
    Cumulative(CumulativeArgs),
    /// Month-over-month change in other-channel share
    Growth(GrowthArgs),
    /// Daily headline cards trended against a month
    Stats(StatsArgs),
    /// Check each record's count identities
    Validate(SnapshotArgs),
    /// Per-branch rows for a spreadsheet
    Export(ExportArgs),
    /// List months that have a snapshot
    Months,
    /// Show the configured yearly targets
    Targets(TargetsArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "bstats=debug,branch_stats_core=debug"
    } else {
        "bstats=info,branch_stats_core=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_context(cli: &Cli) -> Result<Context, Box<dyn std::error::Error>> {
    let config = DashboardConfig::load(cli.config.as_deref())?;
    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| config.data_dir.clone());
    Ok(Context { data_dir, config })
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Commands::Version = cli.command {
        println!("bstats {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let ctx = match load_context(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Overview(args) => commands::snapshot::run_overview(args, &ctx),
        Commands::Chart(args) => commands::snapshot::run_chart(args, &ctx),
        Commands::Cumulative(args) => commands::period::run_cumulative(args, &ctx),
        Commands::Growth(args) => commands::period::run_growth(args, &ctx),
        Commands::Stats(args) => commands::period::run_stats(args, &ctx),
        Commands::Validate(args) => commands::snapshot::run_validate(args, &ctx),
        Commands::Export(args) => commands::snapshot::run_export(args, &ctx),
        Commands::Months => commands::catalog::run_months(&ctx),
        Commands::Targets(args) => commands::catalog::run_targets(args, &ctx),
        Commands::Version => unreachable!("handled before loading config"),
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
