//! Live Dashboard Demo CLI
//!
//! Entry point for running the lending feed from the command line.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use lending_core::types::{Geography, TimeRange};
use live_dashboard::prelude::*;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Live lending dashboard - streams synthetic portfolio snapshots
#[derive(Parser, Debug)]
#[command(name = "live-dashboard")]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (TOML format)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Geography filter (all, usa, uk, germany, canada, france)
    #[arg(short, long)]
    geography: Option<Geography>,

    /// Time range filter (24h, 7d, 30d, all)
    #[arg(short, long)]
    time_range: Option<TimeRange>,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Run time in seconds; 0 runs until Ctrl-C
    #[arg(short, long)]
    duration_secs: Option<u64>,

    /// Seconds between reports
    #[arg(long)]
    report_interval_secs: Option<u64>,

    /// Report format (summary, json)
    #[arg(short, long)]
    output: Option<OutputFormat>,

    /// Filter selection to visit, e.g. usa/24h (repeatable)
    #[arg(long = "tour", value_name = "GEO/RANGE")]
    filter_tour: Vec<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

impl From<Args> for CliArgs {
    fn from(args: Args) -> Self {
        CliArgs {
            config_file: args.config,
            log_level: args.log_level,
            geography: args.geography,
            time_range: args.time_range,
            seed: args.seed,
            duration_secs: args.duration_secs,
            report_interval_secs: args.report_interval_secs,
            output: args.output,
            filter_tour: args.filter_tour,
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli: CliArgs = Args::parse().into();
    let config = build_config(&cli)?;

    init_tracing(&config.log_level);
    tracing::info!(
        geography = %config.feed.geography,
        time_range = %config.feed.time_range,
        output = ?config.output,
        "Live dashboard configuration loaded"
    );

    let session = DashboardSession::new(config);
    let mut stdout = std::io::stdout();
    session
        .run(&mut stdout, async {
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
        })
        .await?;

    Ok(())
}
