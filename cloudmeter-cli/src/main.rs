//! cloudmeter - collect Azure utilization time series from the command line.
//!
//! Parses the time window and option bundle, runs a collection with a
//! single-line progress indicator on stderr, and prints the labeled series
//! map as JSON on stdout.

use std::io::Write;
use std::time::Duration;

use chrono::{DateTime, Utc};
use clap::Parser;
use cloudmeter_core::{collect, AzCommand, CollectorConfig, MetricType, TimeWindow};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cloudmeter", version, about = "Collect Azure utilization time series")]
struct Args {
    /// Window start, RFC 3339 (e.g. 2024-03-01T00:00:00Z)
    #[arg(long)]
    start: DateTime<Utc>,

    /// Window end, RFC 3339
    #[arg(long)]
    end: DateTime<Utc>,

    /// Requested sampling step (e.g. 90s, 5m, 1h); snapped to the nearest
    /// supported interval
    #[arg(long, default_value = "5m", value_parser = humantime::parse_duration)]
    step: Duration,

    /// Limit listing to one resource group
    #[arg(long)]
    resource_group: Option<String>,

    /// Provider resource-type identifier
    #[arg(long, default_value = "Microsoft.Compute/virtualMachines")]
    resource_type: String,

    /// Logical metric: cpu, ram, memory-percent or disk
    #[arg(long, default_value = "cpu")]
    metric: MetricType,

    /// Regular expression on resource names (unanchored, case-sensitive)
    #[arg(long)]
    filter: Option<String>,

    /// Cap on simultaneous az invocations (default: unbounded)
    #[arg(long)]
    max_in_flight: Option<usize>,

    /// Azure CLI executable to invoke
    #[arg(long, default_value = "az")]
    az_path: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Err(e) = run(args).await {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let window = TimeWindow::new(args.start, args.end, args.step)?;
    let config = CollectorConfig {
        resource_group: args.resource_group,
        resource_type: args.resource_type,
        metric: args.metric,
        filter: args.filter,
        max_in_flight: args.max_in_flight,
    };

    let cli = AzCommand::with_program(&args.az_path);
    let map = collect(&cli, &window, &config, render_progress).await?;
    eprintln!();

    println!("{}", serde_json::to_string_pretty(&map)?);
    Ok(())
}

/// One overwritable line on stderr, updated on every completion.
fn render_progress(completed: usize, total: usize) {
    eprint!(
        "\r{} {}/{} resources",
        "collecting".cyan().bold(),
        completed,
        total
    );
    let _ = std::io::stderr().flush();
}
