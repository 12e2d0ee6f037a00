//! hostgrid — host-directory volume resource plugin binary.
//!
//! The orchestrator runs this binary once per plugin operation,
//! writing a JSON parameter object to stdin and reading the JSON
//! response from stdout:
//!
//! ```text
//! echo '{"nodename":"n1","deploy_count":2,"volumes":["/data:/var/data:10G"]}' \
//!     | hostgrid calculate-deploy
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use hostgrid_core::HostgridConfig;
use hostgrid_plugin::Plugin;

mod commands;
mod dispatch;

#[derive(Parser)]
#[command(
    name = "hostgrid",
    about = "Host-directory volume resource plugin for cluster workload orchestrators",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Plugin config file, in TOML.
    #[arg(long, default_value = "hostgrid.toml", env = "HOSTGRID_CONFIG_PATH")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the plugin name.
    Name,
    /// Show metric descriptions.
    MetricsDescription,
    /// Show node metrics.
    GetMetrics,
    /// Compute engine parameters and per-slot resources for a deploy.
    CalculateDeploy,
    /// Merge a realloc request into the current resource and compute
    /// the delta to apply.
    CalculateRealloc,
    /// Remap workload resources onto new engine identities.
    CalculateRemap,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = HostgridConfig::load(&cli.config)?;

    // stdout carries the protocol response, so tracing goes to stderr.
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => tracing_subscriber::EnvFilter::try_new(&config.log.level)?,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let plugin = Plugin::new(&config);

    match cli.command {
        Commands::Name => commands::info::name(&plugin),
        Commands::MetricsDescription => commands::metrics::description(&plugin),
        Commands::GetMetrics => commands::metrics::get_metrics(&plugin),
        Commands::CalculateDeploy => commands::calculate::deploy(&plugin),
        Commands::CalculateRealloc => commands::calculate::realloc(&plugin),
        Commands::CalculateRemap => commands::calculate::remap(&plugin),
    }
}
