// Copyright (c) 2025 - Cowboy AI, Inc.
//! Topology Plan CLI
//!
//! Reads a topology config (JSON, camelCase keys) and prints the computed
//! plan as JSON on stdout. Logs go to stderr.
//!
//! Run with: cargo run --bin topology-plan -- path/to/topology.json
//!
//! The config path may also be given via the TOPOLOGY_CONFIG environment
//! variable. Log level is controlled with RUST_LOG.

use anyhow::{Context, Result};
use cim_topology::{TopologyConfig, TopologyPlan};
use std::path::PathBuf;
use tracing::info;

/// Resolve the config path from the first argument or the environment
fn config_path() -> Result<PathBuf> {
    std::env::args()
        .nth(1)
        .or_else(|| std::env::var("TOPOLOGY_CONFIG").ok())
        .map(PathBuf::from)
        .context("No config given. Usage: topology-plan <config.json> (or set TOPOLOGY_CONFIG)")
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let path = config_path()?;
    info!("📋 Loading topology config from {}", path.display());

    let config = TopologyConfig::from_file(&path)
        .with_context(|| format!("Failed to load config {}", path.display()))?;

    let plan = TopologyPlan::build(&config).context("Failed to build topology plan")?;
    info!(
        "✅ Planned {} subnets and {} hosted zones",
        plan.subnets.len(),
        plan.dns.hosted_zones.len()
    );

    println!("{}", plan.to_json_pretty()?);
    Ok(())
}
