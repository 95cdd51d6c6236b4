//! vswitchd - entry point.
//!
//! Loads the per-switch config, builds the port table against the link
//! topology, and runs the forwarding loop until Ctrl-C. The binary
//! wires up an in-process [`ChannelLink`] as a stand-in for an
//! external link-simulation runtime; the host-side handles are held
//! open so the loop idles until shutdown.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use vswitch_core::{ChannelLink, ForwardingEngine};
use vswitchd::{SwitchConfig, SwitchDaemon};

#[derive(Debug, Parser)]
#[command(name = "vswitchd", about = "VLAN-aware Ethernet switch daemon")]
struct Cli {
    /// Switch identifier (selects configs/switch<ID>.cfg by default).
    switch_id: String,

    /// Path to the per-switch config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Mark a port administratively down (repeatable).
    #[arg(long = "disable", value_name = "PORT_NAME")]
    disable: Vec<String>,
}

/// Initializes tracing/logging subsystem
fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config_path = cli
        .config
        .unwrap_or_else(|| PathBuf::from(format!("configs/switch{}.cfg", cli.switch_id)));

    info!("--- Starting vswitchd (switch {}) ---", cli.switch_id);

    let config = SwitchConfig::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    if let Some(priority) = config.priority {
        info!(priority, "config carries a priority value (unused, no STP)");
    }

    let names: Vec<&str> = config.ports.iter().map(|(name, _)| name.as_str()).collect();
    let (link, handles) = ChannelLink::new(&names);

    let ports = config
        .build_port_table(&link, &cli.disable)
        .context("building port table")?;
    let engine = ForwardingEngine::new(ports);

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_token.cancel();
        }
    });

    let mut daemon = SwitchDaemon::new(cli.switch_id, engine, link, shutdown);
    daemon.run().await;

    // Keep the host-side handles alive for the lifetime of the loop.
    drop(handles);

    Ok(())
}
