//! livegraph — live memory chart served to the browser over long-poll.
//!
//! Run with:  `RUST_LOG=info livegraph --port 8088`

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Command-line overrides; anything unset falls back to the config file.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Path to the TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind (default 127.0.0.1).
    #[arg(long)]
    bind: Option<String>,

    /// Port to listen on (default 8088).
    #[arg(short, long)]
    port: Option<u16>,

    /// Delay before each update is answered, in milliseconds.
    #[arg(long)]
    poll_delay_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Structured logging — RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    tracing::info!("livegraph v{} starting", env!("CARGO_PKG_VERSION"));

    let path = args.config.clone().unwrap_or_else(graph_config::default_path);
    let mut config = graph_config::load(&path)
        .with_context(|| format!("loading config from '{}'", path.display()))?;

    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(delay) = args.poll_delay_ms {
        config.server.poll_delay_ms = delay;
    }

    graph_server::run(config).await.map_err(Into::into)
}
