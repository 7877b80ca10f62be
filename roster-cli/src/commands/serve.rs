//! HTTP server command for the roster API

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use roster_server::{run_server, Database};

use crate::config::RosterConfig;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:8080)
    #[arg(long, short = 'b', env = "ROSTER_BIND")]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// SQLite database file (created if missing)
    #[arg(long, short = 'd', env = "ROSTER_DATABASE")]
    pub database: Option<PathBuf>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config: &RosterConfig) -> Result<()> {
    let database = config.database_path(args.database);
    let server_config = config.server_config(args.bind, args.cors_permissive);

    tracing::info!(
        bind = %server_config.bind_addr,
        database = %database.display(),
        "Starting roster server"
    );

    // Run server (blocks until shutdown)
    run_server(Database::new(&database), server_config)
        .await
        .context("Server error")?;

    Ok(())
}
