//! roster CLI - class roster API server and database tooling
//!
//! - `serve`: run the HTTP API
//! - `init`: create the SQLite schema
//! - `seed`: load a small demo dataset into an empty database

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use config::RosterConfig;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "roster",
    author,
    version,
    about = "Student and class roster API backed by SQLite"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file (default: ./roster.toml if present)
    #[arg(long, short = 'c', global = true, env = "ROSTER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run HTTP API server (students, classes, registered students)
    Serve(commands::serve::ServeArgs),
    /// Create the database schema
    Init(commands::db::DbArgs),
    /// Load demo classes, students and registrations into an empty database
    Seed(commands::db::DbArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();

    let config = RosterConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args, &config).await?,
        Commands::Init(args) => commands::run_init(args, &config).await?,
        Commands::Seed(args) => commands::run_seed(args, &config).await?,
    }
    Ok(())
}
