//! Database maintenance commands (init, seed)

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use roster_server::db::{seed, SeedOutcome};
use roster_server::Database;

use crate::config::RosterConfig;

/// Arguments shared by init and seed
#[derive(Parser, Debug)]
pub struct DbArgs {
    /// SQLite database file (created if missing)
    #[arg(long, short = 'd', env = "ROSTER_DATABASE")]
    pub database: Option<PathBuf>,
}

/// Create the schema
pub async fn run_init(args: DbArgs, config: &RosterConfig) -> Result<()> {
    let path = config.database_path(args.database);
    Database::open(&path)
        .await
        .with_context(|| format!("Failed to initialize database at {}", path.display()))?;

    println!("Initialized database at {}", path.display());
    Ok(())
}

/// Create the schema and load demo data into an empty database
pub async fn run_seed(args: DbArgs, config: &RosterConfig) -> Result<()> {
    let path = config.database_path(args.database);
    let db = Database::open(&path)
        .await
        .with_context(|| format!("Failed to open database at {}", path.display()))?;

    match seed(&db).await.context("Failed to seed database")? {
        SeedOutcome::Seeded {
            classes,
            students,
            registrations,
        } => println!(
            "Seeded {}: {} classes, {} students, {} registrations",
            path.display(),
            classes,
            students,
            registrations
        ),
        SeedOutcome::Skipped => println!(
            "{} already has data, nothing seeded",
            path.display()
        ),
    }

    Ok(())
}
