use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use trivia_api::db;
use trivia_api::telemetry::init_tracing;
use trivia_api::transfer::{export_data, import_data};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Database path
    db_path: PathBuf,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply database migrations
    Migrate,
    /// Import categories.csv and questions.csv from a directory
    Import { path: PathBuf },
    /// Export categories.csv and questions.csv into a directory
    Export { path: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let db_path = cli.db_path.to_string_lossy();
    let pool = db::establish_connection(&db_path)
        .await
        .context("Cannot connect to DB")?;
    db::run_migrations(&pool).await?;
    match cli.command {
        Commands::Migrate => tracing::info!("Migrations applied"),
        Commands::Export { path } => export_data(&pool, &path).await.context("Cannot export")?,
        Commands::Import { path } => import_data(&pool, &path).await.context("Cannot import")?,
    }
    pool.close().await;
    Ok(())
}
