use anyhow::Context;
use clap::Parser;
use trivia_api::config::Settings;
use trivia_api::db;
use trivia_api::server::app::run_server;
use trivia_api::telemetry::init_tracing;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Overrides the configured listen address, e.g. 127.0.0.1:5000
    #[clap(long)]
    addr: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let settings = Settings::load().context("Failed to load settings")?;
    let pool = db::establish_connection(&settings.database_path)
        .await
        .with_context(|| format!("Cannot open database {}", settings.database_path))?;

    tracing::info!("Running db migrations...");
    db::run_migrations(&pool).await?;

    let addr = cli.addr.unwrap_or_else(|| settings.addr());
    run_server(pool.clone(), &addr).await?;
    pool.close().await;
    Ok(())
}
