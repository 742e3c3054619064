//! FitFam Trainer
//!
//! An MCP server for family fitness, meal planning and progress tracking.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use fitfam::build_info;
use fitfam::catalog::Catalog;
use fitfam::config::AppConfig;
use fitfam::db;
use fitfam::mcp::FitFamService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    // Logs go to stderr so stdout stays free for MCP
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log_directive)?)
        .with_writer(std::io::stderr)
        .init();

    let catalog = Catalog::builtin()?;
    build_info::print_startup_banner(&catalog);
    eprintln!("Starting MCP server on stdio...");

    let db_path = &config.database_path;
    eprintln!("Database path: {}", db_path.display());

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    eprintln!("Initializing database...");
    let database = db::Database::new(db_path)?;

    database.with_conn(|conn| {
        db::migrations::run_migrations(conn)?;
        let version = db::migrations::get_schema_version(conn)?;
        eprintln!("Database schema version: {}", version);
        Ok(())
    })?;

    let service = FitFamService::new(&config, database, catalog);
    tracing::info!(timeout = ?config.remote_timeout, "service ready");

    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;
    server.waiting().await?;

    Ok(())
}
