//! fsnd-trivia - Trivia quiz JSON API server

use anyhow::{Context, Result};
use clap::Parser;
use fsnd_common::config::{CliOverrides, ConfigResolver};
use fsnd_trivia::{build_router, db, AppState};
use tracing::{error, info};

/// Default listen port
const DEFAULT_PORT: u16 = 5001;

#[derive(Debug, Parser)]
#[command(name = "fsnd-trivia", version, about = "Trivia quiz JSON API")]
struct Args {
    /// Folder holding trivia.db
    #[arg(long)]
    root_folder: Option<std::path::PathBuf>,

    /// Interface to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(long, short)]
    port: Option<u16>,

    /// Log filter directive (e.g. "debug", "fsnd_trivia=trace")
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = ConfigResolver::new("trivia", DEFAULT_PORT)
        .with_cli(CliOverrides {
            root_folder: args.root_folder,
            host: args.host,
            port: args.port,
            log_level: args.log_level,
        })
        .resolve();

    fsnd_common::logging::init_tracing(&config.log_level);

    info!(
        "Starting fsnd-trivia v{}",
        env!("CARGO_PKG_VERSION")
    );

    let db_path = config.database_path();
    info!("Database path: {}", db_path.display());

    let pool = match db::init_database(&db_path).await {
        Ok(pool) => {
            info!("✓ Database ready");
            pool
        }
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return Err(e.into());
        }
    };

    let app = build_router(AppState::new(pool));

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("fsnd-trivia listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
