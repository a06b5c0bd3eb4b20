//! fsnd-fyyur - Venue and artist booking site

use anyhow::{Context, Result};
use clap::Parser;
use fsnd_common::config::{CliOverrides, ConfigResolver};
use fsnd_fyyur::templates::Templates;
use fsnd_fyyur::{build_router, db, AppState};
use tracing::{error, info};

/// Default listen port
const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Parser)]
#[command(name = "fsnd-fyyur", version, about = "Venue and artist booking site")]
struct Args {
    /// Folder holding fyyur.db
    #[arg(long)]
    root_folder: Option<std::path::PathBuf>,

    /// Interface to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(long, short)]
    port: Option<u16>,

    /// Log filter directive (e.g. "debug", "fsnd_fyyur=trace")
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = ConfigResolver::new("fyyur", DEFAULT_PORT)
        .with_cli(CliOverrides {
            root_folder: args.root_folder,
            host: args.host,
            port: args.port,
            log_level: args.log_level,
        })
        .resolve();

    fsnd_common::logging::init_tracing(&config.log_level);

    info!("Starting fsnd-fyyur v{}", env!("CARGO_PKG_VERSION"));

    let templates = Templates::new().context("Failed to load page templates")?;

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

    let app = build_router(AppState::new(pool, templates));

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("fsnd-fyyur listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
