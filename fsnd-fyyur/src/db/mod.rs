//! Database access layer for the Fyyur site
//!
//! Venues, artists and the shows linking them. Handlers call these
//! repository functions and never build SQL themselves.

use fsnd_common::Result;
use sqlx::SqlitePool;
use std::path::Path;

pub mod artists;
pub mod migrations;
pub mod schema;
pub mod shows;
pub mod venues;

/// Open the Fyyur database, create tables and run migrations
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let pool = fsnd_common::db::open_database(db_path).await?;
    prepare(&pool).await?;
    Ok(pool)
}

/// Schema setup on an already opened pool
pub async fn prepare(pool: &SqlitePool) -> Result<()> {
    schema::create_tables(pool).await?;
    migrations::run(pool).await?;
    Ok(())
}
