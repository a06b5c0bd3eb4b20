//! Database access layer for the trivia API
//!
//! Repository-style query functions over the `questions` and `categories`
//! tables. Handlers never build SQL themselves.

use fsnd_common::Result;
use sqlx::SqlitePool;
use std::path::Path;

pub mod categories;
pub mod migrations;
pub mod questions;
pub mod schema;

/// Open the trivia database, create tables, run migrations and seed the
/// default categories
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let pool = fsnd_common::db::open_database(db_path).await?;
    prepare(&pool).await?;
    Ok(pool)
}

/// Schema setup on an already opened pool
pub async fn prepare(pool: &SqlitePool) -> Result<()> {
    schema::create_tables(pool).await?;
    migrations::run(pool).await?;
    categories::init_default_categories(pool).await?;
    Ok(())
}
