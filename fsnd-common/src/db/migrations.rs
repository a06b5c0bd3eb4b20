//! Versioned schema migrations
//!
//! Each service lists its migrations in ascending version order and hands
//! them to [`run_migrations`]. Applied versions are recorded in the
//! `schema_version` table, so a migration runs at most once per database.
//!
//! # Migration Guidelines
//!
//! 1. **Never modify existing migrations** - databases in the wild already recorded them
//! 2. **Always add new migrations** - one function per schema change
//! 3. **Keep them idempotent** - check `column_exists`/`table_exists` before altering
//! 4. **Use ALTER TABLE** - prefer it over DROP/CREATE to preserve data
//!
//! # Example Migration
//!
//! ```rust,ignore
//! fn migrate_v2(pool: &SqlitePool) -> MigrationFuture<'_> {
//!     Box::pin(async move {
//!         if !column_exists(pool, "venues", "capacity").await? {
//!             sqlx::query("ALTER TABLE venues ADD COLUMN capacity INTEGER")
//!                 .execute(pool)
//!                 .await?;
//!         }
//!         Ok(())
//!     })
//! }
//! ```

use crate::db::init::table_exists;
use crate::Result;
use sqlx::SqlitePool;
use std::future::Future;
use std::pin::Pin;
use tracing::{info, warn};

/// Future returned by a migration step
pub type MigrationFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;

/// One schema migration
#[derive(Clone, Copy)]
pub struct Migration {
    pub version: i32,
    pub description: &'static str,
    pub run: for<'a> fn(&'a SqlitePool) -> MigrationFuture<'a>,
}

impl std::fmt::Debug for Migration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Migration")
            .field("version", &self.version)
            .field("description", &self.description)
            .finish()
    }
}

/// Create the `schema_version` table if it is missing
pub async fn create_schema_version_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Get current schema version from database
///
/// Returns 0 if schema_version table doesn't exist or has no rows
pub async fn get_schema_version(pool: &SqlitePool) -> Result<i32> {
    if !table_exists(pool, "schema_version").await? {
        return Ok(0);
    }

    let version: Option<i32> =
        sqlx::query_scalar("SELECT version FROM schema_version ORDER BY version DESC LIMIT 1")
            .fetch_optional(pool)
            .await?;

    Ok(version.unwrap_or(0))
}

async fn set_schema_version(pool: &SqlitePool, version: i32) -> Result<()> {
    sqlx::query("INSERT INTO schema_version (version) VALUES (?)")
        .bind(version)
        .execute(pool)
        .await?;

    Ok(())
}

/// Run all pending migrations, returning the resulting schema version
pub async fn run_migrations(pool: &SqlitePool, migrations: &[Migration]) -> Result<i32> {
    create_schema_version_table(pool).await?;

    let target_version = migrations.iter().map(|m| m.version).max().unwrap_or(0);
    let current_version = get_schema_version(pool).await?;

    if current_version == target_version {
        info!("Database schema is up to date (v{})", current_version);
        return Ok(current_version);
    }

    if current_version > target_version {
        warn!(
            "Database schema version ({}) is newer than code version ({})",
            current_version, target_version
        );
        warn!("This may indicate a downgrade. Proceeding with caution.");
        return Ok(current_version);
    }

    info!(
        "Running database migrations: v{} -> v{}",
        current_version, target_version
    );

    for migration in migrations.iter().filter(|m| m.version > current_version) {
        info!("Running migration v{}: {}", migration.version, migration.description);
        (migration.run)(pool).await?;
        set_schema_version(pool, migration.version).await?;
        info!("✓ Migration v{} completed", migration.version);
    }

    info!("All migrations completed successfully");
    Ok(target_version)
}
