//! Trivia schema migrations

use fsnd_common::db::{run_migrations, Migration, MigrationFuture};
use fsnd_common::Result;
use sqlx::SqlitePool;
use tracing::info;

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    description: "Index questions by category",
    run: migrate_v1,
}];

/// Apply pending trivia migrations
pub async fn run(pool: &SqlitePool) -> Result<i32> {
    run_migrations(pool, MIGRATIONS).await
}

/// Migration v1: index for the category listing and quiz filters
fn migrate_v1(pool: &SqlitePool) -> MigrationFuture<'_> {
    Box::pin(async move {
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_questions_category ON questions (category)")
            .execute(pool)
            .await?;
        info!("  ✓ Created idx_questions_category");
        Ok(())
    })
}
