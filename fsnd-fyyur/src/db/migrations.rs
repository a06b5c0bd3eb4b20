//! Fyyur schema migrations

use fsnd_common::db::{column_exists, run_migrations, Migration, MigrationFuture};
use fsnd_common::Result;
use sqlx::SqlitePool;
use tracing::info;

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        description: "Add artists.website_link",
        run: migrate_v1,
    },
    Migration {
        version: 2,
        description: "Index shows by venue and artist",
        run: migrate_v2,
    },
];

/// Apply pending Fyyur migrations
pub async fn run(pool: &SqlitePool) -> Result<i32> {
    run_migrations(pool, MIGRATIONS).await
}

/// Migration v1: artists gained a website link
fn migrate_v1(pool: &SqlitePool) -> MigrationFuture<'_> {
    Box::pin(async move {
        if !column_exists(pool, "artists", "website_link").await? {
            sqlx::query("ALTER TABLE artists ADD COLUMN website_link TEXT NOT NULL DEFAULT ''")
                .execute(pool)
                .await?;
            info!("  ✓ Added artists.website_link");
        }
        Ok(())
    })
}

/// Migration v2: detail pages and the venue list join on these columns
fn migrate_v2(pool: &SqlitePool) -> MigrationFuture<'_> {
    Box::pin(async move {
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_shows_venue ON shows (venue_id)")
            .execute(pool)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_shows_artist ON shows (artist_id)")
            .execute(pool)
            .await?;
        info!("  ✓ Created show indexes");
        Ok(())
    })
}
