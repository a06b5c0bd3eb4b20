//! Database initialization and migration bookkeeping tests

use fsnd_common::db::{
    column_exists, get_schema_version, open_database, run_migrations, table_exists, Migration,
    MigrationFuture,
};
use sqlx::SqlitePool;

fn create_widgets(pool: &SqlitePool) -> MigrationFuture<'_> {
    Box::pin(async move {
        sqlx::query("CREATE TABLE IF NOT EXISTS widgets (id INTEGER PRIMARY KEY)")
            .execute(pool)
            .await?;
        Ok(())
    })
}

fn add_widget_name(pool: &SqlitePool) -> MigrationFuture<'_> {
    Box::pin(async move {
        if !column_exists(pool, "widgets", "name").await? {
            sqlx::query("ALTER TABLE widgets ADD COLUMN name TEXT")
                .execute(pool)
                .await?;
        }
        Ok(())
    })
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        description: "Create widgets",
        run: create_widgets,
    },
    Migration {
        version: 2,
        description: "Add widgets.name",
        run: add_widget_name,
    },
];

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("nested").join("test.db");

    let pool = open_database(&db_path).await;

    assert!(pool.is_ok(), "Database initialization failed: {:?}", pool.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_foreign_keys_enforced() {
    let dir = tempfile::tempdir().unwrap();
    let pool = open_database(&dir.path().join("fk.db")).await.unwrap();

    let enabled: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(enabled, 1);
}

#[tokio::test]
async fn test_migrations_run_once() {
    let dir = tempfile::tempdir().unwrap();
    let pool = open_database(&dir.path().join("migrate.db")).await.unwrap();

    assert_eq!(get_schema_version(&pool).await.unwrap(), 0);

    let version = run_migrations(&pool, MIGRATIONS).await.unwrap();
    assert_eq!(version, 2);
    assert!(table_exists(&pool, "widgets").await.unwrap());
    assert!(column_exists(&pool, "widgets", "name").await.unwrap());

    // Second run is a no-op
    let version = run_migrations(&pool, MIGRATIONS).await.unwrap();
    assert_eq!(version, 2);

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schema_version")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 2);
}

#[tokio::test]
async fn test_newer_database_left_alone() {
    let dir = tempfile::tempdir().unwrap();
    let pool = open_database(&dir.path().join("newer.db")).await.unwrap();

    run_migrations(&pool, MIGRATIONS).await.unwrap();

    // Older code only knows about v1
    let version = run_migrations(&pool, &MIGRATIONS[..1]).await.unwrap();
    assert_eq!(version, 2);
}
