//! Table definitions
//!
//! Genres are stored as a JSON array of names. Show times are stored as
//! naive local timestamps.

use fsnd_common::Result;
use sqlx::SqlitePool;

/// Create the Fyyur tables if they do not exist yet
pub async fn create_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS venues (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            city TEXT NOT NULL,
            state TEXT NOT NULL,
            address TEXT NOT NULL,
            phone TEXT NOT NULL DEFAULT '',
            genres TEXT NOT NULL DEFAULT '[]',
            image_link TEXT NOT NULL DEFAULT '',
            website_link TEXT NOT NULL DEFAULT '',
            facebook_link TEXT NOT NULL DEFAULT '',
            seeking_talent INTEGER NOT NULL DEFAULT 0,
            seeking_description TEXT NOT NULL DEFAULT ''
        )
        "#,
    )
    .execute(pool)
    .await?;

    // website_link arrives with migration v1
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS artists (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            city TEXT NOT NULL,
            state TEXT NOT NULL,
            phone TEXT NOT NULL DEFAULT '',
            genres TEXT NOT NULL DEFAULT '[]',
            image_link TEXT NOT NULL DEFAULT '',
            facebook_link TEXT NOT NULL DEFAULT '',
            seeking_venue INTEGER NOT NULL DEFAULT 0,
            seeking_description TEXT NOT NULL DEFAULT ''
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS shows (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            artist_id INTEGER NOT NULL REFERENCES artists(id) ON DELETE CASCADE,
            venue_id INTEGER NOT NULL REFERENCES venues(id) ON DELETE CASCADE,
            start_time TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
