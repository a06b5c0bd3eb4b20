//! Show queries

use crate::models::{NewShow, ShowListing};
use fsnd_common::Result;
use sqlx::SqlitePool;

/// Every show with its venue and artist, earliest first
pub async fn list_shows(pool: &SqlitePool) -> Result<Vec<ShowListing>> {
    let shows = sqlx::query_as::<_, ShowListing>(
        r#"
        SELECT s.id, v.id AS venue_id, v.name AS venue_name,
               a.id AS artist_id, a.name AS artist_name,
               a.image_link AS artist_image_link, s.start_time
        FROM shows s
        JOIN venues v ON v.id = s.venue_id
        JOIN artists a ON a.id = s.artist_id
        ORDER BY s.start_time, s.id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(shows)
}

/// Insert a show, returning its id
///
/// An unknown artist or venue fails with a foreign key violation and
/// nothing is written.
pub async fn insert_show(pool: &SqlitePool, show: &NewShow) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let id = sqlx::query("INSERT INTO shows (artist_id, venue_id, start_time) VALUES (?, ?, ?)")
        .bind(show.artist_id)
        .bind(show.venue_id)
        .bind(show.start_time)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

    tx.commit().await?;
    Ok(id)
}
