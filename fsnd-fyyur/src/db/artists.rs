//! Artist queries

use crate::models::{Artist, ArtistData, ArtistShow, EntityRef};
use fsnd_common::search::filter_matches;
use fsnd_common::Result;
use sqlx::types::Json;
use sqlx::SqlitePool;

const ARTIST_COLUMNS: &str = r#"
    SELECT id, name, city, state, phone, genres, image_link,
           website_link, facebook_link, seeking_venue, seeking_description
    FROM artists
"#;

/// `{id, name}` of every artist, ordered by name ignoring case
pub async fn list_artists(pool: &SqlitePool) -> Result<Vec<EntityRef>> {
    let artists = sqlx::query_as::<_, EntityRef>(
        "SELECT id, name FROM artists ORDER BY name COLLATE NOCASE, id",
    )
    .fetch_all(pool)
    .await?;

    Ok(artists)
}

/// Artists whose name contains `term`, ignoring case
pub async fn search_artists(pool: &SqlitePool, term: &str) -> Result<Vec<EntityRef>> {
    let artists = list_artists(pool).await?;

    Ok(filter_matches(artists, term, |a| a.name.as_str()))
}

/// One artist by id
pub async fn get_artist(pool: &SqlitePool, id: i64) -> Result<Option<Artist>> {
    let artist = sqlx::query_as::<_, Artist>(&format!("{} WHERE id = ?", ARTIST_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(artist)
}

/// Shows of an artist with their venues, earliest first
pub async fn artist_shows(pool: &SqlitePool, artist_id: i64) -> Result<Vec<ArtistShow>> {
    let shows = sqlx::query_as::<_, ArtistShow>(
        r#"
        SELECT v.id AS venue_id, v.name AS venue_name,
               v.image_link AS venue_image_link, s.start_time
        FROM shows s
        JOIN venues v ON v.id = s.venue_id
        WHERE s.artist_id = ?
        ORDER BY s.start_time, s.id
        "#,
    )
    .bind(artist_id)
    .fetch_all(pool)
    .await?;

    Ok(shows)
}

/// Insert an artist, returning its id
pub async fn insert_artist(pool: &SqlitePool, data: &ArtistData) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let id = sqlx::query(
        r#"
        INSERT INTO artists (name, city, state, phone, genres, image_link,
                             website_link, facebook_link, seeking_venue, seeking_description)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&data.name)
    .bind(&data.city)
    .bind(&data.state)
    .bind(&data.phone)
    .bind(Json(&data.genres))
    .bind(&data.image_link)
    .bind(&data.website_link)
    .bind(&data.facebook_link)
    .bind(data.seeking_venue)
    .bind(&data.seeking_description)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    tx.commit().await?;
    Ok(id)
}

/// Overwrite every attribute of an artist; false when no row had that id
pub async fn update_artist(pool: &SqlitePool, id: i64, data: &ArtistData) -> Result<bool> {
    let mut tx = pool.begin().await?;

    let affected = sqlx::query(
        r#"
        UPDATE artists
        SET name = ?, city = ?, state = ?, phone = ?, genres = ?, image_link = ?,
            website_link = ?, facebook_link = ?, seeking_venue = ?, seeking_description = ?
        WHERE id = ?
        "#,
    )
    .bind(&data.name)
    .bind(&data.city)
    .bind(&data.state)
    .bind(&data.phone)
    .bind(Json(&data.genres))
    .bind(&data.image_link)
    .bind(&data.website_link)
    .bind(&data.facebook_link)
    .bind(data.seeking_venue)
    .bind(&data.seeking_description)
    .bind(id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    tx.commit().await?;
    Ok(affected > 0)
}
