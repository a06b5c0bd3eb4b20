//! Venue queries

use crate::models::{EntityRef, Venue, VenueAreaRow, VenueData, VenueShow};
use fsnd_common::search::filter_matches;
use fsnd_common::Result;
use sqlx::types::Json;
use sqlx::SqlitePool;

const VENUE_COLUMNS: &str = r#"
    SELECT id, name, city, state, address, phone, genres, image_link,
           website_link, facebook_link, seeking_talent, seeking_description
    FROM venues
"#;

/// Every venue joined with each of its shows; venues without shows appear
/// once with a NULL start time
pub async fn list_area_rows(pool: &SqlitePool) -> Result<Vec<VenueAreaRow>> {
    let rows = sqlx::query_as::<_, VenueAreaRow>(
        r#"
        SELECT v.id, v.name, v.city, v.state, s.start_time
        FROM venues v
        LEFT JOIN shows s ON s.venue_id = v.id
        ORDER BY v.state, v.city, v.name COLLATE NOCASE, v.id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Venues whose name contains `term`, ignoring case
pub async fn search_venues(pool: &SqlitePool, term: &str) -> Result<Vec<EntityRef>> {
    let venues = sqlx::query_as::<_, EntityRef>(
        "SELECT id, name FROM venues ORDER BY name COLLATE NOCASE, id",
    )
    .fetch_all(pool)
    .await?;

    Ok(filter_matches(venues, term, |v| v.name.as_str()))
}

/// One venue by id
pub async fn get_venue(pool: &SqlitePool, id: i64) -> Result<Option<Venue>> {
    let venue = sqlx::query_as::<_, Venue>(&format!("{} WHERE id = ?", VENUE_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(venue)
}

/// Shows at a venue with their artists, earliest first
pub async fn venue_shows(pool: &SqlitePool, venue_id: i64) -> Result<Vec<VenueShow>> {
    let shows = sqlx::query_as::<_, VenueShow>(
        r#"
        SELECT a.id AS artist_id, a.name AS artist_name,
               a.image_link AS artist_image_link, s.start_time
        FROM shows s
        JOIN artists a ON a.id = s.artist_id
        WHERE s.venue_id = ?
        ORDER BY s.start_time, s.id
        "#,
    )
    .bind(venue_id)
    .fetch_all(pool)
    .await?;

    Ok(shows)
}

/// Insert a venue, returning its id
pub async fn insert_venue(pool: &SqlitePool, data: &VenueData) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let id = sqlx::query(
        r#"
        INSERT INTO venues (name, city, state, address, phone, genres, image_link,
                            website_link, facebook_link, seeking_talent, seeking_description)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&data.name)
    .bind(&data.city)
    .bind(&data.state)
    .bind(&data.address)
    .bind(&data.phone)
    .bind(Json(&data.genres))
    .bind(&data.image_link)
    .bind(&data.website_link)
    .bind(&data.facebook_link)
    .bind(data.seeking_talent)
    .bind(&data.seeking_description)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    tx.commit().await?;
    Ok(id)
}

/// Overwrite every attribute of a venue; false when no row had that id
pub async fn update_venue(pool: &SqlitePool, id: i64, data: &VenueData) -> Result<bool> {
    let mut tx = pool.begin().await?;

    let affected = sqlx::query(
        r#"
        UPDATE venues
        SET name = ?, city = ?, state = ?, address = ?, phone = ?, genres = ?,
            image_link = ?, website_link = ?, facebook_link = ?,
            seeking_talent = ?, seeking_description = ?
        WHERE id = ?
        "#,
    )
    .bind(&data.name)
    .bind(&data.city)
    .bind(&data.state)
    .bind(&data.address)
    .bind(&data.phone)
    .bind(Json(&data.genres))
    .bind(&data.image_link)
    .bind(&data.website_link)
    .bind(&data.facebook_link)
    .bind(data.seeking_talent)
    .bind(&data.seeking_description)
    .bind(id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    tx.commit().await?;
    Ok(affected > 0)
}

/// Delete a venue and, by cascade, its shows; false when no row had that id
pub async fn delete_venue(pool: &SqlitePool, id: i64) -> Result<bool> {
    let mut tx = pool.begin().await?;

    let affected = sqlx::query("DELETE FROM venues WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;
    Ok(affected > 0)
}
