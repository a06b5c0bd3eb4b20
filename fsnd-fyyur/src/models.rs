//! Listing entities and the row shapes the pages consume

use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

/// A venue as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    #[sqlx(json)]
    pub genres: Vec<String>,
    pub image_link: String,
    pub website_link: String,
    pub facebook_link: String,
    pub seeking_talent: bool,
    pub seeking_description: String,
}

/// Venue attributes written on create and edit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VenueData {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: String,
    pub website_link: String,
    pub facebook_link: String,
    pub seeking_talent: bool,
    pub seeking_description: String,
}

/// An artist as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    #[sqlx(json)]
    pub genres: Vec<String>,
    pub image_link: String,
    pub website_link: String,
    pub facebook_link: String,
    pub seeking_venue: bool,
    pub seeking_description: String,
}

/// Artist attributes written on create and edit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArtistData {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: String,
    pub website_link: String,
    pub facebook_link: String,
    pub seeking_venue: bool,
    pub seeking_description: String,
}

/// Show to insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShow {
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: NaiveDateTime,
}

/// `{id, name}` pair used by search results and the artist list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct EntityRef {
    pub id: i64,
    pub name: String,
}

/// A show on a venue page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct VenueShow {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: NaiveDateTime,
}

/// A show on an artist page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct ArtistShow {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: String,
    pub start_time: NaiveDateTime,
}

/// A row of the `/shows` listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct ShowListing {
    pub id: i64,
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: NaiveDateTime,
}

/// One venue joined with one of its shows (or none)
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct VenueAreaRow {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub start_time: Option<NaiveDateTime>,
}
