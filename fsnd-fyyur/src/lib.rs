//! fsnd-fyyur library - Venue and artist booking site
//!
//! Server-rendered pages for listing venues and artists, searching them, and
//! booking shows between the two.

use axum::routing::{get, post};
use axum::Router;
use chrono::NaiveDateTime;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod choices;
pub mod db;
pub mod error;
pub mod flash;
pub mod forms;
pub mod listing;
pub mod models;
pub mod templates;

use templates::Templates;

/// Source of "now" for splitting past and upcoming shows
pub type Clock = fn() -> NaiveDateTime;

/// Local wall-clock time, matching how show times are entered
pub fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Compiled page templates
    pub templates: Arc<Templates>,
    clock: Clock,
}

impl AppState {
    /// Create new application state using the local clock
    pub fn new(db: SqlitePool, templates: Templates) -> Self {
        Self {
            db,
            templates: Arc::new(templates),
            clock: local_now,
        }
    }

    /// Replace the clock (tests pin "now" to a fixed instant)
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn now(&self) -> NaiveDateTime {
        (self.clock)()
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::pages::index))
        // Venues
        .route("/venues", get(api::venues::list_venues))
        .route("/venues/search", post(api::venues::search_venues))
        .route(
            "/venues/create",
            get(api::venues::create_venue_form).post(api::venues::create_venue_submission),
        )
        .route(
            "/venues/:id",
            get(api::venues::show_venue).delete(api::venues::delete_venue),
        )
        .route(
            "/venues/:id/edit",
            get(api::venues::edit_venue_form).post(api::venues::edit_venue_submission),
        )
        // Artists
        .route("/artists", get(api::artists::list_artists))
        .route("/artists/search", post(api::artists::search_artists))
        .route(
            "/artists/create",
            get(api::artists::create_artist_form).post(api::artists::create_artist_submission),
        )
        .route("/artists/:id", get(api::artists::show_artist))
        .route(
            "/artists/:id/edit",
            get(api::artists::edit_artist_form).post(api::artists::edit_artist_submission),
        )
        // Shows
        .route("/shows", get(api::shows::list_shows))
        .route(
            "/shows/create",
            get(api::shows::create_show_form).post(api::shows::create_show_submission),
        )
        .merge(fsnd_common::api::health_routes::<AppState>(
            "fsnd-fyyur",
            env!("CARGO_PKG_VERSION"),
        ))
        .fallback(api::pages::not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
