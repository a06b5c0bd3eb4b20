//! fsnd-trivia library - Trivia quiz JSON API
//!
//! Questions grouped into categories, paginated listings, search, and a quiz
//! endpoint that never repeats a question the client has already seen.

use axum::http::{header, Method};
use axum::routing::{delete, get, post};
use axum::Router;
use sqlx::SqlitePool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod error;
pub mod models;
pub mod pagination;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// CORS policy: any origin, the methods and headers the quiz client uses
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(api::get_categories))
        .route("/categories/:id/questions", get(api::get_category_questions))
        .route(
            "/questions",
            get(api::get_questions).post(api::create_question),
        )
        .route("/questions/:id", delete(api::delete_question))
        .route("/search", post(api::search_questions))
        .route("/quizzes", post(api::play_quiz))
        .merge(fsnd_common::api::health_routes::<AppState>(
            "fsnd-trivia",
            env!("CARGO_PKG_VERSION"),
        ))
        .fallback(api::not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
}
