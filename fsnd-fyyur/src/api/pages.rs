//! Home page and unknown routes

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use serde_json::json;

use crate::error::{error_page, PageError};
use crate::flash::Flash;
use crate::templates::Page;
use crate::AppState;

/// GET /
pub async fn index(State(state): State<AppState>, flash: Flash) -> Result<Page, PageError> {
    home(&state, flash)
}

/// Home page carrying `flash`; create handlers land here too
pub fn home(state: &AppState, flash: Flash) -> Result<Page, PageError> {
    state.templates.render("pages/home.html", flash, &json!({}))
}

/// Fallback for unknown routes
pub async fn not_found() -> Response {
    error_page(StatusCode::NOT_FOUND)
}
