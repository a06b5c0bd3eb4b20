//! Error pages for the Fyyur site
//!
//! Failures render a static HTML page for the status code; the details go to
//! the log, never to the browser.

use axum::{
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

const NOT_FOUND_PAGE: &str = include_str!("../templates/errors/404.html");
const BAD_REQUEST_PAGE: &str = include_str!("../templates/errors/400.html");
const SERVER_ERROR_PAGE: &str = include_str!("../templates/errors/500.html");

/// Page handler error type
#[derive(Debug, Error)]
pub enum PageError {
    /// Unknown page or entity (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unreadable form submission (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Template lookup or rendering failed
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// fsnd-common error (database, I/O, ...)
    #[error("Common error: {0}")]
    Common(#[from] fsnd_common::Error),
}

impl From<sqlx::Error> for PageError {
    fn from(err: sqlx::Error) -> Self {
        PageError::Common(err.into())
    }
}

impl From<PathRejection> for PageError {
    fn from(rejection: PathRejection) -> Self {
        PageError::NotFound(rejection.body_text())
    }
}

impl PageError {
    pub fn status(&self) -> StatusCode {
        match self {
            PageError::NotFound(_) => StatusCode::NOT_FOUND,
            PageError::BadRequest(_) => StatusCode::BAD_REQUEST,
            PageError::Template(_) | PageError::Common(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Static error page for a status code
pub fn error_page(status: StatusCode) -> Response {
    let body = match status {
        StatusCode::NOT_FOUND => NOT_FOUND_PAGE,
        StatusCode::BAD_REQUEST => BAD_REQUEST_PAGE,
        _ => SERVER_ERROR_PAGE,
    };
    (status, Html(body)).into_response()
}

/// JSON failure body for the endpoints called from page scripts
pub fn json_error(status: StatusCode) -> Response {
    let message = match status {
        StatusCode::NOT_FOUND => "Not found",
        _ => "Internal server error",
    };
    let body = Json(json!({
        "success": false,
        "error": status.as_u16(),
        "message": message,
    }));
    (status, body).into_response()
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!("Page failed: {}", self);
        } else {
            warn!("Page rejected ({}): {}", status.as_u16(), self);
        }

        error_page(status)
    }
}
