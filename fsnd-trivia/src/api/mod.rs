//! HTTP API handlers for the trivia service

pub mod categories;
pub mod questions;
pub mod quizzes;

pub use categories::{get_categories, get_category_questions};
pub use questions::{create_question, delete_question, get_questions, search_questions};
pub use quizzes::play_quiz;

use crate::error::envelope;
use axum::http::StatusCode;
use axum::response::Response;

/// Fallback for unknown routes
pub async fn not_found() -> Response {
    envelope(StatusCode::NOT_FOUND)
}
