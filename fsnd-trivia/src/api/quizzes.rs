//! Quiz endpoint
//!
//! The quiz session lives on the client: each request carries the ids of
//! the questions already asked.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::db;
use crate::error::ApiError;
use crate::models::{LooseInt, Question};
use crate::AppState;

/// Category id meaning "any category"
pub const ALL_CATEGORIES: i64 = 0;

/// `POST /quizzes` body
#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub previous_questions: Vec<i64>,
    pub quiz_category: QuizCategory,
}

/// Category chosen for the quiz
#[derive(Debug, Deserialize)]
pub struct QuizCategory {
    pub id: LooseInt,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// Next question, or `""` when the pool is exhausted
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum NextQuestion {
    Question(Question),
    Exhausted(&'static str),
}

/// `POST /quizzes` response
#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub success: bool,
    pub question: NextQuestion,
}

/// Category filter for a quiz, `None` meaning all categories
pub fn category_filter(category: &QuizCategory) -> Result<Option<String>, ApiError> {
    let id = category.id.value().ok_or_else(|| {
        ApiError::Unprocessable(format!("quiz category id is not a number: {:?}", category.id))
    })?;

    Ok((id != ALL_CATEGORIES).then(|| id.to_string()))
}

/// POST /quizzes
///
/// Picks a random question not in `previous_questions`, restricted to the
/// quiz category unless it is 0.
pub async fn play_quiz(
    State(state): State<AppState>,
    payload: Result<Json<QuizRequest>, JsonRejection>,
) -> Result<Json<QuizResponse>, ApiError> {
    let Json(body) = payload?;
    let category = category_filter(&body.quiz_category)?;
    debug!(
        "Quiz round in {:?} with {} previous questions",
        body.quiz_category.kind.as_deref().unwrap_or("any category"),
        body.previous_questions.len()
    );

    let candidates = db::questions::quiz_candidates(
        &state.db,
        category.as_deref(),
        &body.previous_questions,
    )
    .await?;

    let question = match candidates.choose(&mut rand::thread_rng()) {
        Some(q) => NextQuestion::Question(q.clone()),
        None => NextQuestion::Exhausted(""),
    };

    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}
