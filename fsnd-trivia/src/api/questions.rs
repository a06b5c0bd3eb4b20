//! Question endpoints: listing, search, creation and deletion

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

use crate::db::{self, questions::QuestionFilter};
use crate::error::ApiError;
use crate::models::{LooseInt, NewQuestion, Question};
use crate::pagination::{page_window, parse_page};
use crate::AppState;

/// `?page=N` query parameter
///
/// Kept as text so a non-numeric value falls back to page 1.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// `GET /questions` response
#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: i64,
    pub categories: BTreeMap<i64, String>,
    pub current_category: String,
}

/// `POST /questions` body; every field must be present and non-empty
#[derive(Debug, Default, Deserialize)]
pub struct CreateQuestionRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<LooseInt>,
    pub difficulty: Option<LooseInt>,
}

/// `POST /questions` response echoing the stored fields
#[derive(Debug, Serialize)]
pub struct CreateQuestionResponse {
    pub success: bool,
    pub created: i64,
    pub question: String,
    pub answer: String,
    pub category: String,
    pub difficulty: i64,
}

/// `DELETE /questions/:id` response
#[derive(Debug, Serialize)]
pub struct DeleteQuestionResponse {
    pub success: bool,
    pub deleted: i64,
}

/// `POST /search` body
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm")]
    pub search_term: String,
}

/// `POST /search` response
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub search_term: String,
    pub questions: Vec<Question>,
    pub total_questions: i64,
}

/// Count, window and fetch one page of `filter`
async fn fetch_page(
    state: &AppState,
    filter: QuestionFilter<'_>,
    query: &PageQuery,
) -> Result<(Vec<Question>, i64), ApiError> {
    let total = db::questions::count_questions(&state.db, filter).await?;
    let page = parse_page(query.page.as_deref());
    let window =
        page_window(page, total).ok_or_else(|| ApiError::NotFound(format!("page {}", page)))?;

    let questions =
        db::questions::list_questions(&state.db, filter, window.offset, window.limit).await?;

    Ok((questions, total))
}

/// GET /questions?page=N
///
/// Ten questions per page, the total count of all questions, and the
/// category mapping.
pub async fn get_questions(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<QuestionsResponse>, ApiError> {
    let (questions, total_questions) = fetch_page(&state, QuestionFilter::All, &query).await?;
    let categories = db::categories::list_categories(&state.db).await?;

    Ok(Json(QuestionsResponse {
        success: true,
        questions,
        total_questions,
        categories: db::categories::category_map(&categories),
        current_category: String::new(),
    }))
}

/// DELETE /questions/:id
pub async fn delete_question(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeleteQuestionResponse>, ApiError> {
    let Path(id) = path?;

    if !db::questions::delete_question(&state.db, id).await? {
        return Err(ApiError::NotFound(format!("question {}", id)));
    }

    info!("Deleted question {}", id);
    Ok(Json(DeleteQuestionResponse {
        success: true,
        deleted: id,
    }))
}

/// Turn a request body into a storable question
///
/// Blank or missing fields make the payload incomplete (400); a difficulty
/// that is not a number cannot be processed (422).
pub fn validate_new_question(body: CreateQuestionRequest) -> Result<NewQuestion, ApiError> {
    let question = non_blank(body.question, "question")?;
    let answer = non_blank(body.answer, "answer")?;

    let category = match body.category {
        Some(c) if !c.is_blank() => c,
        _ => return Err(ApiError::BadRequest("missing field: category".to_string())),
    };
    let difficulty = match body.difficulty {
        Some(d) if !d.is_blank() => d,
        _ => return Err(ApiError::BadRequest("missing field: difficulty".to_string())),
    };

    let category = match category {
        LooseInt::Number(n) => n.to_string(),
        LooseInt::Text(s) => s.trim().to_string(),
    };
    let difficulty = difficulty
        .value()
        .ok_or_else(|| ApiError::Unprocessable("difficulty must be an integer".to_string()))?;

    Ok(NewQuestion {
        question,
        answer,
        category,
        difficulty,
    })
}

fn non_blank(value: Option<String>, field: &str) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::BadRequest(format!("missing field: {}", field))),
    }
}

/// POST /questions
pub async fn create_question(
    State(state): State<AppState>,
    payload: Result<Json<CreateQuestionRequest>, JsonRejection>,
) -> Result<Json<CreateQuestionResponse>, ApiError> {
    let Json(body) = payload?;
    let new = validate_new_question(body)?;

    let id = db::questions::insert_question(&state.db, &new).await?;
    info!("Created question {} in category {}", id, new.category);

    Ok(Json(CreateQuestionResponse {
        success: true,
        created: id,
        question: new.question,
        answer: new.answer,
        category: new.category,
        difficulty: new.difficulty,
    }))
}

/// POST /search?page=N
///
/// Case-insensitive substring search over question text.
pub async fn search_questions(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Json(body) = payload?;

    let matches = db::questions::search_questions(&state.db, &body.search_term).await?;
    let total_questions = matches.len() as i64;
    let page = parse_page(query.page.as_deref());
    let window = page_window(page, total_questions)
        .ok_or_else(|| ApiError::NotFound(format!("page {}", page)))?;

    Ok(Json(SearchResponse {
        success: true,
        search_term: body.search_term,
        questions: window.slice(matches),
        total_questions,
    }))
}
