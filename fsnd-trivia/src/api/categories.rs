//! Category endpoints

use axum::{
    extract::{rejection::PathRejection, Path, Query, State},
    Json,
};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::api::questions::PageQuery;
use crate::db::{self, questions::QuestionFilter};
use crate::error::ApiError;
use crate::models::Question;
use crate::pagination::{page_window, parse_page};
use crate::AppState;

/// `GET /categories` response
#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: BTreeMap<i64, String>,
}

/// `GET /categories/:id/questions` response
#[derive(Debug, Serialize)]
pub struct CategoryQuestionsResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: i64,
    pub current_category: String,
}

/// GET /categories
///
/// Mapping of category id to type label.
pub async fn get_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let categories = db::categories::list_categories(&state.db).await?;

    Ok(Json(CategoriesResponse {
        success: true,
        categories: db::categories::category_map(&categories),
    }))
}

/// GET /categories/:id/questions?page=N
///
/// Paginated questions of one category.
pub async fn get_category_questions(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    Query(query): Query<PageQuery>,
) -> Result<Json<CategoryQuestionsResponse>, ApiError> {
    let Path(category_id) = path?;
    let category = db::categories::get_category(&state.db, category_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("category {}", category_id)))?;

    let key = category_id.to_string();
    let filter = QuestionFilter::Category(&key);

    let total_questions = db::questions::count_questions(&state.db, filter).await?;
    let page = parse_page(query.page.as_deref());
    let window = page_window(page, total_questions)
        .ok_or_else(|| ApiError::NotFound(format!("page {}", page)))?;

    let questions =
        db::questions::list_questions(&state.db, filter, window.offset, window.limit).await?;

    Ok(Json(CategoryQuestionsResponse {
        success: true,
        questions,
        total_questions,
        current_category: category.kind,
    }))
}
