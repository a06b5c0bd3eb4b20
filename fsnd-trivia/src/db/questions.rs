//! Question queries

use crate::models::{NewQuestion, Question};
use fsnd_common::search::filter_matches;
use fsnd_common::Result;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::collections::HashSet;

const QUESTION_COLUMNS: &str = "SELECT id, question, answer, category, difficulty FROM questions";

/// Which questions a listing covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionFilter<'a> {
    All,
    /// Category id, compared as text
    Category(&'a str),
}

fn push_filter<'a>(builder: &mut QueryBuilder<'a, Sqlite>, filter: QuestionFilter<'a>) {
    match filter {
        QuestionFilter::All => {}
        QuestionFilter::Category(category) => {
            builder.push(" WHERE category = ").push_bind(category);
        }
    }
}

/// Number of questions matching `filter`
pub async fn count_questions(pool: &SqlitePool, filter: QuestionFilter<'_>) -> Result<i64> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM questions");
    push_filter(&mut builder, filter);

    let total = builder.build_query_scalar::<i64>().fetch_one(pool).await?;
    Ok(total)
}

/// One page of questions matching `filter`, ordered by id
pub async fn list_questions(
    pool: &SqlitePool,
    filter: QuestionFilter<'_>,
    offset: i64,
    limit: i64,
) -> Result<Vec<Question>> {
    let mut builder = QueryBuilder::new(QUESTION_COLUMNS);
    push_filter(&mut builder, filter);
    builder
        .push(" ORDER BY id LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);

    let questions = builder.build_query_as::<Question>().fetch_all(pool).await?;
    Ok(questions)
}

/// Every question whose text contains `term`, ignoring case, ordered by id
pub async fn search_questions(pool: &SqlitePool, term: &str) -> Result<Vec<Question>> {
    let questions = sqlx::query_as::<_, Question>(&format!("{} ORDER BY id", QUESTION_COLUMNS))
        .fetch_all(pool)
        .await?;

    Ok(filter_matches(questions, term, |q| q.question.as_str()))
}

/// One question by id
pub async fn get_question(pool: &SqlitePool, id: i64) -> Result<Option<Question>> {
    let question = sqlx::query_as::<_, Question>(&format!("{} WHERE id = ?", QUESTION_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(question)
}

/// Insert a question, returning its id
pub async fn insert_question(pool: &SqlitePool, new: &NewQuestion) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let id = sqlx::query(
        "INSERT INTO questions (question, answer, category, difficulty) VALUES (?, ?, ?, ?)",
    )
    .bind(&new.question)
    .bind(&new.answer)
    .bind(&new.category)
    .bind(new.difficulty)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    tx.commit().await?;
    Ok(id)
}

/// Delete a question; false when no row had that id
pub async fn delete_question(pool: &SqlitePool, id: i64) -> Result<bool> {
    let mut tx = pool.begin().await?;

    let affected = sqlx::query("DELETE FROM questions WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;
    Ok(affected > 0)
}

/// Questions still available to a quiz
///
/// Excludes `previous` ids and, when `category` is given, keeps only that
/// category. The exclusion runs in memory so any number of previous ids
/// works.
pub async fn quiz_candidates(
    pool: &SqlitePool,
    category: Option<&str>,
    previous: &[i64],
) -> Result<Vec<Question>> {
    let mut builder = QueryBuilder::<Sqlite>::new(QUESTION_COLUMNS);
    if let Some(category) = category {
        builder.push(" WHERE category = ").push_bind(category);
    }
    builder.push(" ORDER BY id");

    let mut questions = builder.build_query_as::<Question>().fetch_all(pool).await?;

    let asked: HashSet<i64> = previous.iter().copied().collect();
    questions.retain(|q| !asked.contains(&q.id));
    Ok(questions)
}
