//! Integration tests for the trivia API endpoints
//!
//! Each test runs the router against a fresh SQLite file in a temp dir,
//! seeded with the default categories plus a known set of questions.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use fsnd_trivia::models::NewQuestion;
use fsnd_trivia::{build_router, db, AppState};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use std::collections::HashSet;
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot` method

/// Test database; the TempDir must outlive the pool
struct TestDb {
    _dir: TempDir,
    pool: SqlitePool,
}

/// Test helper: fresh database with `question_count` questions
///
/// Question `n` (1-based) is "Question number n?" in category
/// `(n % 2) + 1` (Science/Art alternating), difficulty 1.
async fn setup_test_db(question_count: usize) -> TestDb {
    let dir = tempfile::tempdir().expect("Should create temp dir");
    let pool = db::init_database(&dir.path().join("trivia.db"))
        .await
        .expect("Should initialize database");

    for n in 1..=question_count {
        db::questions::insert_question(
            &pool,
            &NewQuestion {
                question: format!("Question number {}?", n),
                answer: format!("Answer {}", n),
                category: ((n % 2) + 1).to_string(),
                difficulty: 1,
            },
        )
        .await
        .expect("Should insert question");
    }

    TestDb { _dir: dir, pool }
}

fn setup_app(db: &TestDb) -> Router {
    build_router(AppState::new(db.pool.clone()))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    (status, extract_json(response.into_body()).await)
}

// =============================================================================
// Categories
// =============================================================================

#[tokio::test]
async fn test_get_categories() {
    let db = setup_test_db(0).await;

    let (status, body) = send(setup_app(&db), get("/categories")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["categories"]["1"], "Science");
    assert_eq!(body["categories"]["6"], "Sports");
}

#[tokio::test]
async fn test_category_questions() {
    let db = setup_test_db(6).await;

    let (status, body) = send(setup_app(&db), get("/categories/2/questions")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current_category"], "Art");
    assert_eq!(body["total_questions"], 3);
    for q in body["questions"].as_array().unwrap() {
        assert_eq!(q["category"], "2");
    }
}

#[tokio::test]
async fn test_category_questions_later_page() {
    // Odd-numbered questions land in category 2: 13 of 25
    let db = setup_test_db(25).await;

    let (status, body) = send(setup_app(&db), get("/categories/2/questions?page=2")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_questions"], 13);
    let questions = body["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 3);
    assert_eq!(questions[0]["question"], "Question number 21?");
    assert!(questions.iter().all(|q| q["category"] == "2"));

    let (status, _) = send(setup_app(&db), get("/categories/2/questions?page=3")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_category_questions_unknown_category() {
    let db = setup_test_db(2).await;

    let (status, body) = send(setup_app(&db), get("/categories/99/questions")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], 404);
    assert_eq!(body["message"], "Not found");
}

// =============================================================================
// Question listing
// =============================================================================

#[tokio::test]
async fn test_get_questions_first_page() {
    let db = setup_test_db(25).await;

    let (status, body) = send(setup_app(&db), get("/questions")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["questions"].as_array().unwrap().len(), 10);
    assert_eq!(body["total_questions"], 25);
    assert_eq!(body["current_category"], "");
    assert!(body["categories"].is_object());
}

#[tokio::test]
async fn test_get_questions_last_page() {
    let db = setup_test_db(25).await;

    let (status, body) = send(setup_app(&db), get("/questions?page=3")).await;

    assert_eq!(status, StatusCode::OK);
    let questions = body["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 5);
    assert_eq!(questions[0]["question"], "Question number 21?");
}

#[tokio::test]
async fn test_get_questions_page_out_of_range() {
    let db = setup_test_db(25).await;

    let (status, body) = send(setup_app(&db), get("/questions?page=33")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], 404);
}

#[tokio::test]
async fn test_get_questions_empty_database() {
    let db = setup_test_db(0).await;

    let (status, body) = send(setup_app(&db), get("/questions")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_questions"], 0);
    assert!(body["questions"].as_array().unwrap().is_empty());
}

// =============================================================================
// Deletion
// =============================================================================

#[tokio::test]
async fn test_delete_question() {
    let db = setup_test_db(3).await;

    let (status, body) = send(setup_app(&db), delete("/questions/2")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["deleted"], 2);
    assert!(db::questions::get_question(&db.pool, 2)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_delete_missing_question() {
    let db = setup_test_db(3).await;

    let (status, body) = send(setup_app(&db), delete("/questions/2200")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], 404);
}

// =============================================================================
// Creation
// =============================================================================

#[tokio::test]
async fn test_create_question() {
    let db = setup_test_db(0).await;

    let (status, body) = send(
        setup_app(&db),
        post_json(
            "/questions",
            json!({
                "question": "What is the largest planet?",
                "answer": "Jupiter",
                "category": 1,
                "difficulty": "2"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["question"], "What is the largest planet?");
    assert_eq!(body["category"], "1");
    assert_eq!(body["difficulty"], 2);

    let id = body["created"].as_i64().unwrap();
    let stored = db::questions::get_question(&db.pool, id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.answer, "Jupiter");
}

#[tokio::test]
async fn test_create_question_incomplete() {
    let db = setup_test_db(0).await;

    let (status, body) = send(
        setup_app(&db),
        post_json(
            "/questions",
            json!({"question": "Half a question", "answer": "", "category": 1}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], 400);
    assert_eq!(body["message"], "Bad request");
}

#[tokio::test]
async fn test_create_question_without_json_content_type() {
    let db = setup_test_db(0).await;

    let request = Request::builder()
        .method("POST")
        .uri("/questions")
        .body(Body::from("question=plain"))
        .unwrap();
    let (status, body) = send(setup_app(&db), request).await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["error"], 415);
}

#[tokio::test]
async fn test_create_question_malformed_json() {
    let db = setup_test_db(0).await;

    let request = Request::builder()
        .method("POST")
        .uri("/questions")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"question\": "))
        .unwrap();
    let (status, _) = send(setup_app(&db), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Search
// =============================================================================

#[tokio::test]
async fn test_search_is_case_insensitive_substring() {
    let db = setup_test_db(12).await;

    let (status, body) = send(
        setup_app(&db),
        post_json("/search", json!({"searchTerm": "NUMBER 1"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["search_term"], "NUMBER 1");
    // "Question number 1?", "... 10?", "... 11?", "... 12?"
    assert_eq!(body["total_questions"], 4);
    let texts: Vec<&str> = body["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["question"].as_str().unwrap())
        .collect();
    assert!(texts.iter().all(|t| t.to_lowercase().contains("number 1")));
}

#[tokio::test]
async fn test_search_folds_non_ascii_case() {
    let db = setup_test_db(3).await;
    db::questions::insert_question(
        &db.pool,
        &NewQuestion {
            question: "What is an ÉCLAIR?".to_string(),
            answer: "A pastry".to_string(),
            category: "4".to_string(),
            difficulty: 1,
        },
    )
    .await
    .unwrap();

    let (status, body) = send(
        setup_app(&db),
        post_json("/search", json!({"searchTerm": "éclair"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_questions"], 1);
    assert_eq!(body["questions"][0]["question"], "What is an ÉCLAIR?");
}

#[tokio::test]
async fn test_search_later_page() {
    let db = setup_test_db(25).await;

    let (status, body) = send(
        setup_app(&db),
        post_json("/search?page=3", json!({"searchTerm": "question"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_questions"], 25);
    let questions = body["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 5);
    assert_eq!(questions[0]["question"], "Question number 21?");

    let (status, body) = send(
        setup_app(&db),
        post_json("/search?page=4", json!({"searchTerm": "question"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_search_no_match() {
    let db = setup_test_db(3).await;

    let (status, body) = send(
        setup_app(&db),
        post_json("/search", json!({"searchTerm": "xylophone"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_questions"], 0);
}

#[tokio::test]
async fn test_search_missing_term_is_unprocessable() {
    let db = setup_test_db(3).await;

    let (status, body) = send(setup_app(&db), post_json("/search", json!({}))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Unprocessable");
}

// =============================================================================
// Quizzes
// =============================================================================

#[tokio::test]
async fn test_quiz_never_repeats_previous_questions() {
    let db = setup_test_db(5).await;
    let mut previous: Vec<i64> = Vec::new();

    for _ in 0..5 {
        let (status, body) = send(
            setup_app(&db),
            post_json(
                "/quizzes",
                json!({"previous_questions": previous, "quiz_category": {"id": 0, "type": "click"}}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let id = body["question"]["id"].as_i64().expect("question expected");
        assert!(!previous.contains(&id), "question {} was repeated", id);
        previous.push(id);
    }

    let unique: HashSet<i64> = previous.iter().copied().collect();
    assert_eq!(unique.len(), 5);

    // Pool exhausted
    let (status, body) = send(
        setup_app(&db),
        post_json(
            "/quizzes",
            json!({"previous_questions": previous, "quiz_category": {"id": 0}}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["question"], "");
}

#[tokio::test]
async fn test_quiz_accepts_very_long_history() {
    let db = setup_test_db(3).await;
    // More ids than SQLite allows bind parameters in one statement
    let mut previous: Vec<i64> = (1000..41_000).collect();
    previous.extend([1, 2]);

    let (status, body) = send(
        setup_app(&db),
        post_json(
            "/quizzes",
            json!({"previous_questions": previous, "quiz_category": {"id": 0}}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["question"]["id"], 3);
}

#[tokio::test]
async fn test_quiz_restricted_to_category() {
    let db = setup_test_db(8).await;

    for _ in 0..10 {
        let (status, body) = send(
            setup_app(&db),
            post_json(
                "/quizzes",
                json!({"previous_questions": [], "quiz_category": {"id": "2", "type": "Art"}}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["question"]["category"], "2");
    }
}

#[tokio::test]
async fn test_quiz_missing_category_is_unprocessable() {
    let db = setup_test_db(2).await;

    let (status, _) = send(
        setup_app(&db),
        post_json("/quizzes", json!({"previous_questions": []})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

// =============================================================================
// Misc
// =============================================================================

#[tokio::test]
async fn test_unknown_route_returns_envelope() {
    let db = setup_test_db(0).await;

    let (status, body) = send(setup_app(&db), get("/nope")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let db = setup_test_db(0).await;

    let request = Request::builder()
        .method("GET")
        .uri("/categories")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = setup_app(&db).oneshot(request).await.unwrap();

    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_health_endpoint() {
    let db = setup_test_db(0).await;

    let (status, body) = send(setup_app(&db), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["module"], "fsnd-trivia");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
