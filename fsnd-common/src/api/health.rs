//! Health check endpoint

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// Health check response: status, module name, and version
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
}

/// Build the `GET /health` route for a service
///
/// Generic over the router state so each service can merge it directly.
/// Callers pass their own `env!("CARGO_PKG_VERSION")`.
pub fn health_routes<S>(module: &'static str, version: &'static str) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route(
        "/health",
        get(move || async move {
            Json(HealthResponse {
                status: "ok".to_string(),
                module: module.to_string(),
                version: version.to_string(),
            })
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::util::ServiceExt;

    #[tokio::test]
    async fn test_health_reports_module() {
        let app: Router = health_routes("fsnd-test", "9.8.7");
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["module"], "fsnd-test");
        assert_eq!(body["version"], "9.8.7");
    }
}
