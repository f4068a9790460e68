//! Analyze API server-side handler
//!
//! Forwards `POST /analyze` to the configured analysis backend and relays
//! its status and body unchanged. Failures on our side are reported as
//! `{"detail": ...}` bodies so the browser shows them like backend errors.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use std::sync::Arc;

use crate::core::analysis::{ANALYZE_ENDPOINT, AnalyzeRequest};
use crate::core::config::Config;

/// Shared state for the proxy routes
pub struct AnalyzeApiState {
    analyzer_url: Option<String>,
    client: reqwest::Client,
}

impl AnalyzeApiState {
    pub fn new(config: &Config) -> Self {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.analyzer_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().unwrap_or_else(|e| {
            tracing::warn!("Failed to build analyzer client, using defaults: {}", e);
            reqwest::Client::new()
        });

        Self {
            analyzer_url: config.analyzer_url.clone(),
            client,
        }
    }
}

/// Error body in the shape the analysis backend uses
#[derive(Serialize)]
pub struct DetailResponse {
    pub detail: String,
}

/// Create the analyze API router
pub fn analyze_router(config: &Config) -> Router {
    let state = Arc::new(AnalyzeApiState::new(config));

    Router::new()
        .route(ANALYZE_ENDPOINT, post(analyze_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

async fn health_handler() -> &'static str {
    "ok"
}

async fn analyze_handler(
    State(state): State<Arc<AnalyzeApiState>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!("Rejected analyze request: {}", rejection.body_text());
            return detail_response(StatusCode::UNPROCESSABLE_ENTITY, &rejection.body_text());
        }
    };

    let Some(analyzer_url) = state.analyzer_url.as_deref() else {
        return detail_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "Analysis backend is not configured",
        );
    };

    tracing::info!(
        "Analyze request: query_len={}, upstream={}",
        request.sql_query.len(),
        analyzer_url
    );

    let response = match state.client.post(analyzer_url).json(&request).send().await {
        Ok(resp) => resp,
        Err(e) => {
            tracing::error!("Failed to reach analysis backend: {}", e);
            return detail_response(
                StatusCode::BAD_GATEWAY,
                &format!("Failed to reach analysis backend: {}", e),
            );
        }
    };

    let status = StatusCode::from_u16(response.status().as_u16())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/json")
        .to_string();

    match response.text().await {
        Ok(body) => {
            tracing::info!("Analysis backend response status: {}", status);
            if !status.is_success() {
                tracing::warn!("Analysis backend error response: {}", truncate_for_log(&body));
            } else {
                tracing::debug!("Analysis backend response body: {}", truncate_for_log(&body));
            }
            (status, [(header::CONTENT_TYPE, content_type)], body).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to read analysis backend response: {}", e);
            detail_response(
                StatusCode::BAD_GATEWAY,
                &format!("Failed to read analysis backend response: {}", e),
            )
        }
    }
}

fn detail_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(DetailResponse {
            detail: message.to_string(),
        }),
    )
        .into_response()
}

fn truncate_for_log(body: &str) -> String {
    const LIMIT: usize = 500;
    if body.len() <= LIMIT {
        return body.to_string();
    }
    let mut end = LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... (truncated, total {} bytes)", &body[..end], body.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use std::time::Duration;
    use tower::ServiceExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn analyze_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(ANALYZE_ENDPOINT)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    /// Spawn an in-process analysis backend and return its `/analyze` URL
    async fn spawn_backend(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/analyze", addr)
    }

    fn config_for(url: Option<String>) -> Config {
        Config {
            analyzer_url: url,
            analyzer_timeout: Some(Duration::from_secs(5)),
        }
    }

    #[tokio::test]
    async fn test_health() {
        let app = analyze_router(&config_for(None));
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unconfigured_backend_is_503() {
        let app = analyze_router(&config_for(None));

        let response = app.oneshot(analyze_request(r#"{"sql_query":"SELECT 1"}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = body_json(response).await;
        assert_eq!(body["detail"], "Analysis backend is not configured");
    }

    #[tokio::test]
    async fn test_malformed_body_is_422_with_detail() {
        let app = analyze_router(&config_for(None));

        let response = app.oneshot(analyze_request(r#"{"query":1}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert!(body["detail"].is_string());
    }

    #[tokio::test]
    async fn test_success_is_relayed() {
        let backend = Router::new().route(
            "/analyze",
            post(|Json(request): Json<AnalyzeRequest>| async move {
                Json(serde_json::json!({
                    "original_query": request.sql_query,
                    "optimized_query": "```sql\nSELECT id FROM t\n```\nRationale: use explicit columns",
                }))
            }),
        );
        let url = spawn_backend(backend).await;
        let app = analyze_router(&config_for(Some(url)));

        let response = app
            .oneshot(analyze_request(r#"{"sql_query":"SELECT * FROM t"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["original_query"], "SELECT * FROM t");
    }

    #[tokio::test]
    async fn test_backend_error_status_is_relayed() {
        let backend = Router::new().route(
            "/analyze",
            post(|| async {
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(serde_json::json!({ "detail": "invalid query" })),
                )
            }),
        );
        let url = spawn_backend(backend).await;
        let app = analyze_router(&config_for(Some(url)));

        let response = app.oneshot(analyze_request(r#"{"sql_query":"SELEC"}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["detail"], "invalid query");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_502() {
        // Grab a free port, then release it so nothing is listening there
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let app = analyze_router(&config_for(Some(format!("http://{}/analyze", addr))));

        let response = app.oneshot(analyze_request(r#"{"sql_query":"SELECT 1"}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert!(
            body["detail"]
                .as_str()
                .unwrap()
                .starts_with("Failed to reach analysis backend")
        );
    }

    #[test]
    fn test_truncate_for_log() {
        assert_eq!(truncate_for_log("short"), "short");
        let long = "é".repeat(400);
        let truncated = truncate_for_log(&long);
        assert!(truncated.contains("truncated, total 800 bytes"));
    }
}
