//! HTTP surface for the preview resolver
//!
//! A single route, `POST /api/link-preview`. Failures of the preview itself
//! travel in-band as a `valid: false` result under HTTP 200; only a missing
//! `url` field (400) and an unreadable request body (500) use HTTP status
//! codes.

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use serde_json::json;

use crate::http::FetchOptions;
use crate::preview::PreviewResult;

/// Shared handler state.
#[derive(Clone, Default)]
pub struct AppState {
    /// Fetch options applied to every preview request
    pub options: FetchOptions,
}

/// Build the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/link-preview", post(link_preview))
        .with_state(state)
}

async fn link_preview(State(state): State<AppState>, body: Bytes) -> Response {
    // The body is taken raw so the error contract stays exact: unreadable
    // JSON is a 500, a readable body without a string `url` is a 400.
    let payload: serde_json::Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(err) => {
            tracing::error!(%err, "unreadable link-preview request body");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal server error" })),
            )
                .into_response();
        }
    };

    let Some(url) = payload.get("url").and_then(|value| value.as_str()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "URL is required" })),
        )
            .into_response();
    };

    let result = PreviewResult::resolve_with_options(url, state.options.clone()).await;
    tracing::debug!(url, valid = result.valid, "resolved link preview");
    Json(result).into_response()
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        router(AppState::default())
    }

    async fn post_json(app: Router, body: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/api/link-preview")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap();
        (status, value)
    }

    #[tokio::test]
    async fn missing_url_field_is_400() {
        let (status, body) = post_json(app(), r#"{"link": "https://example.com"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "URL is required");
    }

    #[tokio::test]
    async fn non_string_url_is_400() {
        let (status, body) = post_json(app(), r#"{"url": 42}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "URL is required");
    }

    #[tokio::test]
    async fn malformed_json_is_500() {
        let (status, body) = post_json(app(), "{not json").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
    }

    #[tokio::test]
    async fn invalid_url_is_200_with_in_band_failure() {
        let (status, body) = post_json(app(), r#"{"url": "not a url"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], false);
        assert_eq!(body["title"], "Invalid URL");
        assert_eq!(body["url"], "not a url");
    }

    #[tokio::test]
    async fn successful_preview_is_200() {
        use wiremock::matchers::method;
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        let html = r#"<html><head><meta property="og:title" content="OG Title"></head></html>"#;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(html))
            .mount(&server)
            .await;

        let state = AppState {
            options: FetchOptions::new().block_private_ips(false),
        };
        let payload = format!(r#"{{"url": "{}/"}}"#, server.uri());
        let (status, body) = post_json(router(state), &payload).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], true);
        assert_eq!(body["title"], "OG Title");
    }
}
