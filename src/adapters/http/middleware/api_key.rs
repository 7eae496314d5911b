//! Shared-secret API key middleware.
//!
//! Requests must carry the configured key in the `x-api-key` header. The
//! comparison is constant-time. When no key is configured the check is off.
//!
//! ```ignore
//! let protected = Router::new()
//!     .route("/honeypot", post(handle_turn))
//!     .layer(middleware::from_fn_with_state(api_key, api_key_middleware));
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use secrecy::{ExposeSecret, Secret};
use subtle::ConstantTimeEq;

use crate::adapters::http::session::ErrorResponse;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Expected key, if any.
#[derive(Clone, Default)]
pub struct ApiKeyState {
    expected: Option<Arc<Secret<String>>>,
}

impl ApiKeyState {
    pub fn new(expected: Option<Secret<String>>) -> Self {
        Self {
            expected: expected
                .filter(|k| !k.expose_secret().is_empty())
                .map(Arc::new),
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.expected.is_some()
    }

    fn accepts(&self, presented: &str) -> bool {
        match &self.expected {
            None => true,
            Some(expected) => expected
                .expose_secret()
                .as_bytes()
                .ct_eq(presented.as_bytes())
                .into(),
        }
    }
}

/// Rejects requests without a matching `x-api-key` header.
pub async fn api_key_middleware(
    State(state): State<ApiKeyState>,
    request: Request,
    next: Next,
) -> Response {
    if !state.is_enabled() {
        return next.run(request).await;
    }

    let presented = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|h| h.to_str().ok());

    match presented {
        None => unauthorized("Missing API key. Provide the 'x-api-key' header."),
        Some(key) if !state.accepts(key) => {
            tracing::warn!(path = %request.uri().path(), "Rejected request with invalid API key");
            unauthorized("Invalid API key.")
        }
        Some(_) => next.run(request).await,
    }
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse::unauthorized(message)),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, middleware, routing::get, Router};
    use tower::ServiceExt;

    fn app(state: ApiKeyState) -> Router {
        Router::new()
            .route("/protected", get(|| async { "ok" }))
            .layer(middleware::from_fn_with_state(state, api_key_middleware))
    }

    fn request(key: Option<&str>) -> Request {
        let mut builder = Request::builder().uri("/protected");
        if let Some(key) = key {
            builder = builder.header(API_KEY_HEADER, key);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn keyed() -> ApiKeyState {
        ApiKeyState::new(Some(Secret::new("s3cret".to_string())))
    }

    #[tokio::test]
    async fn missing_key_is_unauthorized() {
        let response = app(keyed()).oneshot(request(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn wrong_key_is_unauthorized() {
        let response = app(keyed()).oneshot(request(Some("s3cre"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn matching_key_passes() {
        let response = app(keyed()).oneshot(request(Some("s3cret"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn disabled_check_passes_everything() {
        let response = app(ApiKeyState::new(Some(Secret::new(String::new()))))
            .oneshot(request(None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
