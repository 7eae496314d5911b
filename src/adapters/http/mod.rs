//! HTTP adapters - REST API implementations.
//!
//! - `honeypot` - turn endpoint, mounted at `/honeypot` and `/api/v1/honeypot`
//! - `session` - operator endpoints under `/api/v1/sessions`, review queue included
//! - `decisions` - detection decision log at `/api/v1/decisions`
//! - `health` - public `/` and `/health`
//!
//! Everything except the health routes sits behind the `x-api-key` check.

pub mod decisions;
pub mod health;
pub mod honeypot;
pub mod middleware;
pub mod session;

use std::time::Duration;

use axum::{http::HeaderValue, middleware as axum_mw, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use decisions::{decision_routes, DecisionHandlers};
pub use health::health_routes;
pub use honeypot::{honeypot_routes, HoneypotHandlers};
pub use middleware::{api_key_middleware, ApiKeyState};
pub use session::{review_routes, session_routes, ErrorResponse, ReviewHandlers, SessionHandlers};

/// Cross-cutting router settings.
#[derive(Debug, Clone)]
pub struct RouterSettings {
    /// Allowed CORS origins; empty allows any.
    pub cors_origins: Vec<String>,
    pub request_timeout: Duration,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            cors_origins: Vec::new(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Build the full axum router with all routes and middleware.
pub fn build_router(
    honeypot: HoneypotHandlers,
    sessions: SessionHandlers,
    review: ReviewHandlers,
    decisions: DecisionHandlers,
    api_key: ApiKeyState,
    settings: &RouterSettings,
) -> Router {
    // Routes that require the API key
    let api_v1 = Router::new()
        .merge(honeypot_routes(honeypot.clone()))
        .nest("/sessions", session_routes(sessions).merge(review_routes(review)))
        .merge(decision_routes(decisions));
    let protected = Router::new()
        .merge(honeypot_routes(honeypot))
        .nest("/api/v1", api_v1)
        .layer(axum_mw::from_fn_with_state(api_key, api_key_middleware));

    health_routes()
        .merge(protected)
        .layer(TimeoutLayer::new(settings.request_timeout))
        .layer(cors_layer(&settings.cors_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return base.allow_origin(Any);
    }
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(allowed)
}
