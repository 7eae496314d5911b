//! Public liveness endpoints.

use axum::{routing::get, Json, Router};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

/// GET / - Service information
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: "Agentic Honeypot API",
        version: env!("CARGO_PKG_VERSION"),
        status: "running",
    })
}

/// GET /health - Liveness probe
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "honeypot-api",
    })
}

pub fn health_routes() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
}
