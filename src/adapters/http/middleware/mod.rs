//! HTTP middleware for axum.
//!
//! - `api_key` - Shared-secret `x-api-key` check

pub mod api_key;

pub use api_key::{api_key_middleware, ApiKeyState, API_KEY_HEADER};
