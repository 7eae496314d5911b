//! HTTP adapter for the turn endpoint.

mod dto;
mod handlers;
mod routes;

pub use dto::{HoneypotRequest, HoneypotResponse, MessageDto};
pub use handlers::HoneypotHandlers;
pub use routes::honeypot_routes;
