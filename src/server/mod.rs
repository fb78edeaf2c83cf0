//! Axum-based HTTP server for folio-relay.
//!
//! Exposes the chat relay to the portfolio front-end alongside health and
//! metrics endpoints.
//!
//! # Components
//!
//! - `handlers`: Implementation of individual endpoints (chat, suggestions, health, metrics).
//! - `middleware`: Request ID tracking, CORS and body limits.
//! - `routes`: The main router configuration that ties everything together.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod handlers;
mod middleware;
mod routes;

pub use handlers::{HealthResponse, HealthStatus, SuggestionsResponse};
pub use routes::{create_router, AppState};
