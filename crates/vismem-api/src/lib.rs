//! Axum HTTP API server for the visual continuity memory service.
//!
//! This crate provides:
//! - The analyze endpoint wrapping the pure analysis engine
//! - Scene plan seeding and memory read endpoints
//! - Rate limiting, request ids, and request logging
//! - Prometheus metrics

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
