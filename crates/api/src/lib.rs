//! REST API server and endpoints.
//!
//! This crate provides the read-only HTTP surface of the vault analytics
//! service:
//! - The APY estimate endpoint
//! - Health check
//! - Request tracing and CORS layers

/// Route definitions and handlers.
pub mod routes;
/// Server configuration and startup.
pub mod server;
/// Application state.
pub mod state;

pub use routes::router;
pub use server::{ApiServer, ServerConfig};
pub use state::AppState;
