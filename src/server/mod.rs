//! Server module for building the dashboard HTTP server
//!
//! This module provides a `ServerBuilder` that registers:
//! - The sales listing and filter options routes
//! - Health check routes
//! - Request tracing and CORS layers

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::AppState;
