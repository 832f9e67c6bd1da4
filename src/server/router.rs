//! Router builder for the sales API

use crate::server::handlers::{AppState, filter_options, health_check, list_sales};
use axum::{Router, routing::get};

/// Build the sales routes
///
/// - GET /api/sales - Search, filter, sort and paginate records with metrics
/// - GET /api/sales/filter-options - Values available to the multi-select filters
pub fn build_sales_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/sales", get(list_sales))
        .route("/api/sales/filter-options", get(filter_options))
        .with_state(state)
}

/// Build health check routes
pub fn build_health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}
