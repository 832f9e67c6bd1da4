//! HTTP handlers for the sales API
//!
//! Handlers are thin: decode raw parameters, normalize them, hand the `FilterSpec` to
//! the query service and shape the response.

use crate::core::error::{DashboardError, RequestFailure};
use crate::core::metrics::SalesMetrics;
use crate::core::query::{PaginationMeta, QueryNormalizer, SalesQueryParams};
use crate::core::record::SaleRecord;
use crate::core::resolver::ResultPage;
use crate::core::service::SalesQueryService;
use crate::core::store::FilterOptions;
use axum::Json;
use axum::extract::{Query, State};
use serde::Serialize;
use serde_json::{Value, json};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: SalesQueryService,
    pub normalizer: QueryNormalizer,
}

/// Response for the sales listing endpoint
#[derive(Debug, Serialize)]
pub struct SalesListResponse {
    pub success: bool,
    pub data: Vec<SaleRecord>,
    pub pagination: PaginationMeta,
    pub metrics: SalesMetrics,
}

impl From<ResultPage> for SalesListResponse {
    fn from(page: ResultPage) -> Self {
        Self {
            success: true,
            data: page.records,
            pagination: page.pagination,
            metrics: page.metrics,
        }
    }
}

/// Response for the filter options endpoint
#[derive(Debug, Serialize)]
pub struct FilterOptionsResponse {
    pub success: bool,
    pub data: FilterOptions,
}

/// GET /api/sales
///
/// Parameters are taken as raw pairs so that repeated or unknown keys never
/// reject the request.
pub async fn list_sales(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<SalesListResponse>, RequestFailure> {
    let params = SalesQueryParams::from_pairs(pairs);
    let spec = state.normalizer.normalize(&params);

    let page = state
        .service
        .query(&spec)
        .await
        .map_err(|e| DashboardError::from(e).context("Error fetching sales data"))?;

    Ok(Json(page.into()))
}

/// GET /api/sales/filter-options
pub async fn filter_options(
    State(state): State<AppState>,
) -> Result<Json<FilterOptionsResponse>, RequestFailure> {
    let data = state
        .service
        .filter_options()
        .await
        .map_err(|e| DashboardError::from(e).context("Error fetching filter options"))?;

    Ok(Json(FilterOptionsResponse {
        success: true,
        data,
    }))
}

/// GET /health
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "salesboard"
    }))
}
