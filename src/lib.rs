//! # Salesboard
//!
//! Query engine and REST API behind a sales-records dashboard.
//!
//! A request's raw parameters are normalized into a [`FilterSpec`](core::FilterSpec),
//! then resolved against a record collection into one page of records, its
//! pagination state, and aggregate metrics over every matching record.
//!
//! ## Features
//!
//! - **Search**: case-insensitive substring match on customer name or phone number
//! - **Multi-select Filters**: region, gender, category, tags and payment method,
//!   plus age and date ranges
//! - **Stable Sorting**: by date, amount, quantity or customer name
//! - **Clamped Pagination**: out-of-range pages resolve to the nearest valid page
//! - **Metrics**: units, amount and discount totals over the filtered set
//! - **Forgiving Input**: malformed parameters fall back to defaults instead of failing
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use salesboard::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let store = InMemorySalesStore::from_json_file("data/sales.json")?;
//!
//!     ServerBuilder::new()
//!         .with_config(DashboardConfig::load(None)?)
//!         .with_store(store)
//!         .serve()
//!         .await
//! }
//! ```
//!
//! Resolving a query without HTTP:
//!
//! ```rust,ignore
//! let params = SalesQueryParams::from_pairs([("sortBy", "amount_desc"), ("pageSize", "2")]);
//! let page = resolve(&FilterSpec::from_params(&params), &records);
//! println!("{} of {} records", page.records.len(), page.total_records());
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Types ===
    pub use crate::core::{
        error::{DashboardError, RequestFailure, StorageError},
        filter::{RecordFilter, RecordPredicate},
        metrics::SalesMetrics,
        query::{
            FilterSpec, PaginationMeta, QueryLimits, QueryNormalizer, SalesQueryParams,
            SortDirection, SortField, SortKey,
        },
        record::{Gender, SaleRecord},
        resolver::{PageSlice, ResultPage, resolve},
        service::SalesQueryService,
        store::{Bounds, FilterOptions, SalesStore},
    };

    // === Storage ===
    #[cfg(feature = "in-memory")]
    pub use crate::storage::InMemorySalesStore;

    // === Config ===
    pub use crate::config::{DashboardConfig, DataConfig, ServerConfig};

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::NaiveDate;
    pub use serde::{Deserialize, Serialize};
}
