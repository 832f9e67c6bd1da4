//! Core module containing the record model and the query pipeline

pub mod error;
pub mod filter;
pub mod metrics;
pub mod query;
pub mod record;
pub mod resolver;
pub mod service;
pub mod store;

pub use error::{DashboardError, RequestFailure, StorageError};
pub use filter::{RecordFilter, RecordPredicate};
pub use metrics::SalesMetrics;
pub use query::{
    FilterSpec, PaginationMeta, QueryLimits, QueryNormalizer, SalesQueryParams, SortDirection,
    SortField, SortKey,
};
pub use record::{Gender, SaleRecord};
pub use resolver::{PageSlice, ResultPage};
pub use service::SalesQueryService;
pub use store::{Bounds, FilterOptions, SalesStore};
