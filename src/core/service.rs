//! Query service combining page fetch and aggregation

use crate::core::filter::RecordFilter;
use crate::core::query::FilterSpec;
use crate::core::resolver::ResultPage;
use crate::core::store::{FilterOptions, SalesStore};
use anyhow::Result;
use std::sync::Arc;

/// Resolves filter specs against a [`SalesStore`]
///
/// The store answers page and metrics together. If either half fails the
/// whole query fails and no partial result is returned.
#[derive(Clone)]
pub struct SalesQueryService {
    store: Arc<dyn SalesStore>,
}

impl SalesQueryService {
    pub fn new(store: Arc<dyn SalesStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn SalesStore> {
        &self.store
    }

    /// Resolve one spec into a page with metrics
    pub async fn query(&self, spec: &FilterSpec) -> Result<ResultPage> {
        let page = self.store.query(spec).await?;

        tracing::debug!(
            filters = ?RecordFilter::from_spec(spec).fields().collect::<Vec<_>>(),
            sort = %spec.sort,
            requested_page = spec.page,
            current_page = page.current_page(),
            page_size = page.pagination.page_size,
            total_records = page.total_records(),
            "Resolved sales query"
        );

        Ok(page)
    }

    /// Distinct values available to the filters
    pub async fn filter_options(&self) -> Result<FilterOptions> {
        self.store.filter_options().await
    }
}
