//! Store trait for querying sales records

use crate::core::metrics::SalesMetrics;
use crate::core::query::FilterSpec;
use crate::core::record::SaleRecord;
use crate::core::resolver::{PageSlice, ResultPage};
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

/// Trait for backing collections of sales records
///
/// A store may evaluate the whole query in process or push filtering, sorting
/// and aggregation down to a query engine. `fetch_page` and `aggregate` are
/// independent; the default `query` drives them concurrently.
#[async_trait]
pub trait SalesStore: Send + Sync {
    /// Search, filter, sort and paginate
    ///
    /// The requested page is clamped into `[1, max(total_pages, 1)]`.
    async fn fetch_page(&self, spec: &FilterSpec) -> Result<PageSlice>;

    /// Metrics over every record matching the `FilterSpec` search and filters,
    /// ignoring sort and pagination
    async fn aggregate(&self, spec: &FilterSpec) -> Result<SalesMetrics>;

    /// Page and metrics for one spec
    ///
    /// Stores that can read a consistent snapshot should override this so both
    /// halves describe the same records.
    async fn query(&self, spec: &FilterSpec) -> Result<ResultPage> {
        let (page, metrics) = futures::try_join!(self.fetch_page(spec), self.aggregate(spec))?;
        Ok(ResultPage::from_parts(page, metrics))
    }

    /// Distinct values available to the multi-select filters
    async fn filter_options(&self) -> Result<FilterOptions>;

    /// Number of records in the collection
    async fn count(&self) -> Result<usize>;
}

/// Values currently present in the collection, per filter field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub customer_region: BTreeSet<String>,
    pub gender: BTreeSet<String>,
    pub product_category: BTreeSet<String>,
    /// Lower-cased tag tokens
    pub tags: BTreeSet<String>,
    pub payment_method: BTreeSet<String>,
    pub age_range: Option<Bounds<u32>>,
    pub date_range: Option<Bounds<NaiveDate>>,
}

/// Inclusive lower and upper value of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T: Ord + Copy> Bounds<T> {
    pub fn point(value: T) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    pub fn widen(self, value: T) -> Self {
        Self {
            min: self.min.min(value),
            max: self.max.max(value),
        }
    }
}

impl FilterOptions {
    /// Collect options from a sequence of records
    pub fn collect<'a>(records: impl IntoIterator<Item = &'a SaleRecord>) -> Self {
        let mut options = Self::default();

        for r in records {
            options.customer_region.insert(r.customer_region.clone());
            options.gender.insert(r.gender.as_str().to_string());
            options.product_category.insert(r.product_category.clone());
            options.tags.extend(r.tag_tokens());
            options.payment_method.insert(r.payment_method.clone());

            options.age_range = Some(match options.age_range {
                Some(bounds) => bounds.widen(r.age),
                None => Bounds::point(r.age),
            });
            options.date_range = Some(match options.date_range {
                Some(bounds) => bounds.widen(r.date),
                None => Bounds::point(r.date),
            });
        }

        options
    }
}
