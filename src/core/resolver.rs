//! In-memory query resolution
//!
//! Stages run in a fixed order: search and filter, metrics, sort, paginate.
//! Metrics are taken over the filtered set before pagination. No stage mutates
//! the input collection.

use crate::core::filter::RecordFilter;
use crate::core::metrics::SalesMetrics;
use crate::core::query::{FilterSpec, PaginationMeta, SortDirection, SortField, SortKey};
use crate::core::record::SaleRecord;
use std::cmp::Ordering;

/// One page of records plus its pagination state
#[derive(Debug, Clone, PartialEq)]
pub struct PageSlice {
    pub records: Vec<SaleRecord>,
    pub pagination: PaginationMeta,
}

/// Response to one resolved query
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPage {
    /// At most `page_size` records
    pub records: Vec<SaleRecord>,
    pub pagination: PaginationMeta,
    pub metrics: SalesMetrics,
}

impl ResultPage {
    /// Combine a fetched page with independently aggregated metrics
    pub fn from_parts(page: PageSlice, metrics: SalesMetrics) -> Self {
        Self {
            records: page.records,
            pagination: page.pagination,
            metrics,
        }
    }

    pub fn total_records(&self) -> usize {
        self.pagination.total_records
    }

    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages
    }

    pub fn current_page(&self) -> usize {
        self.pagination.current_page
    }
}

/// Resolve a spec against a record collection
pub fn resolve(spec: &FilterSpec, records: &[SaleRecord]) -> ResultPage {
    let mut matched = RecordFilter::from_spec(spec).apply(records);
    let metrics = SalesMetrics::compute(matched.iter().copied());
    sort_records(&mut matched, spec.sort);

    ResultPage::from_parts(paginate(&matched, spec.page, spec.page_size), metrics)
}

/// Search, filter, sort and paginate without computing metrics
pub fn fetch_page(spec: &FilterSpec, records: &[SaleRecord]) -> PageSlice {
    let mut matched = RecordFilter::from_spec(spec).apply(records);
    sort_records(&mut matched, spec.sort);
    paginate(&matched, spec.page, spec.page_size)
}

/// Metrics over the records matching the `FilterSpec` search and filters
pub fn aggregate(spec: &FilterSpec, records: &[SaleRecord]) -> SalesMetrics {
    let filter = RecordFilter::from_spec(spec);
    SalesMetrics::compute(records.iter().filter(|r| filter.matches(r)))
}

/// Stable sort by the requested key
pub fn sort_records(records: &mut [&SaleRecord], key: SortKey) {
    records.sort_by(|a, b| {
        let ordering = compare(a, b, key.field);
        match key.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

fn compare(a: &SaleRecord, b: &SaleRecord, field: SortField) -> Ordering {
    match field {
        SortField::Date => a.date.cmp(&b.date),
        SortField::Amount => a.final_amount.total_cmp(&b.final_amount),
        SortField::Quantity => a.quantity.cmp(&b.quantity),
        SortField::CustomerName => a
            .customer_name
            .chars()
            .flat_map(char::to_lowercase)
            .cmp(b.customer_name.chars().flat_map(char::to_lowercase)),
    }
}

/// Clamp the requested page and slice it out of the sorted set
pub fn paginate(sorted: &[&SaleRecord], requested_page: usize, page_size: usize) -> PageSlice {
    let pagination = PaginationMeta::new(requested_page, page_size, sorted.len());
    let start = pagination.offset().min(sorted.len());
    let end = start.saturating_add(pagination.page_size).min(sorted.len());

    PageSlice {
        records: sorted[start..end].iter().map(|r| (*r).clone()).collect(),
        pagination,
    }
}
