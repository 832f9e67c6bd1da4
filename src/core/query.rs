//! Query parameters, normalization and pagination utilities
//!
//! Raw request parameters arrive as optional strings. [`QueryNormalizer`] turns
//! them into a typed [`FilterSpec`] without ever failing: malformed input is
//! coerced to a safe default instead of being rejected.

use chrono::{DateTime, NaiveDate};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::IntErrorKind;

/// Raw query parameters for the sales listing
///
/// Every value is kept as the string received over HTTP. Multi-select fields
/// are comma-joined.
///
/// # Example
/// ```text
/// GET /api/sales?search=neha&customerRegion=North,South&sortBy=amount_desc&page=2
/// GET /api/sales?tags=organic&ageMin=25&ageMax=40&dateFrom=2024-01-01
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SalesQueryParams {
    pub search: Option<String>,
    pub customer_region: Option<String>,
    pub gender: Option<String>,
    pub age_min: Option<String>,
    pub age_max: Option<String>,
    pub product_category: Option<String>,
    pub tags: Option<String>,
    pub payment_method: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub sort_by: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl SalesQueryParams {
    /// Build params from decoded key/value pairs
    ///
    /// Unknown keys are ignored; when a key repeats, the last value wins.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();

        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "search" => &mut params.search,
                "customerRegion" => &mut params.customer_region,
                "gender" => &mut params.gender,
                "ageMin" => &mut params.age_min,
                "ageMax" => &mut params.age_max,
                "productCategory" => &mut params.product_category,
                "tags" => &mut params.tags,
                "paymentMethod" => &mut params.payment_method,
                "dateFrom" => &mut params.date_from,
                "dateTo" => &mut params.date_to,
                "sortBy" => &mut params.sort_by,
                "page" => &mut params.page,
                "pageSize" => &mut params.page_size,
                _ => continue,
            };
            *slot = Some(value.into());
        }

        params
    }
}

/// Field a result set can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Date,
    Amount,
    Quantity,
    CustomerName,
}

/// Ordering direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Requested ordering of the result set
///
/// Defaults to newest first (`date_desc`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortKey {
    pub const DATE_DESC: SortKey = SortKey::new(SortField::Date, SortDirection::Desc);

    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Parse a `sortBy` value
    ///
    /// Accepts `date_desc|date_asc|amount_desc|amount_asc|quantity_desc|quantity_asc|name_asc|name_desc`
    /// case-insensitively, with `-` or `_` as separator, plus a few legacy aliases.
    /// Returns `None` for anything unrecognized.
    pub fn parse(value: &str) -> Option<Self> {
        use SortDirection::*;
        use SortField::*;

        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        let key = match normalized.as_str() {
            "date_desc" | "date" => Self::new(Date, Desc),
            "date_asc" => Self::new(Date, Asc),
            "amount_desc" | "amount" => Self::new(Amount, Desc),
            "amount_asc" => Self::new(Amount, Asc),
            "quantity_desc" | "quantity" => Self::new(Quantity, Desc),
            "quantity_asc" => Self::new(Quantity, Asc),
            "name_asc" | "name" | "customer_name" | "customer_asc" => Self::new(CustomerName, Asc),
            "name_desc" | "customer_desc" => Self::new(CustomerName, Desc),
            _ => return None,
        };
        Some(key)
    }

    /// Canonical `sortBy` spelling
    pub fn as_str(&self) -> &'static str {
        use SortDirection::*;
        use SortField::*;

        match (self.field, self.direction) {
            (Date, Desc) => "date_desc",
            (Date, Asc) => "date_asc",
            (Amount, Desc) => "amount_desc",
            (Amount, Asc) => "amount_asc",
            (Quantity, Desc) => "quantity_desc",
            (Quantity, Asc) => "quantity_asc",
            (CustomerName, Asc) => "name_asc",
            (CustomerName, Desc) => "name_desc",
        }
    }
}

impl Default for SortKey {
    fn default() -> Self {
        Self::DATE_DESC
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bounds applied while normalizing raw parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct QueryLimits {
    /// Page size used when `pageSize` is missing or invalid
    pub default_page_size: usize,

    /// Largest accepted `pageSize`
    pub max_page_size: usize,

    /// Search terms are truncated to this many characters
    pub max_search_len: usize,

    /// Inclusive range accepted for `ageMin` / `ageMax`
    pub min_age: u32,
    pub max_age: u32,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 100,
            max_search_len: 100,
            min_age: 0,
            max_age: 150,
        }
    }
}

/// Validated, typed filter/sort/page specification for one request
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    /// Trimmed, non-empty search term
    pub search: Option<String>,

    pub regions: IndexSet<String>,
    pub genders: IndexSet<String>,
    pub categories: IndexSet<String>,
    /// Lower-cased tag tokens
    pub tags: IndexSet<String>,
    pub payment_methods: IndexSet<String>,

    pub age_min: Option<u32>,
    pub age_max: Option<u32>,

    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,

    pub sort: SortKey,

    /// Requested page (starts at 1, clamped later against the result size)
    pub page: usize,
    pub page_size: usize,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            search: None,
            regions: IndexSet::new(),
            genders: IndexSet::new(),
            categories: IndexSet::new(),
            tags: IndexSet::new(),
            payment_methods: IndexSet::new(),
            age_min: None,
            age_max: None,
            date_from: None,
            date_to: None,
            sort: SortKey::default(),
            page: 1,
            page_size: QueryLimits::default().default_page_size,
        }
    }
}

impl FilterSpec {
    /// Normalize raw params with the default limits
    pub fn from_params(params: &SalesQueryParams) -> Self {
        QueryNormalizer::default().normalize(params)
    }
}

/// Turns raw [`SalesQueryParams`] into a [`FilterSpec`]
///
/// Pure and infallible: it never touches the record collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryNormalizer {
    limits: QueryLimits,
}

impl QueryNormalizer {
    pub fn new(limits: QueryLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &QueryLimits {
        &self.limits
    }

    pub fn normalize(&self, params: &SalesQueryParams) -> FilterSpec {
        FilterSpec {
            search: self.search(params.search.as_deref()),
            regions: multi_select(params.customer_region.as_deref()),
            genders: multi_select(params.gender.as_deref()),
            categories: multi_select(params.product_category.as_deref()),
            tags: multi_select(params.tags.as_deref())
                .into_iter()
                .map(|tag| tag.to_lowercase())
                .collect(),
            payment_methods: multi_select(params.payment_method.as_deref()),
            age_min: self.age(params.age_min.as_deref()),
            age_max: self.age(params.age_max.as_deref()),
            date_from: params.date_from.as_deref().and_then(parse_date),
            date_to: params.date_to.as_deref().and_then(parse_date),
            sort: params
                .sort_by
                .as_deref()
                .and_then(SortKey::parse)
                .unwrap_or_default(),
            page: self.page(params.page.as_deref()),
            page_size: self.page_size(params.page_size.as_deref()),
        }
    }

    fn search(&self, raw: Option<&str>) -> Option<String> {
        let trimmed = raw?.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(trimmed.chars().take(self.limits.max_search_len).collect())
    }

    fn age(&self, raw: Option<&str>) -> Option<u32> {
        let age = parse_int(raw?)?;
        (i64::from(self.limits.min_age)..=i64::from(self.limits.max_age))
            .contains(&age)
            .then_some(age as u32)
    }

    fn page(&self, raw: Option<&str>) -> usize {
        match raw.and_then(parse_int) {
            Some(page) if page > 0 => usize::try_from(page).unwrap_or(usize::MAX),
            _ => 1,
        }
    }

    fn page_size(&self, raw: Option<&str>) -> usize {
        match raw.and_then(parse_int) {
            Some(size) if size >= 1 && size <= self.limits.max_page_size as i64 => size as usize,
            _ => self.limits.default_page_size,
        }
    }
}

/// Split a comma-joined multi-select value into a set of trimmed, non-empty tokens
fn multi_select(raw: Option<&str>) -> IndexSet<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Parse a trimmed integer; values too large for `i64` saturate
fn parse_int(raw: &str) -> Option<i64> {
    match raw.trim().parse::<i64>() {
        Ok(value) => Some(value),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Some(i64::MAX),
        Err(e) if *e.kind() == IntErrorKind::NegOverflow => Some(i64::MIN),
        Err(_) => None,
    }
}

/// Parse `YYYY-MM-DD`, or the calendar date of an RFC 3339 timestamp
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Pagination metadata
///
/// `current_page` is always clamped into `[1, max(total_pages, 1)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub current_page: usize,

    /// Number of items per page
    pub page_size: usize,

    /// Total number of items (after search and filters)
    pub total_records: usize,

    /// Total number of pages (0 when nothing matched)
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next_page: bool,

    /// Whether there is a previous page
    pub has_prev_page: bool,
}

impl PaginationMeta {
    /// Create pagination metadata, clamping the requested page
    pub fn new(requested_page: usize, page_size: usize, total_records: usize) -> Self {
        // Ensure page_size is at least 1 to avoid division by zero
        let page_size = page_size.max(1);
        let total_pages = total_records.div_ceil(page_size);
        let current_page = requested_page.clamp(1, total_pages.max(1));

        Self {
            current_page,
            page_size,
            total_records,
            total_pages,
            has_next_page: current_page < total_pages,
            has_prev_page: current_page > 1,
        }
    }

    /// Index of the first record on the current page
    pub fn offset(&self) -> usize {
        (self.current_page - 1) * self.page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> SalesQueryParams {
        SalesQueryParams::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn test_defaults_for_empty_params() {
        let spec = FilterSpec::from_params(&SalesQueryParams::default());
        assert_eq!(spec, FilterSpec::default());
        assert_eq!(spec.page, 1);
        assert_eq!(spec.page_size, 10);
        assert_eq!(spec.sort, SortKey::DATE_DESC);
        assert!(spec.search.is_none());
    }

    #[test]
    fn test_multi_select_split_and_drop_empty() {
        let spec = FilterSpec::from_params(&params(&[
            ("customerRegion", "North,,South, East ,"),
            ("paymentMethod", "UPI,Martian Barter"),
        ]));

        let regions: Vec<&str> = spec.regions.iter().map(String::as_str).collect();
        assert_eq!(regions, vec!["North", "South", "East"]);
        // Unknown values pass through untouched
        assert!(spec.payment_methods.contains("Martian Barter"));
    }

    #[test]
    fn test_multi_select_collapses_duplicates() {
        let spec = FilterSpec::from_params(&params(&[("gender", "Male,Male,Female")]));
        assert_eq!(spec.genders.len(), 2);
    }

    #[test]
    fn test_tags_are_lowercased() {
        let spec = FilterSpec::from_params(&params(&[("tags", "Organic,SkinCare")]));
        assert!(spec.tags.contains("organic"));
        assert!(spec.tags.contains("skincare"));
    }

    #[test]
    fn test_age_bounds() {
        let spec = FilterSpec::from_params(&params(&[("ageMin", "0"), ("ageMax", "150")]));
        assert_eq!(spec.age_min, Some(0));
        assert_eq!(spec.age_max, Some(150));

        let spec = FilterSpec::from_params(&params(&[("ageMin", "-1"), ("ageMax", "151")]));
        assert_eq!(spec.age_min, None);
        assert_eq!(spec.age_max, None);

        let spec = FilterSpec::from_params(&params(&[("ageMin", "abc"), ("ageMax", " 42 ")]));
        assert_eq!(spec.age_min, None);
        assert_eq!(spec.age_max, Some(42));
    }

    #[test]
    fn test_min_greater_than_max_is_kept_as_is() {
        let spec = FilterSpec::from_params(&params(&[("ageMin", "30"), ("ageMax", "25")]));
        assert_eq!(spec.age_min, Some(30));
        assert_eq!(spec.age_max, Some(25));
    }

    #[test]
    fn test_dates() {
        let spec = FilterSpec::from_params(&params(&[
            ("dateFrom", "2024-01-15"),
            ("dateTo", "2024-02-01T10:00:00Z"),
        ]));
        assert_eq!(spec.date_from, NaiveDate::from_ymd_opt(2024, 1, 15));
        assert_eq!(spec.date_to, NaiveDate::from_ymd_opt(2024, 2, 1));

        let spec = FilterSpec::from_params(&params(&[
            ("dateFrom", "yesterday"),
            ("dateTo", "2024-02-30"),
        ]));
        assert_eq!(spec.date_from, None);
        assert_eq!(spec.date_to, None);
    }

    #[test]
    fn test_page_defaults() {
        for raw in ["0", "-3", "two", ""] {
            let spec = FilterSpec::from_params(&params(&[("page", raw)]));
            assert_eq!(spec.page, 1, "page={raw:?}");
        }

        let spec = FilterSpec::from_params(&params(&[("page", "7")]));
        assert_eq!(spec.page, 7);

        // Overflowing values saturate instead of falling back to page 1
        let spec = FilterSpec::from_params(&params(&[("page", "99999999999999999999999")]));
        assert!(spec.page > 1_000_000);
    }

    #[test]
    fn test_page_size_falls_back_to_default() {
        for raw in ["0", "101", "-5", "ten"] {
            let spec = FilterSpec::from_params(&params(&[("pageSize", raw)]));
            assert_eq!(spec.page_size, 10, "pageSize={raw:?}");
        }

        let spec = FilterSpec::from_params(&params(&[("pageSize", "1")]));
        assert_eq!(spec.page_size, 1);
        let spec = FilterSpec::from_params(&params(&[("pageSize", "100")]));
        assert_eq!(spec.page_size, 100);
    }

    #[test]
    fn test_search_trim_and_truncate() {
        let spec = FilterSpec::from_params(&params(&[("search", "   ")]));
        assert_eq!(spec.search, None);

        let spec = FilterSpec::from_params(&params(&[("search", "  Neha  ")]));
        assert_eq!(spec.search.as_deref(), Some("Neha"));

        let long = "é".repeat(250);
        let spec = FilterSpec::from_params(&params(&[("search", long.as_str())]));
        assert_eq!(spec.search.unwrap().chars().count(), 100);
    }

    #[test]
    fn test_custom_limits() {
        let normalizer = QueryNormalizer::new(QueryLimits {
            default_page_size: 25,
            max_page_size: 50,
            ..QueryLimits::default()
        });

        let spec = normalizer.normalize(&params(&[("pageSize", "75")]));
        assert_eq!(spec.page_size, 25);
        let spec = normalizer.normalize(&params(&[("pageSize", "50")]));
        assert_eq!(spec.page_size, 50);
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!(
            SortKey::parse("amount_desc"),
            Some(SortKey::new(SortField::Amount, SortDirection::Desc))
        );
        assert_eq!(
            SortKey::parse("Name-Asc"),
            Some(SortKey::new(SortField::CustomerName, SortDirection::Asc))
        );
        assert_eq!(
            SortKey::parse("customer-desc"),
            Some(SortKey::new(SortField::CustomerName, SortDirection::Desc))
        );
        assert_eq!(SortKey::parse("price_desc"), None);
    }

    #[test]
    fn test_unrecognized_or_missing_sort_defaults_to_date_desc() {
        let spec = FilterSpec::from_params(&params(&[("sortBy", "bogus")]));
        assert_eq!(spec.sort, SortKey::DATE_DESC);

        let spec = FilterSpec::from_params(&params(&[]));
        assert_eq!(spec.sort.as_str(), "date_desc");
    }

    #[test]
    fn test_from_pairs_last_value_wins_and_ignores_unknown() {
        let p = params(&[("page", "2"), ("page", "3"), ("limit", "9")]);
        assert_eq!(p.page.as_deref(), Some("3"));
        assert!(p.page_size.is_none());
    }

    #[test]
    fn test_pagination_meta() {
        let meta = PaginationMeta::new(1, 20, 145);
        assert_eq!(meta.total_records, 145);
        assert_eq!(meta.total_pages, 8);
        assert!(!meta.has_prev_page);
        assert!(meta.has_next_page);
    }

    #[test]
    fn test_pagination_meta_clamps_page() {
        let meta = PaginationMeta::new(50, 10, 25);
        assert_eq!(meta.total_pages, 3);
        assert_eq!(meta.current_page, 3);
        assert_eq!(meta.offset(), 20);
        assert!(!meta.has_next_page);

        let meta = PaginationMeta::new(usize::MAX, 10, 25);
        assert_eq!(meta.current_page, 3);
    }

    #[test]
    fn test_pagination_meta_empty_result() {
        let meta = PaginationMeta::new(4, 10, 0);
        assert_eq!(meta.total_pages, 0);
        assert_eq!(meta.current_page, 1);
        assert_eq!(meta.offset(), 0);
        assert!(!meta.has_next_page);
        assert!(!meta.has_prev_page);
    }
}
