//! Reusable record predicates
//!
//! Each filter field of a [`FilterSpec`] becomes one named predicate. A
//! [`RecordFilter`] AND-combines them; inside a multi-select field the
//! supplied values are OR-combined. Fields left empty contribute no predicate.

use crate::core::query::FilterSpec;
use crate::core::record::SaleRecord;
use chrono::NaiveDate;
use indexmap::IndexSet;
use std::fmt;

/// Boxed test applied to a single record
pub type Predicate = Box<dyn Fn(&SaleRecord) -> bool + Send + Sync>;

/// Accessor for a categorical record field
pub type FieldAccessor = fn(&SaleRecord) -> &str;

/// A predicate tagged with the filter field it came from
pub struct RecordPredicate {
    field: &'static str,
    test: Predicate,
}

impl RecordPredicate {
    pub fn new(field: &'static str, test: impl Fn(&SaleRecord) -> bool + Send + Sync + 'static) -> Self {
        Self {
            field,
            test: Box::new(test),
        }
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn test(&self, record: &SaleRecord) -> bool {
        (self.test)(record)
    }
}

impl fmt::Debug for RecordPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordPredicate")
            .field("field", &self.field)
            .finish_non_exhaustive()
    }
}

/// Conjunction of record predicates
#[derive(Debug, Default)]
pub struct RecordFilter {
    predicates: Vec<RecordPredicate>,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compose the search and filter predicates of a spec
    pub fn from_spec(spec: &FilterSpec) -> Self {
        let candidates = [
            spec.search.as_deref().map(search),
            one_of("customerRegion", &spec.regions, |r| r.customer_region.as_str()),
            one_of("gender", &spec.genders, |r| r.gender.as_str()),
            age_range(spec.age_min, spec.age_max),
            one_of("productCategory", &spec.categories, |r| r.product_category.as_str()),
            any_tag(&spec.tags),
            one_of("paymentMethod", &spec.payment_methods, |r| r.payment_method.as_str()),
            date_range(spec.date_from, spec.date_to),
        ];

        Self {
            predicates: candidates.into_iter().flatten().collect(),
        }
    }

    /// Add a predicate to the conjunction
    pub fn with(mut self, predicate: RecordPredicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Whether the record passes every predicate
    pub fn matches(&self, record: &SaleRecord) -> bool {
        self.predicates.iter().all(|p| p.test(record))
    }

    /// Names of the fields constraining this filter
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.predicates.iter().map(RecordPredicate::field)
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Records passing the filter, in their original order
    pub fn apply<'a>(&self, records: impl IntoIterator<Item = &'a SaleRecord>) -> Vec<&'a SaleRecord> {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}

/// Predicate: customer name or phone number contains `term`, case-insensitively
pub fn search(term: &str) -> RecordPredicate {
    let term = term.to_lowercase();
    RecordPredicate::new("search", move |r| {
        r.customer_name.to_lowercase().contains(&term)
            || r.phone_number.to_lowercase().contains(&term)
    })
}

/// Predicate: the field's value is one of `values`; `None` when `values` is empty
pub fn one_of(
    field: &'static str,
    values: &IndexSet<String>,
    accessor: FieldAccessor,
) -> Option<RecordPredicate> {
    if values.is_empty() {
        return None;
    }
    let values = values.clone();
    Some(RecordPredicate::new(field, move |r| {
        values.contains(accessor(r))
    }))
}

/// Predicate: `min <= age <= max`, each bound optional
///
/// An inverted range is not corrected and matches nothing.
pub fn age_range(min: Option<u32>, max: Option<u32>) -> Option<RecordPredicate> {
    if min.is_none() && max.is_none() {
        return None;
    }
    Some(RecordPredicate::new("age", move |r| {
        min.is_none_or(|min| r.age >= min) && max.is_none_or(|max| r.age <= max)
    }))
}

/// Predicate: any of the lower-cased `tags` equals one of the record's tag tokens
pub fn any_tag(tags: &IndexSet<String>) -> Option<RecordPredicate> {
    if tags.is_empty() {
        return None;
    }
    let tags = tags.clone();
    Some(RecordPredicate::new("tags", move |r| {
        tags.iter().any(|tag| r.has_tag(tag))
    }))
}

/// Predicate: `from <= date <= to` by calendar date, each bound optional
pub fn date_range(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Option<RecordPredicate> {
    if from.is_none() && to.is_none() {
        return None;
    }
    Some(RecordPredicate::new("date", move |r| {
        from.is_none_or(|from| r.date >= from) && to.is_none_or(|to| r.date <= to)
    }))
}
