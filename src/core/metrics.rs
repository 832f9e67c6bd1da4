//! Aggregate metrics over a filtered (not paginated) record set

use crate::core::record::SaleRecord;
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::Add;

/// Totals shown above the sales table
///
/// All fields are zero for an empty set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesMetrics {
    /// Σ quantity
    pub total_units: u64,

    /// Σ final amount
    pub total_amount: f64,

    /// Σ (total amount − final amount), per record
    pub total_discount: f64,
}

impl SalesMetrics {
    /// Contribution of a single record
    pub fn of(record: &SaleRecord) -> Self {
        Self {
            total_units: u64::from(record.quantity),
            total_amount: record.final_amount,
            total_discount: record.discount_amount(),
        }
    }

    /// Accumulate metrics over any sequence of records
    pub fn compute<'a>(records: impl IntoIterator<Item = &'a SaleRecord>) -> Self {
        records.into_iter().map(Self::of).sum()
    }
}

impl Add for SalesMetrics {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            total_units: self.total_units + rhs.total_units,
            total_amount: self.total_amount + rhs.total_amount,
            total_discount: self.total_discount + rhs.total_discount,
        }
    }
}

impl Sum for SalesMetrics {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::fixtures::record;

    #[test]
    fn test_empty_set_is_zero() {
        let metrics = SalesMetrics::compute(std::iter::empty());
        assert_eq!(metrics, SalesMetrics::default());
        assert_eq!(metrics.total_units, 0);
        assert_eq!(metrics.total_amount, 0.0);
        assert_eq!(metrics.total_discount, 0.0);
    }

    #[test]
    fn test_discount_is_summed_per_record() {
        let mut a = record("a", "2024-01-01", 90.0);
        a.quantity = 2;
        a.total_amount = 100.0;
        let mut b = record("b", "2024-01-02", 150.0);
        b.quantity = 3;
        b.total_amount = 200.0;

        let metrics = SalesMetrics::compute([&a, &b]);
        assert_eq!(metrics.total_units, 5);
        assert_eq!(metrics.total_amount, 240.0);
        assert_eq!(metrics.total_discount, 60.0);
    }

    #[test]
    fn test_trusts_stored_amounts() {
        // Stored amounts are not re-derived from quantity and price
        let mut r = record("x", "2024-01-01", 7.0);
        r.quantity = 10;
        r.price_per_unit = 1000.0;
        r.total_amount = 8.0;

        let metrics = SalesMetrics::compute([&r]);
        assert_eq!(metrics.total_amount, 7.0);
        assert_eq!(metrics.total_discount, 1.0);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(SalesMetrics {
            total_units: 3,
            total_amount: 12.5,
            total_discount: 0.5,
        })
        .unwrap();
        assert_eq!(json["totalUnits"], 3);
        assert_eq!(json["totalAmount"], 12.5);
        assert_eq!(json["totalDiscount"], 0.5);
    }
}
