//! Sales record model
//!
//! A [`SaleRecord`] is one immutable sales transaction. Amount fields are stored
//! as received: `total_amount = quantity * price_per_unit` and
//! `final_amount = total_amount * (1 - discount_percentage / 100)` are computed
//! upstream and never recomputed by the query pipeline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Customer gender as recorded on the transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// The canonical label, matched verbatim by the gender filter
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One sales transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    pub transaction_id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub phone_number: String,
    pub gender: Gender,
    pub age: u32,
    pub customer_region: String,
    #[serde(default)]
    pub customer_type: String,

    pub product_id: String,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub brand: String,
    pub product_category: String,

    /// Comma-separated, case-insensitive tag tokens (e.g. `"organic, skincare"`)
    #[serde(default)]
    pub tags: String,

    pub quantity: u32,
    pub price_per_unit: f64,
    /// Discount in percent, within `[0, 100]`
    pub discount_percentage: f64,
    pub total_amount: f64,
    pub final_amount: f64,

    pub date: NaiveDate,
    pub payment_method: String,
    #[serde(default)]
    pub order_status: String,
    #[serde(default)]
    pub delivery_type: String,

    pub store_id: String,
    #[serde(default)]
    pub store_location: String,
    pub salesperson_id: String,
    #[serde(default)]
    pub employee_name: String,
}

impl SaleRecord {
    /// Normalized tag tokens: split on `,`, trimmed, lower-cased, empties dropped
    pub fn tag_tokens(&self) -> impl Iterator<Item = String> + '_ {
        self.tags
            .split(',')
            .map(|tag| tag.trim().to_lowercase())
            .filter(|tag| !tag.is_empty())
    }

    /// Whether any normalized tag token equals `tag` (already lower-cased)
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag_tokens().any(|token| token == tag)
    }

    /// Amount taken off by the discount on this single transaction
    pub fn discount_amount(&self) -> f64 {
        self.total_amount - self.final_amount
    }
}
