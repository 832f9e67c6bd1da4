//! Shared fixtures for the integration tests
//!
//! `sale()` builds a single record with overridable fields; `dataset()` builds a
//! deterministic mixed collection large enough to span several pages.

#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use axum_test::TestServer;
use salesboard::prelude::*;

pub const REGIONS: [&str; 5] = ["North", "South", "East", "West", "Central"];
pub const CATEGORIES: [&str; 4] = ["Electronics", "Clothing", "Beauty", "Books"];
pub const PAYMENT_METHODS: [&str; 4] = ["Cash", "UPI", "Credit Card", "Wallet"];
pub const TAG_SETS: [&str; 5] = [
    "organic,skincare",
    "organically-sourced",
    "wireless, Gadgets",
    "fashion,casual",
    "",
];
pub const NAMES: [&str; 6] = [
    "Aarav Sharma",
    "neha yadav",
    "Ishaan Patel",
    "Diya Kapoor",
    "arjun singh",
    "Myra Nair",
];

/// Record with the given id, date, quantity and amounts
pub fn sale(id: &str, date: &str, quantity: u32, total_amount: f64, final_amount: f64) -> SaleRecord {
    SaleRecord {
        transaction_id: id.to_string(),
        customer_id: format!("CUST-{}", id),
        customer_name: format!("Customer {}", id),
        phone_number: "9800000000".to_string(),
        gender: Gender::Male,
        age: 35,
        customer_region: "North".to_string(),
        customer_type: "New".to_string(),
        product_id: format!("PROD-{}", id),
        product_name: "Product".to_string(),
        brand: "Sony".to_string(),
        product_category: "Electronics".to_string(),
        tags: String::new(),
        quantity,
        price_per_unit: total_amount / f64::from(quantity.max(1)),
        discount_percentage: if total_amount > 0.0 {
            (1.0 - final_amount / total_amount) * 100.0
        } else {
            0.0
        },
        total_amount,
        final_amount,
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("valid fixture date"),
        payment_method: "Cash".to_string(),
        order_status: "Completed".to_string(),
        delivery_type: "Standard".to_string(),
        store_id: "ST-001".to_string(),
        store_location: "Pune".to_string(),
        salesperson_id: "EMP-001".to_string(),
        employee_name: "Ravi".to_string(),
    }
}

/// Deterministic collection of `n` records cycling through the vocabularies
pub fn dataset(n: usize) -> Vec<SaleRecord> {
    (0..n)
        .map(|i| {
            let quantity = (i % 5 + 1) as u32;
            let total = (quantity * 100) as f64;
            let discount = (i % 4 * 5) as f64;
            let day = i % 28 + 1;
            let month = i % 12 + 1;

            let mut r = sale(
                &format!("TX-{:04}", i),
                &format!("2024-{:02}-{:02}", month, day),
                quantity,
                total,
                total * (1.0 - discount / 100.0),
            );
            r.customer_name = NAMES[i % NAMES.len()].to_string();
            r.phone_number = format!("98{:08}", i * 7919 % 100_000_000);
            r.gender = [Gender::Male, Gender::Female, Gender::Other][i % 3];
            r.age = 18 + (i * 7 % 60) as u32;
            r.customer_region = REGIONS[i % REGIONS.len()].to_string();
            r.product_category = CATEGORIES[i % CATEGORIES.len()].to_string();
            r.payment_method = PAYMENT_METHODS[i % PAYMENT_METHODS.len()].to_string();
            r.tags = TAG_SETS[i % TAG_SETS.len()].to_string();
            r
        })
        .collect()
}

/// Normalize `pairs` as an HTTP request would
pub fn spec(pairs: &[(&str, &str)]) -> FilterSpec {
    FilterSpec::from_params(&SalesQueryParams::from_pairs(pairs.iter().copied()))
}

/// Test server over the given store
pub fn server(store: impl SalesStore + 'static) -> TestServer {
    let router = ServerBuilder::new()
        .with_store(store)
        .build()
        .expect("router should build");
    TestServer::try_new(router).expect("test server should start")
}

/// Store whose backend is always unreachable
pub struct UnreachableStore;

#[async_trait]
impl SalesStore for UnreachableStore {
    async fn fetch_page(&self, _spec: &FilterSpec) -> Result<PageSlice> {
        Err(StorageError::ConnectionError {
            backend: "remote".to_string(),
            message: "connection refused".to_string(),
        }
        .into())
    }

    async fn aggregate(&self, _spec: &FilterSpec) -> Result<SalesMetrics> {
        Err(StorageError::Timeout {
            backend: "remote".to_string(),
            elapsed_ms: 10_000,
        }
        .into())
    }

    async fn filter_options(&self) -> Result<FilterOptions> {
        Err(StorageError::Unavailable {
            backend: "remote".to_string(),
        }
        .into())
    }

    async fn count(&self) -> Result<usize> {
        Err(anyhow::anyhow!("remote store has no count"))
    }
}
