//! In-memory implementation of SalesStore for testing and development

use crate::core::error::StorageError;
use crate::core::metrics::SalesMetrics;
use crate::core::query::FilterSpec;
use crate::core::record::SaleRecord;
use crate::core::resolver::{self, PageSlice, ResultPage};
use crate::core::store::{FilterOptions, SalesStore};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::Path;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

const BACKEND: &str = "in-memory";

/// In-memory sales store
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
/// Every query runs against the current contents; nothing is cached between
/// requests.
#[derive(Clone, Default)]
pub struct InMemorySalesStore {
    records: Arc<RwLock<Vec<SaleRecord>>>,
}

impl InMemorySalesStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `records`, in their given order
    pub fn with_records(records: Vec<SaleRecord>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    /// Load records from a JSON array of camelCase records
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<SaleRecord> =
            serde_json::from_str(json).context("Failed to parse sales records")?;
        Ok(Self::with_records(records))
    }

    /// Load records from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let store = Self::from_json_str(&content)
            .with_context(|| format!("Invalid sales data in {}", path.display()))?;

        tracing::info!(path = %path.display(), records = store.len()?, "Loaded sales records");
        Ok(store)
    }

    /// Append a record
    pub fn insert(&self, record: SaleRecord) -> Result<()> {
        self.write()?.push(record);
        Ok(())
    }

    /// Append several records, keeping their order
    pub fn extend(&self, records: impl IntoIterator<Item = SaleRecord>) -> Result<()> {
        self.write()?.extend(records);
        Ok(())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<SaleRecord>>, StorageError> {
        self.records.read().map_err(|_| StorageError::LockPoisoned {
            backend: BACKEND.to_string(),
            mode: "read",
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<SaleRecord>>, StorageError> {
        self.records.write().map_err(|_| StorageError::LockPoisoned {
            backend: BACKEND.to_string(),
            mode: "write",
        })
    }
}

#[async_trait]
impl SalesStore for InMemorySalesStore {
    async fn fetch_page(&self, spec: &FilterSpec) -> Result<PageSlice> {
        let records = self.read()?;
        Ok(resolver::fetch_page(spec, &records))
    }

    async fn aggregate(&self, spec: &FilterSpec) -> Result<SalesMetrics> {
        let records = self.read()?;
        Ok(resolver::aggregate(spec, &records))
    }

    async fn query(&self, spec: &FilterSpec) -> Result<ResultPage> {
        let records = self.read()?;
        Ok(resolver::resolve(spec, &records))
    }

    async fn filter_options(&self) -> Result<FilterOptions> {
        let records = self.read()?;
        Ok(FilterOptions::collect(records.iter()))
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }
}
