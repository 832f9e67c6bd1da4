//! Salesboard server
//!
//! Usage: `salesboard [config.yaml]`
//!
//! The config path may also come from `SALESBOARD_CONFIG`; `SALESBOARD_BIND`
//! overrides the listen address. Log verbosity follows `RUST_LOG`.

use salesboard::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("salesboard=info,tower_http=info")),
        )
        .init();

    let config_path = std::env::args().nth(1);
    let config = DashboardConfig::load(config_path.as_deref())?;

    let store = match &config.data.records_file {
        Some(path) => InMemorySalesStore::from_json_file(path)?,
        None => {
            tracing::warn!("No data.records_file configured, starting with an empty store");
            InMemorySalesStore::new()
        }
    };

    ServerBuilder::new()
        .with_config(config)
        .with_store(store)
        .serve()
        .await
}
