//! ServerBuilder for fluent API to build HTTP servers

use super::handlers::AppState;
use super::router::{build_health_routes, build_sales_routes};
use crate::config::DashboardConfig;
use crate::core::query::QueryNormalizer;
use crate::core::service::SalesQueryService;
use crate::core::store::SalesStore;
use anyhow::{Context, Result};
use axum::Router;
use axum::http::{HeaderValue, Method};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Builder for creating the dashboard HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(DashboardConfig::from_yaml_file("salesboard.yaml")?)
///     .with_store(InMemorySalesStore::from_json_file("sales.json")?)
///     .build()?;
/// ```
pub struct ServerBuilder {
    store: Option<Arc<dyn SalesStore>>,
    config: DashboardConfig,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            store: None,
            config: DashboardConfig::default_config(),
            custom_routes: Vec::new(),
        }
    }

    /// Set the sales store (required)
    pub fn with_store(self, store: impl SalesStore + 'static) -> Self {
        self.with_shared_store(Arc::new(store))
    }

    /// Set an already shared sales store (required)
    pub fn with_shared_store(mut self, store: Arc<dyn SalesStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: DashboardConfig) -> Self {
        self.config = config;
        self
    }

    /// Add custom routes to the server
    ///
    /// Use this for endpoints outside the sales API, such as exports or
    /// administrative hooks.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Build the final router
    ///
    /// This generates:
    /// - Sales routes
    /// - Health check routes
    /// - Custom routes
    ///
    /// wrapped in request tracing and CORS layers.
    pub fn build(mut self) -> Result<Router> {
        self.config.validate()?;

        let store = self
            .store
            .take()
            .ok_or_else(|| anyhow::anyhow!("SalesStore is required. Call .with_store()"))?;

        let state = AppState {
            service: SalesQueryService::new(store),
            normalizer: QueryNormalizer::new(self.config.query),
        };

        let mut app = build_health_routes().merge(build_sales_routes(state));
        for custom_router in self.custom_routes {
            app = app.merge(custom_router);
        }

        let cors = cors_layer(&self.config.server.cors_origins)?;
        Ok(app.layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        ))
    }

    /// Serve the application on the configured bind address
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.server.bind.clone();
        self.serve_on(&addr).await
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    ///
    /// # Example
    ///
    /// ```ignore
    /// ServerBuilder::new()
    ///     .with_store(store)
    ///     .serve_on("127.0.0.1:5000").await?;
    /// ```
    pub async fn serve_on(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// CORS for the browser dashboard: read-only methods, any origin unless restricted
fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    if origins.is_empty() {
        return Ok(layer.allow_origin(Any));
    }

    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .with_context(|| format!("Invalid CORS origin '{}'", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(layer.allow_origin(AllowOrigin::list(origins)))
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
