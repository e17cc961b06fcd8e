//! PhishGuard Cloud Backend Server
//!
//! Detection API server for the PhishGuard dashboard.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   PHISHGUARD CLOUD                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌─────────────┐  ┌──────────────────────┐  │
//! │  │  API      │  │  Detection  │  │  Maintenance         │  │
//! │  │  Gateway  │─▶│  Service    │  │  (cache sweep,       │  │
//! │  │  (Axum)   │  │  (core)     │  │   brand reload)      │  │
//! │  └───────────┘  └──────┬──────┘  └──────────────────────┘  │
//! │                        ▼                                    │
//! │                 ┌─────────────┐                             │
//! │                 │ RDAP intel  │                             │
//! │                 └─────────────┘                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use phishguard_core::intel::brands::BrandSet;
use phishguard_core::intel::rdap::RdapProvider;
use phishguard_core::intel::{DomainIntel, StaticIntel};
use phishguard_core::scoring::rules::DecisionThresholds;
use phishguard_core::{DetectionConfig, DetectionService};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "phishguard_cloud=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("PhishGuard Cloud Server starting...");

    // Brand set: file-backed when configured, built-in otherwise
    let brands = match &config.brand_set_path {
        Some(path) => match BrandSet::load_path(std::path::Path::new(path)) {
            Ok(set) => {
                tracing::info!("Loaded {} brand entries from {}", set.len(), path);
                set
            }
            Err(err) => {
                tracing::warn!("Failed to load brand set from {}: {}, using built-in", path, err);
                BrandSet::builtin()
            }
        },
        None => BrandSet::builtin(),
    };

    // Domain intel provider
    let intel: Arc<dyn DomainIntel> = match &config.rdap_base_url {
        Some(base) => {
            tracing::info!("Domain intel: RDAP at {}", base);
            Arc::new(RdapProvider::new(base))
        }
        None => {
            tracing::info!("Domain intel: offline (no RDAP_BASE_URL set)");
            Arc::new(StaticIntel::new())
        }
    };

    let detection = DetectionConfig {
        max_input_bytes: config.max_input_bytes,
        lookup_deadline: Duration::from_millis(config.lookup_deadline_ms),
        cache_capacity: config.cache_capacity,
        cache_ttl: Duration::from_secs(config.cache_ttl_secs),
        thresholds: DecisionThresholds::default(),
        ..DetectionConfig::default()
    };

    let service = Arc::new(DetectionService::new(detection, brands, intel));

    // Background maintenance
    spawn_cache_sweeper(Arc::clone(&service), config.cache_sweep_secs);
    if let Some(path) = config.brand_set_path.clone() {
        spawn_brand_reloader(Arc::clone(&service), path, config.brand_reload_secs);
    }

    // Build application state and router
    let state = AppState { service };
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<DetectionService>,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/v1/analyze/url", post(handlers::analyze::url))
        .route("/api/v1/analyze/email", post(handlers::analyze::email))
        .route("/api/v1/analyze/qr", post(handlers::analyze::qr))
        .route("/api/v1/analyze/domain", post(handlers::analyze::domain))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Periodically confirm lazy cache expiry by sweeping expired verdicts.
fn spawn_cache_sweeper(service: Arc<DetectionService>, every_secs: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(every_secs.max(1)));
        loop {
            interval.tick().await;
            let removed = service.sweep_cache();
            if removed > 0 {
                tracing::debug!("Cache sweep removed {} expired verdicts", removed);
            }
        }
    });
}

/// Periodically reload the brand set. The store swaps a complete
/// snapshot, so in-flight requests keep the set they started with.
fn spawn_brand_reloader(service: Arc<DetectionService>, path: String, every_secs: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(every_secs.max(1)));
        // The first tick fires immediately; the startup load already
        // happened, so skip it.
        interval.tick().await;
        loop {
            interval.tick().await;
            match tokio::fs::read_to_string(&path).await {
                Ok(json) => match BrandSet::from_json(&json) {
                    Ok(set) => {
                        tracing::info!("Reloaded {} brand entries from {}", set.len(), path);
                        service.brand_store().reload(set);
                    }
                    Err(err) => {
                        tracing::warn!("Brand set at {} failed to parse: {}", path, err);
                    }
                },
                Err(err) => {
                    tracing::warn!("Brand set at {} unreadable: {}", path, err);
                }
            }
        }
    });
}
