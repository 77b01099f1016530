//! HTTP server initialization and runtime setup.
//!
//! Selects the storage backend, assembles the modules and runs the Axum server
//! until Ctrl-C or SIGTERM.

use crate::api::middleware::rate_limit;
use crate::bootstrap;
use crate::config::{Config, StorageBackend};
use crate::infrastructure::{Backends, database};

use anyhow::{Context, Result};
use axum::extract::Request;
use axum::{Router, ServiceExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations, or the in-memory backend
/// - Module and entity registries
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Two modules conflict in the registries
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let backends = build_backends(&config).await?;

    let router = bootstrap::init(&config, backends)
        .context("Failed to assemble modules")?
        .into_router();

    let router = with_rate_limit(router, config.behind_proxy);
    let app = NormalizePathLayer::trim_trailing_slash().layer(router);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn build_backends(config: &Config) -> Result<Backends> {
    match config.storage_backend {
        StorageBackend::Postgres => {
            let pool = database::connect(config).await?;
            tracing::info!("Connected to database");

            database::migrate(&pool).await?;
            tracing::info!("Migrations applied");

            Ok(Backends::postgres(Arc::new(pool), &config.file_storage_dir))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, data is lost on restart");
            Ok(Backends::in_memory())
        }
    }
}

fn with_rate_limit(router: Router, behind_proxy: bool) -> Router {
    if behind_proxy {
        router.layer(rate_limit::proxied_layer())
    } else {
        router.layer(rate_limit::layer())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
