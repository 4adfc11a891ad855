// SPDX-FileCopyrightText: 2026 PawMarket Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `pawmarket serve` command implementation.
//!
//! Opens the SQLite listing store (applying migrations), builds the HTTP
//! gateway and serves until Ctrl-C, then checkpoints the WAL.

use std::sync::Arc;
use std::time::Duration;

use pawmarket_config::model::{AdminConfig, ImageConfig, PawmarketConfig};
use pawmarket_core::{ListingStore, PawmarketError};
use pawmarket_gateway::{AdminCredentials, GatewayState, ServerConfig};
use pawmarket_image::ThumbnailBounds;
use pawmarket_storage::SqliteStorage;
use tracing::{error, info, warn};

/// Runs the `pawmarket serve` command.
pub async fn run_serve(config: PawmarketConfig) -> Result<(), PawmarketError> {
    init_tracing(&config.app.log_level);

    info!(name = %config.app.name, "starting pawmarket serve");

    if config.admin.password_hash.is_none() {
        warn!("admin.password_hash is not set -- admin login is disabled");
    }

    let storage = Arc::new(SqliteStorage::new(config.storage.clone()));
    storage.initialize().await?;

    let state = GatewayState::new(
        storage.clone(),
        admin_credentials(&config.admin),
        thumbnail_bounds(&config.images),
    );
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };

    let served = pawmarket_gateway::start_server(&server_config, state, shutdown_signal()).await;

    if let Err(e) = storage.close().await {
        error!(error = %e, "failed to checkpoint database on shutdown");
    }
    served?;

    info!("pawmarket serve shutdown complete");
    Ok(())
}

/// Map the admin config section onto gateway credentials.
pub fn admin_credentials(admin: &AdminConfig) -> AdminCredentials {
    AdminCredentials {
        username: admin.username.clone(),
        password_hash: admin.password_hash.clone(),
        session_ttl: Duration::from_secs(admin.session_ttl_secs),
    }
}

pub fn thumbnail_bounds(images: &ImageConfig) -> ThumbnailBounds {
    ThumbnailBounds {
        max_width: images.max_width,
        max_height: images.max_height,
    }
}

/// Resolves on Ctrl-C. If the handler cannot be installed, never resolves.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            error!(error = %e, "failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pawmarket={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
