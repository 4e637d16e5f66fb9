//! Task tracker HTTP server.
//!
//! # Environment Variables
//!
//! - `STORAGE_MODE`: `in_memory` (default) | `postgres`
//! - `DATABASE_URL`: `PostgreSQL` connection URL (required when `STORAGE_MODE=postgres`)
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default: `5`)
//! - `HOST`: bind address (default: `0.0.0.0`)
//! - `PORT`: bind port (default: `3000`)
//! - `RUST_LOG`: log filter (e.g. `info`, `tasktracker_api=debug`)

use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use tasktracker_api::{AppState, Server, ServerConfig, create_router};
use tasktracker_store::{StoreConfig, StoreFactory};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    tracing::info!("Starting task tracker server");

    let store_config = match StoreConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!("Configuration error: {}", error);
            std::process::exit(1);
        }
    };
    let server_config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!("Configuration error: {}", error);
            std::process::exit(1);
        }
    };

    tracing::info!(
        storage_mode = ?store_config.storage_mode,
        address = %server_config.socket_addr(),
        "Configuration loaded"
    );

    let store = match StoreFactory::new(store_config).create().await {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("Failed to create task store: {}", error);
            std::process::exit(1);
        }
    };

    if let Err(error) = store.initialize().await {
        tracing::error!("Failed to initialize task store: {}", error);
        store.close().await;
        std::process::exit(1);
    }

    let router = create_router(AppState::new(Arc::clone(&store)));
    let result = Server::new(server_config).run(router).await;

    store.close().await;
    result
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("tasktracker_api=debug,tasktracker_store=debug,tower_http=debug,info")
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .init();
}
