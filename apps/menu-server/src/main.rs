use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info};

use menu_api::{build_router, AppState};
use menu_core::repositories::{InMemoryNodeStore, NodeStore};
use menu_core::services::MenuService;
use menu_infrastructure::database::{connection, PgNodeStore};
use menu_shared::config::{AppConfig, StoreBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize telemetry; the guard flushes file logs on exit
    let _log_guard = menu_shared::telemetry::init_telemetry(&config.log);

    info!("Menu server starting ({} environment)...", config.app.env);

    let store = build_store(&config).await?;
    let state = AppState::new(MenuService::new(store, config.menu));
    let app = build_router(state);

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()
        .with_context(|| format!("invalid app.host: {}", config.app.host))?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Menu server stopped");
    Ok(())
}

async fn build_store(config: &AppConfig) -> anyhow::Result<Arc<dyn NodeStore>> {
    match config.store.backend {
        StoreBackend::Memory => {
            info!("Using in-memory node store; data is lost on restart");
            Ok(Arc::new(InMemoryNodeStore::new()))
        }
        StoreBackend::Postgres => {
            info!("Connecting to database...");
            let pool = connection::create_pool(&config.database)
                .await
                .context("failed to connect to database")?;
            info!("Database connection established.");

            if config.database.run_migrations {
                connection::run_migrations(&pool)
                    .await
                    .context("failed to run migrations")?;
            }

            Ok(Arc::new(PgNodeStore::new(pool)))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
