use std::sync::Arc;

use axum::Router;
use configs::{AppConfig, Backend, DatabaseConfig};
use service::product::{InMemoryProductRepository, ProductRepository, SeaOrmProductRepository};
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, AppState};

/// Build the repository the handlers will share.
pub async fn build_repository(cfg: &DatabaseConfig) -> Result<Arc<dyn ProductRepository>, StartupError> {
    match cfg.backend {
        Backend::Memory => {
            warn!("using in-memory product storage; data is lost on exit");
            Ok(Arc::new(InMemoryProductRepository::new()))
        }
        Backend::Postgres => {
            let db = models::db::connect_with_config(cfg)
                .await
                .map_err(|e| StartupError::Database(e.to_string()))?;
            if cfg.ensure_schema {
                models::product::create_table_if_missing(&db)
                    .await
                    .map_err(|e| StartupError::Database(e.to_string()))?;
                info!("products table ensured");
            }
            Ok(Arc::new(SeaOrmProductRepository::new(db)))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; graceful shutdown disabled");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// Build the app from an already loaded config and serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    let products = build_repository(&cfg.database).await?;
    let app: Router = routes::build_router(AppState::new(products));

    let addr = cfg.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.clone(), source })?;
    let local = listener.local_addr().map_err(StartupError::Serve)?;
    info!(addr = %local, backend = ?cfg.database.backend, "starting product api");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(StartupError::Serve)?;
    info!("server stopped");
    Ok(())
}
