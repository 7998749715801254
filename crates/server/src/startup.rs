use std::{env, net::SocketAddr};

use axum::Router;
use common::utils::logging::init_logging_from_env;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_from_env();
}

pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr(cfg: Option<&configs::AppConfig>) -> anyhow::Result<SocketAddr> {
    let (host, port) = match cfg {
        Some(cfg) => (cfg.server.host.clone(), cfg.server.port),
        None => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8080);
            (host, port)
        }
    };
    let addr = format!("{}:{}", host, port)
        .parse::<SocketAddr>()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {}:{}: {}", host, port, e)))?;
    Ok(addr)
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            warn!(error = %e, "config file unusable; falling back to environment");
            None
        }
    };

    // DB connection
    let db_cfg = match &cfg {
        Some(cfg) => models::db::DatabaseConfig::from(cfg.database.clone()),
        None => models::db::DatabaseConfig::from_env(),
    };
    let db = models::db::connect_with_config(&db_cfg)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| StartupError::Database(format!("migrate up: {}", e)))?;

    let state = ServerState::with_db(db);

    // Build router
    let app: Router = routes::build_router(state, build_cors());

    // Bind and serve
    let addr = load_bind_addr(cfg.as_ref())?;
    info!(%addr, "starting student registry server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received Ctrl+C, draining connections");
    }
}
