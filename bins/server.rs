use std::process::ExitCode;

use dotenvy::dotenv;
use tracing::{error, info, warn};
use uuid::Uuid;

/// `host[:port]/db` part of a database URL; credentials never reach the log.
fn db_target(url: &str) -> &str {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let rest = rest.rsplit_once('@').map_or(rest, |(_, host)| host);
    rest.split('?').next().unwrap_or(rest)
}

fn worker_threads(cfg: Option<&configs::AppConfig>) -> Option<usize> {
    match cfg {
        Some(cfg) => cfg.server.worker_threads,
        None => std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()),
    }
}

fn main() -> ExitCode {
    // .env first so RUST_LOG / LOG_FORMAT take effect
    dotenv().ok();
    common::utils::logging::init_logging_from_env();

    let boot_id = Uuid::new_v4();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(event = "panic", %boot_id, message = %info, "student registry panicked");
    }));

    let cfg = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            warn!(error = %e, "no usable config file; using environment");
            None
        }
    };
    let threads = worker_threads(cfg.as_ref());

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = threads {
        builder.worker_threads(w);
    }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    let db_url = cfg
        .as_ref()
        .map(|c| c.database.url.clone())
        .unwrap_or_else(|| std::env::var("DATABASE_URL").unwrap_or_default());
    let bind = cfg
        .as_ref()
        .map(|c| format!("{}:{}", c.server.host, c.server.port))
        .unwrap_or_else(|| "from SERVER_HOST/SERVER_PORT".to_string());
    info!(
        event = "start",
        %boot_id,
        version,
        threads = threads.unwrap_or_default(),
        bind = %bind,
        database = db_target(&db_url),
        "student registry starting"
    );

    rt.block_on(async move {
        match server::run().await {
            Ok(()) => {
                info!(event = "stop", %boot_id, "student registry stopped");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!(event = "run_failed", %boot_id, error = %e, "student registry exited with error");
                ExitCode::FAILURE
            }
        }
    })
}
