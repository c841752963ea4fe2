#![forbid(unsafe_code)]

use mantis_server::{build_router, validate_startup_config, ApiConfig, AppState};
use mantis_store::{DocumentStore, MemoryStore, SqliteStore};
use std::env;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if env_bool("MANTIS_LOG_JSON", false) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("register SIGTERM");
        let mut sigint = signal(SignalKind::interrupt()).expect("register SIGINT");
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_tracing();

    let bind_addr = env::var("MANTIS_BIND").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let api = ApiConfig {
        max_body_bytes: env_usize("MANTIS_MAX_BODY_BYTES", 64 * 1024),
        default_notification_limit: env_usize("MANTIS_NOTIFICATION_LIMIT", 50),
        max_list_limit: env_usize("MANTIS_MAX_LIST_LIMIT", 500),
    };
    validate_startup_config(&api)?;

    // The store handle is constructed here and closed after the server
    // drains; handlers only ever see the shared trait object.
    let store: Arc<dyn DocumentStore> = match env::var("MANTIS_DB_PATH") {
        Ok(path) => {
            let store = SqliteStore::open(Path::new(&path))
                .map_err(|e| format!("open store at {path}: {e}"))?;
            info!("sqlite store open at {path}");
            Arc::new(store)
        }
        Err(_) => {
            warn!("MANTIS_DB_PATH unset; using in-memory store, data is lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    let state = AppState::with_config(Arc::clone(&store), api);
    let app = build_router(state);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| format!("bind {bind_addr} failed: {e}"))?;
    info!("mantis-server listening on {bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .map_err(|e| format!("server failed: {e}"))?;

    if let Err(e) = store.close().await {
        error!("store close failed: {e}");
    }
    Ok(())
}
