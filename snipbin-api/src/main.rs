//! Entry point for the `snipbin-api` HTTP server.

use snipbin_api::routes::{create_router, AppState};
use snipbin_core::UserSeed;
use tracing::info;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let addr = std::env::var("SNIPBIN_LISTEN_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:3000".to_owned());

    let seeds = load_user_seeds();
    if seeds.is_empty() {
        tracing::warn!("no users seeded; every request will be anonymous and creation will fail");
    }

    let state = AppState::in_memory(seeds);
    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!(addr = %addr, "snipbin-api listening");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}

/// Reads the `SNIPBIN_USERS_FILE` seed file: a JSON array of
/// `{"username": …, "token": …}` entries. Unset means no users.
fn load_user_seeds() -> Vec<UserSeed> {
    let Ok(path) = std::env::var("SNIPBIN_USERS_FILE") else {
        return Vec::new();
    };
    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::error!(path = %path, error = %e, "failed to read users file");
            std::process::exit(1);
        }
    };
    match serde_json::from_str(&raw) {
        Ok(seeds) => seeds,
        Err(e) => {
            tracing::error!(path = %path, error = %e, "users file is not valid JSON");
            std::process::exit(1);
        }
    }
}
