use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{error, info, warn};

use marquee::config::SiteConfig;
use marquee::server::database::Database;
use marquee::server::handlers::AppState;
use marquee::server::routes::build_router;

#[tokio::main]
async fn main() {
    let config = match SiteConfig::load().and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    // Initialize logging at the configured level.
    let level = config
        .logging
        .level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    if config.auth.uses_fallback_secret() {
        warn!("MARQUEE_SESSION_SECRET is unset; using the insecure fallback. Do not deploy this.");
    }
    if config.auth.admin_password.is_empty() {
        warn!("MARQUEE_ADMIN_PASSWORD is unset; admin logins are disabled.");
    }

    // Storage is optional: without a connection string the service runs in
    // demo mode and data endpoints fail closed.
    let db: Option<Arc<Database>> = if config.database.is_configured() {
        match Database::connect(&config.database).await {
            Ok(db) => {
                if let Err(e) = db.migrate().await {
                    error!("Failed to create tables: {e}");
                    std::process::exit(1);
                }
                info!(backend = db.backend_name(), "Storage connected");
                Some(db)
            }
            Err(e) => {
                error!("Failed to connect to storage: {e}");
                std::process::exit(1);
            }
        }
    } else {
        warn!("No database URL configured; running in demo mode");
        None
    };

    let state = match AppState::new(&config, db) {
        Ok(state) => state,
        Err(e) => {
            error!("Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    let app = build_router(state);

    let addr = SocketAddr::new(
        config
            .server
            .host
            .parse()
            .unwrap_or_else(|_| [127, 0, 0, 1].into()),
        config.server.port,
    );

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };

    info!("Listening on http://{addr}");

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {e}");
        std::process::exit(1);
    }
}
