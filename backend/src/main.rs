//! Auth service
//!
//! Registers users, verifies credentials, and issues bearer tokens.

use anyhow::Result;
use auth_service_backend::{config, db, routes, state::AppState};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    // A missing signing secret fails here: the service refuses to start
    // rather than run with an undefined key.
    let config = config::AppConfig::load()?;
    let production = config::AppConfig::is_production();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if production { "production" } else { "development" },
        "Starting auth service"
    );

    if production {
        validate_production_config(&config)?;
    }

    let pool = db::create_pool(&config.database)?;
    prepare_store(&pool).await?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = routes::create_router(AppState::new(pool, config));

    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Migrate the store when it is reachable; otherwise start degraded.
///
/// The pool is lazy, so an outage here means store-bound requests answer
/// 503 and the readiness probe reports not_ready until it recovers.
async fn prepare_store(pool: &PgPool) -> Result<()> {
    match db::health_check(pool).await {
        Ok(()) => {
            info!("User store reachable");
            db::run_migrations(pool).await
        }
        Err(e) => {
            warn!("User store unreachable at startup, continuing degraded: {}", e);
            Ok(())
        }
    }
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "auth_service_backend=info,tower_http=info".into()
        } else {
            "auth_service_backend=debug,tower_http=debug,sqlx=warn".into()
        }
    });

    let registry = tracing_subscriber::registry().with(filter);

    // JSON output in production for log aggregation, pretty locally
    if config::AppConfig::is_production() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Reject configurations that would undermine token signing in production
fn validate_production_config(config: &config::AppConfig) -> Result<()> {
    let secret = config.jwt.secret.expose_secret();
    if secret.len() < 32 || secret.contains("development") {
        anyhow::bail!("JWT secret must be at least 32 characters and not a development value");
    }

    if config.database.url.contains("localhost") || config.database.url.contains("127.0.0.1") {
        warn!("Database URL points at localhost in production");
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("terminate signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
