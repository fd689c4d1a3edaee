use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use beautyboss_api::booking_sessions::BookingSessions;
use beautyboss_api::config::{ServerConfig, StorageBackend};
use beautyboss_api::router::build_app_router;
use beautyboss_api::state::AppState;
use beautyboss_db::{MemoryStore, PgStore, Store};
use beautyboss_events::{ActivityLog, EventBus};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "beautyboss_api=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);
    if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    // --- Configuration ---
    let config = ServerConfig::from_env().context("Invalid server configuration")?;
    tracing::info!(
        host = %config.host,
        port = %config.port,
        storage = ?config.storage,
        "Loaded server configuration"
    );

    // --- Storage ---
    let store = connect_store(&config).await?;

    // --- Event bus ---
    let event_bus = Arc::new(EventBus::default());
    let activity_handle = tokio::spawn(ActivityLog::run(event_bus.subscribe()));
    tracing::info!("Event bus created, activity log started");

    // --- Booking sessions ---
    let booking_sessions = Arc::new(BookingSessions::new(
        Duration::from_secs(config.booking_session_ttl_secs),
        config.max_booking_sessions,
    ));
    let sweeper_cancel = CancellationToken::new();
    let sweeper_handle = tokio::spawn(
        Arc::clone(&booking_sessions).run_sweeper(sweeper_cancel.clone()),
    );

    // --- App state ---
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
        event_bus: Arc::clone(&event_bus),
        booking_sessions,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let host: IpAddr = config
        .host
        .parse()
        .with_context(|| format!("Invalid HOST address '{}'", config.host))?;
    let addr = SocketAddr::new(host, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");
    let grace = Duration::from_secs(config.shutdown_timeout_secs);

    sweeper_cancel.cancel();
    let _ = tokio::time::timeout(grace, sweeper_handle).await;
    tracing::info!("Booking session sweeper stopped");

    // Dropping the last sender closes the channel and ends the activity log.
    drop(event_bus);
    match tokio::time::timeout(grace, activity_handle).await {
        Ok(Ok(logged)) => tracing::info!(logged, "Activity log shut down"),
        Ok(Err(e)) => tracing::warn!(error = %e, "Activity log task failed"),
        Err(_) => tracing::warn!("Activity log did not stop in time"),
    }

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Build the configured storage backend. Postgres is health-checked and
/// migrated before it is handed out.
async fn connect_store(config: &ServerConfig) -> anyhow::Result<Arc<dyn Store>> {
    match config.storage {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set")?;

            let pool = beautyboss_db::create_pool(database_url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Database connection pool created");

            beautyboss_db::health_check(&pool)
                .await
                .context("Database health check failed")?;
            tracing::info!("Database health check passed");

            beautyboss_db::run_migrations(&pool)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations applied");

            Ok(Arc::new(PgStore::new(pool)))
        }
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
