use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use toonshelf_api::config::ServerConfig;
use toonshelf_api::router::build_app_router;
use toonshelf_api::state::AppState;
use toonshelf_cache::RecentlyViewedCache;
use toonshelf_db::PgActivityStore;
use toonshelf_worker::{FavouriteWorkerPool, ViewWorkerPool};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "toonshelf_api=debug,toonshelf_worker=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = toonshelf_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    toonshelf_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    toonshelf_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Recently-viewed cache ---
    let recently_viewed = RecentlyViewedCache::connect(&config.cache).await;

    // --- Worker pools ---
    let store = Arc::new(PgActivityStore::new(pool.clone()));

    let view_pool = Arc::new(
        ViewWorkerPool::for_views(config.view_pool.clone(), store.clone())
            .expect("invalid view pool configuration"),
    );
    let favourite_pool = Arc::new(
        FavouriteWorkerPool::for_favourites(config.favourite_pool.clone(), store)
            .expect("invalid favourite pool configuration"),
    );
    view_pool.start();
    favourite_pool.start();

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        view_pool: Arc::clone(&view_pool),
        favourite_pool: Arc::clone(&favourite_pool),
        recently_viewed,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    // No producer is left, so nothing can race the pools' shutdown.
    tracing::info!("Server stopped accepting connections, draining worker pools");
    tokio::join!(view_pool.shutdown(), favourite_pool.shutdown());

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
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
