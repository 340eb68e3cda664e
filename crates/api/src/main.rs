use std::net::SocketAddr;
use std::sync::Arc;

use cinereview_db::repositories::{MovieRepo, ReviewRepo, UserRepo};
use cinereview_omdb::OmdbClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinereview_api::config::ServerConfig;
use cinereview_api::router::build_app_router;
use cinereview_api::services::{AuthService, MovieService, ReviewService};
use cinereview_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinereview_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        environment = ?config.environment,
        "Loaded server configuration"
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = cinereview_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    cinereview_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    cinereview_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- External ratings ---
    let omdb = OmdbClient::new(config.omdb.clone()).expect("Failed to build OMDb HTTP client");
    if config.omdb.api_key.is_none() {
        tracing::warn!("OMDB_API_KEY is not set; IMDb ratings will be reported as N/A");
    }

    // --- Services ---
    let state = AppState {
        config: Arc::new(config.clone()),
        auth: Arc::new(AuthService::new(
            Arc::new(UserRepo::new(pool.clone())),
            config.jwt.clone(),
        )),
        movies: Arc::new(MovieService::new(
            Arc::new(MovieRepo::new(pool.clone())),
            Arc::new(omdb),
        )),
        reviews: Arc::new(ReviewService::new(Arc::new(ReviewRepo::new(pool.clone())))),
    };

    // --- Router ---
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

    pool.close().await;
    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
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
        () = ctrl_c => tracing::info!("Received Ctrl-C, starting graceful shutdown"),
        () = terminate => tracing::info!("Received SIGTERM, starting graceful shutdown"),
    }
}
