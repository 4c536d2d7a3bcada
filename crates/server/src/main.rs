use server::config;
use server::db;
use server::eval::{PlaceholderEvaluator, SharedEvaluator};
use server::routes;

use std::sync::Arc;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Extension, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env();

    // Connect to Postgres
    tracing::info!("Connecting to database...");
    let pool = db::pool::create_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");

    // Run schema migrations
    tracing::info!("Running migrations...");
    db::pool::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    // Position evaluator behind the replay engine. Placeholder for now;
    // a real engine plugs in here without touching the routes.
    let evaluator: SharedEvaluator = Arc::new(PlaceholderEvaluator::default());

    // CORS — pinned to the frontend origin unless configured otherwise
    let cors = if config.cors_origin == "*" {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origin = config
            .cors_origin
            .parse::<HeaderValue>()
            .expect("Invalid CORS_ORIGIN");
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Build router
    let app = Router::new()
        // Health
        .route("/health", get(routes::health::health_check))
        // Auth
        .route("/api/register", post(routes::auth::register))
        .route("/api/login", post(routes::auth::login))
        // Chess.com game import
        .route("/api/chesscom/games", get(routes::games::chesscom_games))
        // Analysis
        .route("/api/analyze_game", post(routes::analysis::analyze_game))
        .route("/api/save-analysis", post(routes::analysis::save_analysis))
        .route(
            "/api/analysis-history/{username}",
            get(routes::analysis::get_analysis_history),
        )
        .route(
            "/api/update-last-viewed/{analysis_id}",
            post(routes::analysis::update_last_viewed),
        )
        // Shared state
        .layer(Extension(pool))
        .layer(Extension(config.clone()))
        .layer(Extension(evaluator))
        .layer(cors);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind");

    axum::serve(listener, app).await.expect("Server error");
}
