pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use chrono::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::db::Database;
use crate::services::greeting::GreetingTracker;
use tilim_core::Sm2;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub greetings: Arc<GreetingTracker>,
    pub scheduler: Sm2,
}

/// Build the API router: every route except /health sits behind the
/// Telegram-header auth middleware.
pub fn api_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        // User routes
        .route("/api/me", get(routes::users::me))
        // Folder routes
        .route("/api/folders", get(routes::folders::list))
        .route("/api/folders", post(routes::folders::create))
        .route("/api/folders/:id", delete(routes::folders::remove))
        // Text routes
        .route("/api/texts", get(routes::texts::list))
        .route("/api/texts", post(routes::texts::create))
        .route("/api/texts/:id", get(routes::texts::get))
        // Vocabulary routes
        .route("/api/vocabulary", get(routes::vocabulary::list))
        .route("/api/vocabulary", post(routes::vocabulary::create))
        .route("/api/vocabulary/stats", get(routes::vocabulary::stats))
        .route("/api/vocabulary/:id", delete(routes::vocabulary::remove))
        // Review routes
        .route("/api/review/queue", get(routes::review::queue))
        .route("/api/review", post(routes::review::submit))
        // Pronunciation routes
        .route("/api/pronunciation/check", post(routes::pronunciation::check))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::auth::auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .merge(protected_routes)
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Connect to database
    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set");

    tracing::info!("Connecting to database...");
    let db = Database::connect(&database_url).await?;

    tracing::info!("Running migrations...");
    db.run_migrations().await?;

    let cooldown_minutes: i64 = std::env::var("GREETING_COOLDOWN_MINUTES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(60);

    let state = AppState {
        db: Arc::new(db),
        greetings: Arc::new(GreetingTracker::new(Duration::minutes(cooldown_minutes))),
        scheduler: Sm2::default(),
    };

    let app = api_router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
