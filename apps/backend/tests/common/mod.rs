//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext for setting up test environment with database
//! - Helper functions for creating test data
//! - Authentication helpers
//!
//! # Requirements
//! Integration tests require a PostgreSQL database (set DATABASE_URL env var).

pub mod fixtures;

use std::sync::Arc;

use axum::http::HeaderName;
use axum::Router;
use chrono::Duration;
use uuid::Uuid;

use tilim_backend::db::Database;
use tilim_backend::routes::auth::TELEGRAM_ID_HEADER;
use tilim_backend::services::greeting::GreetingTracker;
use tilim_backend::{api_router, AppState};
use tilim_core::Sm2;

/// Test context containing database connection and test server.
///
/// Use this to set up integration tests with a real database connection.
/// Requires DATABASE_URL environment variable to be set.
pub struct TestContext {
    pub db: Arc<Database>,
    app: Router,
}

impl TestContext {
    /// Create a new test context.
    ///
    /// # Panics
    /// Panics if DATABASE_URL is not set or database connection fails.
    pub async fn new() -> Self {
        dotenvy::dotenv().ok();

        let database_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");

        let db = Database::connect(&database_url)
            .await
            .expect("Failed to connect to test database");

        db.run_migrations()
            .await
            .expect("Failed to run migrations");

        let db = Arc::new(db);

        let state = AppState {
            db: db.clone(),
            greetings: Arc::new(GreetingTracker::new(Duration::minutes(60))),
            scheduler: Sm2::default(),
        };

        let app = api_router(state);

        Self { db, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Create a test user and return its row id and Telegram id.
    pub async fn create_test_user(&self) -> (Uuid, i64) {
        let telegram_id = fixtures::unique_telegram_id();
        let user = self
            .db
            .get_or_create_user(telegram_id, Some("test_user"))
            .await
            .expect("Failed to create test user");
        (user.id, telegram_id)
    }

    /// Header name carrying the Telegram user id.
    pub fn auth_header_name() -> HeaderName {
        HeaderName::from_static(TELEGRAM_ID_HEADER)
    }

    /// Header value for a Telegram id.
    pub fn auth_header_value(telegram_id: i64) -> String {
        telegram_id.to_string()
    }

    /// Clean up test data for a user.
    ///
    /// Call this after tests to remove test data.
    pub async fn cleanup_user(&self, user_id: Uuid) {
        // Delete in order due to foreign keys
        let _ = sqlx::query("DELETE FROM reviews WHERE user_id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await;

        let _ = sqlx::query("DELETE FROM vocabulary WHERE user_id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await;

        let _ = sqlx::query(
            "DELETE FROM sentences WHERE text_id IN (SELECT id FROM texts WHERE user_id = $1)",
        )
        .bind(user_id)
        .execute(self.db.pool())
        .await;

        let _ = sqlx::query("DELETE FROM texts WHERE user_id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await;

        let _ = sqlx::query("DELETE FROM folders WHERE user_id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await;

        let _ = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await;
    }
}
