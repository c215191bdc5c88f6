//! User profile endpoint

use axum::{extract::State, Extension, Json};
use chrono::Utc;

use crate::error::Result;
use crate::models::MeResponse;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// GET /api/me
/// Returns the profile plus a greet flag for the bot collaborator
pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<MeResponse>> {
    let greet = state.greetings.should_greet(auth.user_id, Utc::now());

    if greet {
        tracing::info!(telegram_id = auth.telegram_id, "greeting user");
    }

    Ok(Json(MeResponse {
        telegram_id: auth.telegram_id,
        username: auth.username,
        greet,
    }))
}
