//! Authentication middleware
//!
//! The Mini App client forwards the Telegram user id in a header; the
//! middleware resolves it to a user row, creating one on first contact.

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::AppState;

/// Header carrying the numeric Telegram user id.
pub const TELEGRAM_ID_HEADER: &str = "x-telegram-id";

/// Optional header carrying the Telegram username.
pub const TELEGRAM_USERNAME_HEADER: &str = "x-telegram-username";

/// Authenticated user info stored in request extensions
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub telegram_id: i64,
    pub username: Option<String>,
}

/// Auth middleware - resolves the Telegram id header to a user row
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response> {
    let raw = request
        .headers()
        .get(TELEGRAM_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing x-telegram-id header".to_string()))?;

    let telegram_id: i64 = raw
        .trim()
        .parse()
        .map_err(|_| ApiError::Unauthorized("Invalid x-telegram-id header".to_string()))?;

    let username = request
        .headers()
        .get(TELEGRAM_USERNAME_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);

    let user = state
        .db
        .get_or_create_user(telegram_id, username.as_deref())
        .await?;

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: user.id,
        telegram_id: user.telegram_id,
        username: user.username,
    });

    Ok(next.run(request).await)
}
