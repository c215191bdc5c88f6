//! Vocabulary endpoints

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// GET /api/vocabulary
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<VocabularyListResponse>> {
    let items = state.db.list_vocabulary(auth.user_id).await?;

    Ok(Json(VocabularyListResponse {
        items: items.iter().map(|v| v.to_api_item()).collect(),
    }))
}

/// POST /api/vocabulary
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<CreateVocabularyRequest>,
) -> Result<Json<VocabularyItem>> {
    let word = payload.word.trim();
    let translation = payload.translation.trim();
    if word.is_empty() || translation.is_empty() {
        return Err(ApiError::BadRequest(
            "Word and translation must not be empty".to_string(),
        ));
    }

    let language = payload.language.unwrap_or_default();
    let initial = state.scheduler.initial_state();

    let item = state
        .db
        .create_vocabulary(auth.user_id, word, translation, language.as_str(), &initial)
        .await?;

    Ok(Json(item.to_api_item()))
}

/// DELETE /api/vocabulary/:id
pub async fn remove(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(item_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    let deleted = state.db.delete_vocabulary(item_id, auth.user_id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Vocabulary item not found".to_string()));
    }

    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// GET /api/vocabulary/stats
pub async fn stats(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<VocabularyStatsResponse>> {
    let stats = state
        .db
        .get_vocabulary_stats(auth.user_id, Utc::now())
        .await?;

    Ok(Json(stats))
}
