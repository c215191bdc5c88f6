//! Parallel text endpoints

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// GET /api/texts
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Query(query): Query<TextListQuery>,
) -> Result<Json<TextListResponse>> {
    let texts = state.db.list_texts(auth.user_id, query.folder_id).await?;

    Ok(Json(TextListResponse { texts }))
}

/// GET /api/texts/:id
pub async fn get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(text_id): Path<Uuid>,
) -> Result<Json<TextResponse>> {
    let text = state
        .db
        .get_text(text_id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Text not found".to_string()))?;

    let sentences = state.db.get_sentences(text.id).await?;

    Ok(Json(TextResponse {
        id: text.id,
        folder_id: text.folder_id,
        title: text.title,
        sentences: sentences.iter().map(|s| s.to_api_sentence()).collect(),
    }))
}

/// POST /api/texts
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<CreateTextRequest>,
) -> Result<Json<TextResponse>> {
    let title = payload.title.trim();
    if title.is_empty() {
        return Err(ApiError::BadRequest("Text title must not be empty".to_string()));
    }
    if payload.sentences.is_empty() {
        return Err(ApiError::BadRequest(
            "A text needs at least one sentence pair".to_string(),
        ));
    }

    if let Some(folder_id) = payload.folder_id {
        state
            .db
            .get_folder(folder_id, auth.user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Folder not found".to_string()))?;
    }

    let text = state
        .db
        .create_text(auth.user_id, payload.folder_id, title)
        .await?;

    let mut sentences = Vec::with_capacity(payload.sentences.len());
    for (position, pair) in payload.sentences.iter().enumerate() {
        let sentence = state
            .db
            .insert_sentence(text.id, position as i32, &pair.english, &pair.uzbek)
            .await?;
        sentences.push(sentence.to_api_sentence());
    }

    tracing::info!(text_id = %text.id, sentences = sentences.len(), "created text");

    Ok(Json(TextResponse {
        id: text.id,
        folder_id: text.folder_id,
        title: text.title,
        sentences,
    }))
}
