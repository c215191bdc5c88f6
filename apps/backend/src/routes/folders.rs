//! Folder endpoints

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// GET /api/folders
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<FolderListResponse>> {
    let folders = state.db.get_folders(auth.user_id).await?;

    Ok(Json(FolderListResponse {
        folders: folders.iter().map(|f| f.to_api_folder()).collect(),
    }))
}

/// POST /api/folders
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<CreateFolderRequest>,
) -> Result<Json<Folder>> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("Folder name must not be empty".to_string()));
    }

    // Parent must exist and belong to the same user
    if let Some(parent_id) = payload.parent_id {
        state
            .db
            .get_folder(parent_id, auth.user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Parent folder not found".to_string()))?;
    }

    let folder = state
        .db
        .create_folder(auth.user_id, name, payload.parent_id)
        .await?;

    Ok(Json(folder.to_api_folder()))
}

/// DELETE /api/folders/:id
pub async fn remove(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(folder_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    let deleted = state.db.delete_folder(folder_id, auth.user_id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Folder not found".to_string()));
    }

    Ok(Json(serde_json::json!({ "deleted": true })))
}
