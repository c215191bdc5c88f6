//! Review endpoints

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;
use tilim_core::Quality;

const DEFAULT_QUEUE_LIMIT: i64 = 20;
const MAX_QUEUE_LIMIT: i64 = 100;

/// GET /api/review/queue
pub async fn queue(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Query(query): Query<ReviewQueueQuery>,
) -> Result<Json<ReviewQueueResponse>> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_QUEUE_LIMIT)
        .clamp(1, MAX_QUEUE_LIMIT);

    let items = state
        .db
        .get_due_vocabulary(auth.user_id, Utc::now(), limit)
        .await?;

    Ok(Json(ReviewQueueResponse {
        items: items.iter().map(|v| v.to_api_item()).collect(),
    }))
}

/// POST /api/review
pub async fn submit(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<SubmitReviewRequest>,
) -> Result<Json<SubmitReviewResponse>> {
    // Validate the grade before touching any state
    let quality = Quality::new(payload.quality)?;

    let item = state
        .db
        .get_vocabulary_item(payload.item_id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Vocabulary item not found".to_string()))?;

    let before = item.to_review_state();
    let now = Utc::now();
    let after = state.scheduler.review(&before, quality, now);

    state
        .db
        .update_review_state(item.id, auth.user_id, &after)
        .await?;

    let review = DbReview {
        id: Uuid::new_v4(),
        vocabulary_id: item.id,
        user_id: auth.user_id,
        quality: payload.quality as i32,
        reviewed_at: now,
        ease_before: before.ease_factor,
        ease_after: after.ease_factor,
        interval_before: before.interval_days,
        interval_after: after.interval_days,
        created_at: now,
    };
    state.db.insert_review(&review).await?;

    tracing::debug!(
        item_id = %item.id,
        quality = payload.quality,
        interval_days = after.interval_days,
        "recorded review"
    );

    Ok(Json(SubmitReviewResponse {
        ok: true,
        next_review_at: after.next_review_at,
        interval_days: after.interval_days,
        ease_factor: after.ease_factor,
    }))
}
