//! Pronunciation check endpoint

use axum::Json;

use crate::error::Result;
use crate::models::{EvaluationResult, PronunciationCheckRequest};
use tilim_core::{evaluate, DEFAULT_THRESHOLD};

/// POST /api/pronunciation/check
///
/// Scores a speech-to-text hypothesis against the expected text. Missing
/// strings are treated as empty so an empty transcription scores as a
/// mismatch instead of failing the request.
pub async fn check(
    Json(payload): Json<PronunciationCheckRequest>,
) -> Result<Json<EvaluationResult>> {
    let target = payload.target.unwrap_or_default();
    let hypothesis = payload.hypothesis.unwrap_or_default();
    let language = payload.language.unwrap_or_default();
    let threshold = payload.threshold.unwrap_or(DEFAULT_THRESHOLD);

    let result = evaluate(&target, &hypothesis, language, threshold);

    tracing::debug!(
        similarity = result.similarity,
        correct = result.correct,
        "pronunciation check"
    );

    Ok(Json(result))
}
