//! Pronunciation scoring against a target sentence or word.
//!
//! The caller hands over whatever the speech-to-text collaborator transcribed;
//! both sides are normalized and compared by edit distance. Empty input never
//! fails, it simply scores as a mismatch (or a perfect match when both sides
//! are empty).

use serde::{Deserialize, Serialize};

use crate::distance::levenshtein;
use crate::normalize::normalize;
use crate::types::Language;

/// Similarity threshold used when the caller does not supply one.
pub const DEFAULT_THRESHOLD: f64 = 0.8;

/// Result of scoring a transcribed utterance against the expected text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    /// Whether the utterance passes the threshold.
    pub correct: bool,
    /// Similarity score between 0.0 and 1.0.
    pub similarity: f64,
    /// Normalized target (for display).
    pub target_normalized: String,
    /// Normalized hypothesis (for display).
    pub hypothesis_normalized: String,
}

/// Normalized similarity in [0, 1] derived from the edit distance.
///
/// Lengths are counted in code points. The denominator is floored at 1, so
/// two empty strings score 1.0.
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count()).max(1);
    1.0 - levenshtein(a, b) as f64 / max_len as f64
}

/// Score a speech-to-text hypothesis against the expected text.
///
/// Both sides are normalized for the given language before the distance is
/// computed. The comparison against the threshold is inclusive.
pub fn evaluate(
    target: &str,
    hypothesis: &str,
    language: Language,
    threshold: f64,
) -> EvaluationResult {
    let target_normalized = normalize(target, language);
    let hypothesis_normalized = normalize(hypothesis, language);

    let similarity = similarity(&target_normalized, &hypothesis_normalized);

    EvaluationResult {
        correct: similarity >= threshold,
        similarity,
        target_normalized,
        hypothesis_normalized,
    }
}
