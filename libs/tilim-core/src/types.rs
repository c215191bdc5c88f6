//! Core types shared by the scheduler and the pronunciation evaluator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Self-assessed recall grade for a review, 0-5.
///
/// Grades of 3 and above count as a successful recall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Quality(u8);

impl Quality {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 5;

    /// Validate a raw grade. Values outside 0-5 are rejected.
    pub fn new(value: i64) -> Result<Self> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(CoreError::InvalidQuality { value })
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Whether this grade counts as a successful recall.
    pub fn is_success(self) -> bool {
        self.0 >= 3
    }
}

/// Language code for text normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Uz,
    Ru,
    Tr,
}

impl Default for Language {
    fn default() -> Self {
        Self::En
    }
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Uz => "uz",
            Self::Ru => "ru",
            Self::Tr => "tr",
        }
    }

    /// Parse from a two-letter code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Self::En),
            "uz" => Some(Self::Uz),
            "ru" => Some(Self::Ru),
            "tr" => Some(Self::Tr),
            _ => None,
        }
    }
}

/// Per-item spaced repetition state.
///
/// Owned by the vocabulary entry it belongs to and mutated only through
/// [`crate::scheduler::Sm2::review`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewState {
    pub ease_factor: f64,
    pub interval_days: i64,
    /// Consecutive successful reviews since the last failure.
    pub repetition: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reviewed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_review_at: Option<DateTime<Utc>>,
    pub total_reviews: u32,
    pub total_correct: u32,
    pub correct_streak: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_result: Option<bool>,
}

impl Default for ReviewState {
    fn default() -> Self {
        Self {
            ease_factor: 2.5,
            interval_days: 0,
            repetition: 0,
            last_reviewed_at: None,
            next_review_at: None,
            total_reviews: 0,
            total_correct: 0,
            correct_streak: 0,
            last_result: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_accepts_full_range() {
        for value in 0..=5 {
            assert_eq!(Quality::new(value).unwrap().value(), value as u8);
        }
    }

    #[test]
    fn quality_rejects_out_of_range() {
        assert!(Quality::new(-1).is_err());
        assert!(Quality::new(6).is_err());
        assert!(Quality::new(i64::MAX).is_err());
    }

    #[test]
    fn quality_success_boundary() {
        assert!(!Quality::new(2).unwrap().is_success());
        assert!(Quality::new(3).unwrap().is_success());
        assert!(Quality::new(5).unwrap().is_success());
    }

    #[test]
    fn language_round_trips_codes() {
        for lang in [Language::En, Language::Uz, Language::Ru, Language::Tr] {
            assert_eq!(Language::from_code(lang.as_str()), Some(lang));
        }
        assert_eq!(Language::from_code("fr"), None);
    }
}
