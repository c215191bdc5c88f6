//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Re-export shared types from tilim-core
pub use tilim_core::{EvaluationResult, Language, ReviewState};

// === Database Entity Types ===

/// Telegram user row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub telegram_id: i64,
    pub username: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

/// Folder row (folders form a tree per user)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbFolder {
    pub id: Uuid,
    pub user_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl DbFolder {
    pub fn to_api_folder(&self) -> Folder {
        Folder {
            id: self.id,
            parent_id: self.parent_id,
            name: self.name.clone(),
            created_at: self.created_at,
        }
    }
}

/// Parallel text row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbText {
    pub id: Uuid,
    pub user_id: Uuid,
    pub folder_id: Option<Uuid>,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// Sentence pair row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSentence {
    pub id: Uuid,
    pub text_id: Uuid,
    pub position: i32,
    pub english: String,
    pub uzbek: String,
}

impl DbSentence {
    pub fn to_api_sentence(&self) -> SentencePair {
        SentencePair {
            position: self.position,
            english: self.english.clone(),
            uzbek: self.uzbek.clone(),
        }
    }
}

/// Vocabulary row with its embedded review state
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbVocabulary {
    pub id: Uuid,
    pub user_id: Uuid,
    pub word: String,
    pub translation: String,
    pub language: String,
    pub ease_factor: f64,
    pub interval_days: i64,
    pub repetition: i32,
    pub last_reviewed_at: Option<DateTime<Utc>>,
    pub next_review_at: Option<DateTime<Utc>>,
    pub total_reviews: i32,
    pub total_correct: i32,
    pub correct_streak: i32,
    pub last_result: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbVocabulary {
    /// Convert the embedded scheduling columns to a core ReviewState
    pub fn to_review_state(&self) -> ReviewState {
        ReviewState {
            ease_factor: self.ease_factor,
            interval_days: self.interval_days,
            repetition: self.repetition as u32,
            last_reviewed_at: self.last_reviewed_at,
            next_review_at: self.next_review_at,
            total_reviews: self.total_reviews as u32,
            total_correct: self.total_correct as u32,
            correct_streak: self.correct_streak as u32,
            last_result: self.last_result,
        }
    }

    /// Convert to the API item type
    pub fn to_api_item(&self) -> VocabularyItem {
        VocabularyItem {
            id: self.id,
            word: self.word.clone(),
            translation: self.translation.clone(),
            language: Language::from_code(&self.language).unwrap_or_default(),
            review: self.to_review_state(),
            created_at: self.created_at,
        }
    }
}

/// Review log row (append-only)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbReview {
    pub id: Uuid,
    pub vocabulary_id: Uuid,
    pub user_id: Uuid,
    pub quality: i32,
    pub reviewed_at: DateTime<Utc>,
    pub ease_before: f64,
    pub ease_after: f64,
    pub interval_before: i64,
    pub interval_after: i64,
    pub created_at: DateTime<Utc>,
}

// === API Request/Response Types ===

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub telegram_id: i64,
    pub username: Option<String>,
    /// Whether the bot collaborator should send a greeting message.
    pub greet: bool,
}

// Folder types

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderListResponse {
    pub folders: Vec<Folder>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderRequest {
    pub name: String,
    pub parent_id: Option<Uuid>,
}

// Text types

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentencePair {
    pub position: i32,
    pub english: String,
    pub uzbek: String,
}

#[derive(Debug, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TextSummary {
    pub id: Uuid,
    pub folder_id: Option<Uuid>,
    pub title: String,
    pub sentence_count: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextListResponse {
    pub texts: Vec<TextSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextListQuery {
    pub folder_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextResponse {
    pub id: Uuid,
    pub folder_id: Option<Uuid>,
    pub title: String,
    pub sentences: Vec<SentencePair>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSentence {
    pub english: String,
    pub uzbek: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTextRequest {
    pub title: String,
    pub folder_id: Option<Uuid>,
    pub sentences: Vec<NewSentence>,
}

// Vocabulary types

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyItem {
    pub id: Uuid,
    pub word: String,
    pub translation: String,
    pub language: Language,
    #[serde(flatten)]
    pub review: ReviewState,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyListResponse {
    pub items: Vec<VocabularyItem>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVocabularyRequest {
    pub word: String,
    pub translation: String,
    pub language: Option<Language>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyStatsResponse {
    pub total_items: usize,
    pub due_count: usize,
    pub total_reviews: usize,
    pub retention_rate: f64,
    pub average_ease: f64,
}

// Review types

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewQueueQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewQueueResponse {
    pub items: Vec<VocabularyItem>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReviewRequest {
    pub item_id: Uuid,
    pub quality: i64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReviewResponse {
    pub ok: bool,
    pub next_review_at: Option<DateTime<Utc>>,
    pub interval_days: i64,
    pub ease_factor: f64,
}

// Pronunciation types

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PronunciationCheckRequest {
    /// Expected sentence or word. Missing means empty (scored, not rejected).
    pub target: Option<String>,
    /// Speech-to-text transcription of the learner's utterance.
    pub hypothesis: Option<String>,
    pub language: Option<Language>,
    pub threshold: Option<f64>,
}
