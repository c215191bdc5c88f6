//! PostgreSQL database operations

use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, PgPool, Row};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Migration(e.to_string()))?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === User Repository ===

    /// Look up a user by Telegram id, creating the row on first contact.
    /// Bumps last_seen_at either way.
    pub async fn get_or_create_user(
        &self,
        telegram_id: i64,
        username: Option<&str>,
    ) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (telegram_id, username)
            VALUES ($1, $2)
            ON CONFLICT (telegram_id) DO UPDATE SET
                last_seen_at = NOW(),
                username = COALESCE(EXCLUDED.username, users.username)
            RETURNING id, telegram_id, username, created_at, last_seen_at
            "#,
        )
        .bind(telegram_id)
        .bind(username)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    // === Folder Repository ===

    /// Create a folder, optionally under a parent
    pub async fn create_folder(
        &self,
        user_id: Uuid,
        name: &str,
        parent_id: Option<Uuid>,
    ) -> Result<DbFolder> {
        let folder = sqlx::query_as::<_, DbFolder>(
            r#"
            INSERT INTO folders (user_id, parent_id, name)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, parent_id, name, created_at
            "#,
        )
        .bind(user_id)
        .bind(parent_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(folder)
    }

    /// Get a folder owned by the user
    pub async fn get_folder(&self, folder_id: Uuid, user_id: Uuid) -> Result<Option<DbFolder>> {
        let folder = sqlx::query_as::<_, DbFolder>(
            r#"
            SELECT id, user_id, parent_id, name, created_at
            FROM folders
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(folder_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(folder)
    }

    /// Get all folders for a user
    pub async fn get_folders(&self, user_id: Uuid) -> Result<Vec<DbFolder>> {
        let folders = sqlx::query_as::<_, DbFolder>(
            r#"
            SELECT id, user_id, parent_id, name, created_at
            FROM folders
            WHERE user_id = $1
            ORDER BY name
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(folders)
    }

    /// Delete a folder (children cascade)
    pub async fn delete_folder(&self, folder_id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM folders
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(folder_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    // === Text Repository ===

    /// Create a parallel text
    pub async fn create_text(
        &self,
        user_id: Uuid,
        folder_id: Option<Uuid>,
        title: &str,
    ) -> Result<DbText> {
        let text = sqlx::query_as::<_, DbText>(
            r#"
            INSERT INTO texts (user_id, folder_id, title)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, folder_id, title, created_at
            "#,
        )
        .bind(user_id)
        .bind(folder_id)
        .bind(title)
        .fetch_one(&self.pool)
        .await?;

        Ok(text)
    }

    /// Insert one sentence pair of a text
    pub async fn insert_sentence(
        &self,
        text_id: Uuid,
        position: i32,
        english: &str,
        uzbek: &str,
    ) -> Result<DbSentence> {
        let sentence = sqlx::query_as::<_, DbSentence>(
            r#"
            INSERT INTO sentences (text_id, position, english, uzbek)
            VALUES ($1, $2, $3, $4)
            RETURNING id, text_id, position, english, uzbek
            "#,
        )
        .bind(text_id)
        .bind(position)
        .bind(english)
        .bind(uzbek)
        .fetch_one(&self.pool)
        .await?;

        Ok(sentence)
    }

    /// List texts for a user with sentence counts, optionally by folder
    pub async fn list_texts(
        &self,
        user_id: Uuid,
        folder_id: Option<Uuid>,
    ) -> Result<Vec<TextSummary>> {
        let texts = match folder_id {
            Some(folder) => {
                sqlx::query_as::<_, TextSummary>(
                    r#"
                    SELECT t.id, t.folder_id, t.title,
                           COUNT(s.id) as sentence_count, t.created_at
                    FROM texts t
                    LEFT JOIN sentences s ON s.text_id = t.id
                    WHERE t.user_id = $1 AND t.folder_id = $2
                    GROUP BY t.id
                    ORDER BY t.created_at
                    "#,
                )
                .bind(user_id)
                .bind(folder)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, TextSummary>(
                    r#"
                    SELECT t.id, t.folder_id, t.title,
                           COUNT(s.id) as sentence_count, t.created_at
                    FROM texts t
                    LEFT JOIN sentences s ON s.text_id = t.id
                    WHERE t.user_id = $1
                    GROUP BY t.id
                    ORDER BY t.created_at
                    "#,
                )
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(texts)
    }

    /// Get a text owned by the user
    pub async fn get_text(&self, text_id: Uuid, user_id: Uuid) -> Result<Option<DbText>> {
        let text = sqlx::query_as::<_, DbText>(
            r#"
            SELECT id, user_id, folder_id, title, created_at
            FROM texts
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(text_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(text)
    }

    /// Get the ordered sentence pairs of a text
    pub async fn get_sentences(&self, text_id: Uuid) -> Result<Vec<DbSentence>> {
        let sentences = sqlx::query_as::<_, DbSentence>(
            r#"
            SELECT id, text_id, position, english, uzbek
            FROM sentences
            WHERE text_id = $1
            ORDER BY position
            "#,
        )
        .bind(text_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sentences)
    }

    // === Vocabulary Repository ===

    /// Create a vocabulary entry with its initial review state
    pub async fn create_vocabulary(
        &self,
        user_id: Uuid,
        word: &str,
        translation: &str,
        language: &str,
        state: &ReviewState,
    ) -> Result<DbVocabulary> {
        let item = sqlx::query_as::<_, DbVocabulary>(
            r#"
            INSERT INTO vocabulary (user_id, word, translation, language,
                                    ease_factor, interval_days, repetition)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, word, translation, language,
                      ease_factor, interval_days, repetition,
                      last_reviewed_at, next_review_at,
                      total_reviews, total_correct, correct_streak, last_result,
                      created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(word)
        .bind(translation)
        .bind(language)
        .bind(state.ease_factor)
        .bind(state.interval_days)
        .bind(state.repetition as i32)
        .fetch_one(&self.pool)
        .await?;

        Ok(item)
    }

    /// Get all vocabulary for a user
    pub async fn list_vocabulary(&self, user_id: Uuid) -> Result<Vec<DbVocabulary>> {
        let items = sqlx::query_as::<_, DbVocabulary>(
            r#"
            SELECT id, user_id, word, translation, language,
                   ease_factor, interval_days, repetition,
                   last_reviewed_at, next_review_at,
                   total_reviews, total_correct, correct_streak, last_result,
                   created_at, updated_at
            FROM vocabulary
            WHERE user_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Get a vocabulary item owned by the user
    pub async fn get_vocabulary_item(
        &self,
        item_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<DbVocabulary>> {
        let item = sqlx::query_as::<_, DbVocabulary>(
            r#"
            SELECT id, user_id, word, translation, language,
                   ease_factor, interval_days, repetition,
                   last_reviewed_at, next_review_at,
                   total_reviews, total_correct, correct_streak, last_result,
                   created_at, updated_at
            FROM vocabulary
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(item_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Delete a vocabulary item (its reviews cascade)
    pub async fn delete_vocabulary(&self, item_id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM vocabulary
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(item_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Get vocabulary due for review: never reviewed, or due by `now`
    pub async fn get_due_vocabulary(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<DbVocabulary>> {
        let items = sqlx::query_as::<_, DbVocabulary>(
            r#"
            SELECT id, user_id, word, translation, language,
                   ease_factor, interval_days, repetition,
                   last_reviewed_at, next_review_at,
                   total_reviews, total_correct, correct_streak, last_result,
                   created_at, updated_at
            FROM vocabulary
            WHERE user_id = $1
              AND (next_review_at IS NULL OR next_review_at <= $2)
            ORDER BY next_review_at NULLS FIRST, created_at
            LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(now)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Persist the scheduling state of one item.
    ///
    /// Concurrent reviews of the same item serialize on this row update; the
    /// last writer wins, which matches one learner tapping twice.
    pub async fn update_review_state(
        &self,
        item_id: Uuid,
        user_id: Uuid,
        state: &ReviewState,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE vocabulary SET
                ease_factor = $3,
                interval_days = $4,
                repetition = $5,
                last_reviewed_at = $6,
                next_review_at = $7,
                total_reviews = $8,
                total_correct = $9,
                correct_streak = $10,
                last_result = $11,
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(item_id)
        .bind(user_id)
        .bind(state.ease_factor)
        .bind(state.interval_days)
        .bind(state.repetition as i32)
        .bind(state.last_reviewed_at)
        .bind(state.next_review_at)
        .bind(state.total_reviews as i32)
        .bind(state.total_correct as i32)
        .bind(state.correct_streak as i32)
        .bind(state.last_result)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // === Review Repository ===

    /// Insert a review record
    pub async fn insert_review(&self, review: &DbReview) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reviews (id, vocabulary_id, user_id, quality, reviewed_at,
                                 ease_before, ease_after, interval_before, interval_after)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(review.id)
        .bind(review.vocabulary_id)
        .bind(review.user_id)
        .bind(review.quality)
        .bind(review.reviewed_at)
        .bind(review.ease_before)
        .bind(review.ease_after)
        .bind(review.interval_before)
        .bind(review.interval_after)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get vocabulary statistics for a user
    pub async fn get_vocabulary_stats(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<VocabularyStatsResponse> {
        let row = sqlx::query(
            r#"
            SELECT
                COUNT(*)::INT as total_items,
                COUNT(CASE WHEN next_review_at IS NULL OR next_review_at <= $2
                           THEN 1 END)::INT as due_count,
                COALESCE(SUM(total_reviews), 0)::BIGINT as total_reviews,
                COALESCE(AVG(ease_factor), 2.5)::FLOAT8 as average_ease
            FROM vocabulary
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        // Retention over the last 30 days of reviews
        let retention: Option<f64> = sqlx::query_scalar(
            r#"
            SELECT AVG(CASE WHEN quality >= 3 THEN 1.0 ELSE 0.0 END)::FLOAT8
            FROM reviews
            WHERE user_id = $1
              AND reviewed_at >= $2 - INTERVAL '30 days'
            "#,
        )
        .bind(user_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(VocabularyStatsResponse {
            total_items: row.get::<i32, _>("total_items") as usize,
            due_count: row.get::<i32, _>("due_count") as usize,
            total_reviews: row.get::<i64, _>("total_reviews") as usize,
            retention_rate: retention.unwrap_or(0.0),
            average_ease: row.get("average_ease"),
        })
    }
}
