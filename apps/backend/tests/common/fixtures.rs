//! Test fixtures and factory functions for creating test data.

use serde_json::json;
use uuid::Uuid;

/// Generate a unique positive Telegram id to avoid collisions between tests.
pub fn unique_telegram_id() -> i64 {
    (Uuid::new_v4().as_u128() & 0x7fff_ffff_ffff) as i64
}

/// Create a vocabulary creation request body.
pub fn create_vocabulary_request(word: &str, translation: &str) -> serde_json::Value {
    json!({ "word": word, "translation": translation })
}

/// Create a folder creation request body.
pub fn create_folder_request(name: &str, parent_id: Option<Uuid>) -> serde_json::Value {
    json!({ "name": name, "parentId": parent_id })
}

/// Create a text creation request body from (english, uzbek) pairs.
pub fn create_text_request(
    title: &str,
    folder_id: Option<Uuid>,
    sentences: &[(&str, &str)],
) -> serde_json::Value {
    let sentences: Vec<serde_json::Value> = sentences
        .iter()
        .map(|(english, uzbek)| json!({ "english": english, "uzbek": uzbek }))
        .collect();

    json!({ "title": title, "folderId": folder_id, "sentences": sentences })
}

/// Create a review submission request body.
pub fn submit_review_request(item_id: Uuid, quality: i64) -> serde_json::Value {
    json!({ "itemId": item_id, "quality": quality })
}

/// Create a pronunciation check request body.
pub fn pronunciation_request(target: &str, hypothesis: &str) -> serde_json::Value {
    json!({ "target": target, "hypothesis": hypothesis })
}
