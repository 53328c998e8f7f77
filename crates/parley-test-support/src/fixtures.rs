//! Record builders with deterministic timestamps.

use parley_api_models::{Language, RecordStatus, TranslationRecord};

/// Timestamp `seconds` after a fixed origin, in the backend's local format.
#[must_use]
pub fn timestamp(seconds: u32) -> String {
    let hours = 10 + seconds / 3_600;
    let minutes = (seconds / 60) % 60;
    let secs = seconds % 60;
    format!("2025-01-01T{hours:02}:{minutes:02}:{secs:02}")
}

/// Untranslated ticket created `seconds` after the origin.
#[must_use]
pub fn created_record(id: i64, text: &str, seconds: u32) -> TranslationRecord {
    TranslationRecord {
        id,
        original_text: text.to_string(),
        source_lang: Language::En.into(),
        target_lang: Language::Pt.into(),
        status: RecordStatus::Created,
        translated_text: None,
        created_at: timestamp(seconds),
        translated_at: None,
    }
}

/// Translated ticket created `seconds` after the origin.
#[must_use]
pub fn translated_record(id: i64, text: &str, translated: &str, seconds: u32) -> TranslationRecord {
    TranslationRecord {
        status: RecordStatus::Translated,
        translated_text: Some(translated.to_string()),
        translated_at: Some(timestamp(seconds + 1)),
        ..created_record(id, text, seconds)
    }
}

/// Ticket whose translation failed.
#[must_use]
pub fn failed_record(id: i64, text: &str, seconds: u32) -> TranslationRecord {
    TranslationRecord {
        status: RecordStatus::Failed,
        ..created_record(id, text, seconds)
    }
}
