//! Pure helpers for desk state: validation, projections, and display formatting.

use chrono::{DateTime, NaiveDateTime};
use parley_api_models::{RecordStatus, TranslationRecord};

use crate::api::ApiError;

/// Message shown when translate is attempted with blank input.
pub const EMPTY_INPUT_MESSAGE: &str = "Type something first.";
/// Fallback for translate failures without a message.
pub const TRANSLATE_FALLBACK: &str = "Something went wrong.";
/// Fallback for history failures without a message.
pub const HISTORY_FALLBACK: &str = "Couldn't load history.";
/// Fallback for delivery failures without a message.
pub const DELIVERY_FALLBACK: &str = "Delivery failed.";
/// Placeholder for tickets that have no translation yet.
pub const NOT_TRANSLATED_PLACEHOLDER: &str = "(not translated yet)";

/// Reject empty or whitespace-only input.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] when there is nothing to translate.
pub fn validate_input(text: &str) -> Result<(), ApiError> {
    if text.trim().is_empty() {
        Err(ApiError::Validation(EMPTY_INPUT_MESSAGE.to_string()))
    } else {
        Ok(())
    }
}

/// Order history newest first; ties keep the order the backend returned.
///
/// Timestamps are compared as instants, with offset-less values read as UTC.
/// Unparseable timestamps sort after every parseable one, by raw text.
pub fn sort_history(records: &mut [TranslationRecord]) {
    records.sort_by(|left, right| sort_key(&right.created_at).cmp(&sort_key(&left.created_at)));
}

fn sort_key(raw: &str) -> (Option<NaiveDateTime>, Option<&str>) {
    match parse_instant(raw) {
        Some(instant) => (Some(instant), None),
        None => (None, Some(raw)),
    }
}

fn parse_instant(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    DateTime::parse_from_rfc3339(trimmed)
        .map(|parsed| parsed.naive_utc())
        .or_else(|_| trimmed.parse::<NaiveDateTime>())
        .ok()
}

/// First record whose id matches the selection.
#[must_use]
pub fn find_selected(
    history: &[TranslationRecord],
    selected_id: Option<i64>,
) -> Option<&TranslationRecord> {
    let id = selected_id?;
    history.iter().find(|record| record.id == id)
}

/// Error text for display, or the action's fallback when the error renders empty.
#[must_use]
pub fn display_error(err: &ApiError, fallback: &str) -> String {
    let text = err.to_string();
    if text.trim().is_empty() {
        fallback.to_string()
    } else {
        text
    }
}

/// `"en → pt"` label for a ticket.
#[must_use]
pub fn flow_label(record: &TranslationRecord) -> String {
    format!("{} → {}", record.source_lang, record.target_lang)
}

/// Render a backend timestamp as `YYYY-MM-DD HH:MM:SS`, or return it unchanged
/// when it does not parse.
#[must_use]
pub fn pretty_time(raw: &str) -> String {
    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return parsed.format(FORMAT).to_string();
    }
    if let Ok(parsed) = trimmed.parse::<NaiveDateTime>() {
        return parsed.format(FORMAT).to_string();
    }
    raw.to_string()
}

/// Translated text, or a placeholder when the ticket has none.
#[must_use]
pub fn translated_or_placeholder(record: &TranslationRecord) -> &str {
    record
        .translated_text
        .as_deref()
        .unwrap_or(NOT_TRANSLATED_PLACEHOLDER)
}

/// Badge style key for a status.
#[must_use]
pub const fn status_tone(status: RecordStatus) -> &'static str {
    match status {
        RecordStatus::Translated => "success",
        RecordStatus::Failed => "error",
        RecordStatus::Created => "info",
    }
}
