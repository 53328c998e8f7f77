#![forbid(unsafe_code)]
#![warn(
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Shared HTTP DTOs for the translation ticket backend.
//!
//! Both the CLI and the web UI encode requests and decode responses through these
//! types so the wire contract lives in one place. Field names follow the backend's
//! camelCase JSON.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Languages the desk offers for source and target selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English.
    En,
    /// Spanish.
    Es,
    /// French.
    Fr,
    /// Portuguese.
    Pt,
}

impl Language {
    /// Every selectable language in menu order.
    pub const ALL: [Self; 4] = [Self::En, Self::Es, Self::Fr, Self::Pt];

    /// Wire code sent to the backend.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
            Self::Fr => "fr",
            Self::Pt => "pt",
        }
    }

    /// English display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Es => "Spanish",
            Self::Fr => "French",
            Self::Pt => "Portuguese",
        }
    }
}

impl Display for Language {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|lang| lang.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("unsupported language '{trimmed}' (expected en, es, fr or pt)"))
    }
}

/// Language code as stored on a ticket.
///
/// The backend accepts any non-blank code, so records keep unknown codes verbatim
/// instead of failing to decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum LanguageCode {
    /// One of the languages the desk offers.
    Known(Language),
    /// Any other code, exactly as the backend sent it.
    Other(String),
}

impl LanguageCode {
    /// Code as sent on the wire.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(lang) => lang.as_str(),
            Self::Other(code) => code,
        }
    }

    /// The offered language, when the code is one.
    #[must_use]
    pub const fn known(&self) -> Option<Language> {
        match self {
            Self::Known(lang) => Some(*lang),
            Self::Other(_) => None,
        }
    }
}

impl From<Language> for LanguageCode {
    fn from(lang: Language) -> Self {
        Self::Known(lang)
    }
}

impl PartialEq<Language> for LanguageCode {
    fn eq(&self, other: &Language) -> bool {
        self.known() == Some(*other)
    }
}

impl Display for LanguageCode {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Lifecycle stage of a ticket, driven entirely by the backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordStatus {
    /// Stored but not yet translated.
    Created,
    /// Translation completed; translated text is present.
    Translated,
    /// Provider failed while translating.
    Failed,
}

impl RecordStatus {
    /// Every status in lifecycle order.
    pub const ALL: [Self; 3] = [Self::Created, Self::Translated, Self::Failed];

    /// Wire label used in JSON and query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Translated => "TRANSLATED",
            Self::Failed => "FAILED",
        }
    }
}

impl Display for RecordStatus {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for RecordStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("invalid status '{trimmed}'"))
    }
}

/// A single translation ticket as reported by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRecord {
    /// Backend-assigned identifier.
    pub id: i64,
    /// Text submitted for translation.
    pub original_text: String,
    /// Language of the original text.
    pub source_lang: LanguageCode,
    /// Language requested for the translation.
    pub target_lang: LanguageCode,
    /// Current lifecycle stage.
    pub status: RecordStatus,
    /// Translated text; only present once the ticket is translated.
    #[serde(default)]
    pub translated_text: Option<String>,
    /// Creation timestamp as rendered by the backend.
    pub created_at: String,
    /// Completion timestamp; only present once the ticket is translated.
    #[serde(default)]
    pub translated_at: Option<String>,
}

impl TranslationRecord {
    /// Whether the ticket reached the translated stage.
    #[must_use]
    pub fn is_translated(&self) -> bool {
        self.status == RecordStatus::Translated
    }
}

/// Body for `POST /tickets`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecordRequest {
    /// Text to translate.
    pub original_text: String,
    /// Language of the text.
    pub source_lang: Language,
    /// Requested target language.
    pub target_lang: Language,
}

/// Content forwarded to the partner in a delivery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryPayload {
    /// Original ticket text.
    #[serde(default)]
    pub original_text: Option<String>,
    /// Translated ticket text.
    #[serde(default)]
    pub translated_text: Option<String>,
    /// Source language code.
    #[serde(default)]
    pub source_lang: Option<String>,
    /// Target language code.
    #[serde(default)]
    pub target_lang: Option<String>,
}

/// Typed view over the delivery result the backend currently emits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryResponse {
    /// Whether the partner accepted the delivery.
    pub delivered: bool,
    /// Ticket that was delivered.
    #[serde(default)]
    pub ticket_id: Option<i64>,
    /// Delivery timestamp.
    #[serde(default)]
    pub delivered_at: Option<String>,
    /// Delivered content.
    #[serde(default)]
    pub payload: Option<DeliveryPayload>,
}

/// Delivery result kept exactly as the backend returned it.
///
/// The shape is backend-defined, so the desk stores the raw JSON and only offers
/// a best-effort typed view for renderers that want one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct DeliveryReceipt(pub Value);

impl DeliveryReceipt {
    /// Raw JSON document.
    #[must_use]
    pub const fn raw(&self) -> &Value {
        &self.0
    }

    /// Two-space indented JSON for display.
    #[must_use]
    pub fn pretty(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| self.0.to_string())
    }

    /// Typed view when the document matches the known delivery shape.
    #[must_use]
    pub fn typed(&self) -> Option<DeliveryResponse> {
        serde_json::from_value(self.0.clone()).ok()
    }
}

/// Turn a non-2xx response body into a message fit for display.
///
/// Prefers a non-empty `message` string field, then `error`, then the raw body
/// text, and finally `Request failed (<status>)` when the body is empty.
#[must_use]
pub fn normalize_error_body(status: u16, body: &str) -> String {
    let parsed = serde_json::from_str::<Value>(body).ok();
    let field = |name: &str| {
        parsed
            .as_ref()
            .and_then(|value| value.get(name))
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    };

    if let Some(message) = field("message").or_else(|| field("error")) {
        return message;
    }
    if body.is_empty() {
        format!("Request failed ({status})")
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_prefers_message_over_error() {
        let body = r#"{"error":"NOT_FOUND","message":"Ticket with id 9 not found"}"#;
        assert_eq!(normalize_error_body(404, body), "Ticket with id 9 not found");
        assert_eq!(normalize_error_body(400, r#"{"message":"X"}"#), "X");
    }

    #[test]
    fn normalize_falls_back_to_error_field() {
        assert_eq!(normalize_error_body(409, r#"{"error":"Y"}"#), "Y");
        assert_eq!(normalize_error_body(409, r#"{"error":"Y","message":""}"#), "Y");
    }

    #[test]
    fn normalize_uses_raw_text_when_unparseable() {
        assert_eq!(normalize_error_body(502, "boom"), "boom");
        assert_eq!(normalize_error_body(500, r#"{"detail":"x"}"#), r#"{"detail":"x"}"#);
        assert_eq!(normalize_error_body(500, r#"{"message":7}"#), r#"{"message":7}"#);
    }

    #[test]
    fn normalize_synthesizes_status_message_for_empty_body() {
        let message = normalize_error_body(500, "");
        assert!(message.contains("500"));
        assert_eq!(message, "Request failed (500)");
    }

    #[test]
    fn record_decodes_backend_json() {
        let record: TranslationRecord = serde_json::from_value(json!({
            "id": 1,
            "originalText": "Hello",
            "sourceLang": "en",
            "targetLang": "pt",
            "status": "TRANSLATED",
            "translatedText": "Olá",
            "createdAt": "2025-01-01T10:00:00",
            "translatedAt": "2025-01-01T10:00:02"
        }))
        .expect("record decodes");
        assert!(record.is_translated());
        assert_eq!(record.target_lang, Language::Pt);
        assert_eq!(record.translated_text.as_deref(), Some("Olá"));
    }

    #[test]
    fn record_tolerates_missing_optional_fields() {
        let record: TranslationRecord = serde_json::from_value(json!({
            "id": 2,
            "originalText": "Bonjour",
            "sourceLang": "fr",
            "targetLang": "en",
            "status": "CREATED",
            "createdAt": "2025-01-01T10:00:00"
        }))
        .expect("record decodes");
        assert_eq!(record.status, RecordStatus::Created);
        assert!(record.translated_text.is_none());
        assert!(record.translated_at.is_none());
    }

    #[test]
    fn history_with_unlisted_language_codes_still_decodes() {
        let records: Vec<TranslationRecord> = serde_json::from_value(json!([
            {
                "id": 1,
                "originalText": "Hello",
                "sourceLang": "en",
                "targetLang": "pt",
                "status": "CREATED",
                "createdAt": "2025-01-01T10:00:00"
            },
            {
                "id": 2,
                "originalText": "Hallo",
                "sourceLang": "de",
                "targetLang": "EN",
                "status": "CREATED",
                "createdAt": "2025-01-01T10:00:01"
            }
        ]))
        .expect("history decodes");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].source_lang, Language::En);
        assert_eq!(records[1].source_lang, LanguageCode::Other("de".into()));
        assert_eq!(records[1].target_lang.as_str(), "EN");
        assert!(records[1].target_lang.known().is_none());

        let encoded = serde_json::to_value(&records[1]).expect("serializes");
        assert_eq!(encoded["sourceLang"], "de");
        assert_eq!(encoded["targetLang"], "EN");
    }

    #[test]
    fn create_request_uses_camel_case() {
        let body = serde_json::to_value(CreateRecordRequest {
            original_text: "Hello".into(),
            source_lang: Language::En,
            target_lang: Language::Pt,
        })
        .expect("serializes");
        assert_eq!(
            body,
            json!({"originalText": "Hello", "sourceLang": "en", "targetLang": "pt"})
        );
    }

    #[test]
    fn language_and_status_parse_case_insensitively() {
        assert_eq!(" PT ".parse::<Language>(), Ok(Language::Pt));
        assert!("de".parse::<Language>().is_err());
        assert_eq!("translated".parse::<RecordStatus>(), Ok(RecordStatus::Translated));
        assert!("done".parse::<RecordStatus>().is_err());
    }

    #[test]
    fn delivery_receipt_keeps_raw_document_and_offers_typed_view() {
        let receipt = DeliveryReceipt(json!({
            "delivered": true,
            "ticketId": 1,
            "deliveredAt": "2025-01-01T10:05:00",
            "payload": {
                "originalText": "Hello",
                "translatedText": "Olá",
                "sourceLang": "en",
                "targetLang": "pt"
            }
        }));
        let typed = receipt.typed().expect("known shape");
        assert!(typed.delivered);
        assert_eq!(typed.ticket_id, Some(1));
        assert!(receipt.pretty().contains("\n  \"delivered\": true"));

        let odd = DeliveryReceipt(json!({"partner": "acme"}));
        assert!(odd.typed().is_none());
        assert_eq!(odd.raw()["partner"], "acme");
    }
}
