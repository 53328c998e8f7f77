//! Ticket client contract.
//!
//! # Design
//! - One trait covers every backend call so workflows stay transport-agnostic.
//! - Futures are `?Send`: the wasm client runs on a single thread.
//! - Non-2xx bodies are normalized into a display string before they leave the client.

use async_trait::async_trait;
use parley_api_models::{
    CreateRecordRequest, DeliveryReceipt, TranslationRecord, normalize_error_body,
};
use thiserror::Error;

use crate::state::StatusFilter;

/// Result alias for ticket client calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failures surfaced by the ticket client and the desk workflows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Input rejected locally before any request was sent.
    #[error("{0}")]
    Validation(String),
    /// Backend answered with a non-2xx status.
    #[error("{message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Normalized, human-readable message.
        message: String,
    },
    /// The request never produced a response.
    #[error("{0}")]
    Transport(String),
    /// A 2xx body could not be decoded.
    #[error("{0}")]
    Decode(String),
}

impl ApiError {
    /// Build an HTTP error from a raw response body.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        Self::Http {
            status,
            message: normalize_error_body(status, body),
        }
    }

    /// HTTP status, when the error came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the error was raised by local validation.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Calls exposed by the translation ticket backend.
#[async_trait(?Send)]
pub trait TicketApi {
    /// `POST /tickets`: store a new ticket in the `CREATED` stage.
    async fn create_record(&self, request: &CreateRecordRequest) -> ApiResult<TranslationRecord>;

    /// `POST /tickets/{id}/translate`: ask the backend to translate a ticket.
    async fn translate_record(&self, id: i64) -> ApiResult<TranslationRecord>;

    /// `GET /tickets[?status=...]`: every ticket matching the filter, uncached.
    async fn list_records(&self, filter: StatusFilter) -> ApiResult<Vec<TranslationRecord>>;

    /// `GET /tickets/{id}`: a single ticket.
    async fn fetch_record(&self, id: i64) -> ApiResult<TranslationRecord>;

    /// `POST /tickets/{id}/deliver`: hand a translated ticket to the partner.
    async fn deliver_record(&self, id: i64) -> ApiResult<DeliveryReceipt>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_errors_carry_normalized_message() {
        let err = ApiError::from_response(404, r#"{"error":"NOT_FOUND","message":"gone"}"#);
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "gone");

        let empty = ApiError::from_response(500, "");
        assert_eq!(empty.to_string(), "Request failed (500)");
    }

    #[test]
    fn validation_errors_have_no_status() {
        let err = ApiError::Validation("Type something first.".into());
        assert!(err.is_validation());
        assert_eq!(err.status(), None);
        assert!(!ApiError::Transport("offline".into()).is_validation());
    }
}
