//! In-memory stand-in for the ticket backend.
//!
//! `FakeBackend` behaves like the real service closely enough for workflow tests:
//! it assigns ids, translates through a small phrase book, rejects invalid
//! transitions with the backend's error bodies, and records every call.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use parley_api_models::{
    CreateRecordRequest, DeliveryReceipt, Language, LanguageCode, RecordStatus, TranslationRecord,
};
use parley_core::{ApiError, ApiResult, StatusFilter, TicketApi};
use serde_json::json;

use crate::fixtures::timestamp;

/// Backend operation, used to target injected failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `POST /tickets`.
    Create,
    /// `POST /tickets/{id}/translate`.
    Translate,
    /// `GET /tickets`.
    List,
    /// `GET /tickets/{id}`.
    Fetch,
    /// `POST /tickets/{id}/deliver`.
    Deliver,
}

/// One recorded client call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiCall {
    /// Create with the submitted body.
    Create(CreateRecordRequest),
    /// Translate by id.
    Translate(i64),
    /// List with a filter.
    List(StatusFilter),
    /// Fetch by id.
    Fetch(i64),
    /// Deliver by id.
    Deliver(i64),
}

impl ApiCall {
    /// Operation this call targets.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        match self {
            Self::Create(_) => Operation::Create,
            Self::Translate(_) => Operation::Translate,
            Self::List(_) => Operation::List,
            Self::Fetch(_) => Operation::Fetch,
            Self::Deliver(_) => Operation::Deliver,
        }
    }
}

#[derive(Default)]
struct BackendState {
    records: Vec<TranslationRecord>,
    next_id: i64,
    clock: u32,
    calls: Vec<ApiCall>,
    failures: HashMap<Operation, VecDeque<ApiError>>,
    phrases: HashMap<(String, LanguageCode), String>,
}

impl BackendState {
    fn tick(&mut self) -> String {
        let now = timestamp(self.clock);
        self.clock += 1;
        now
    }

    fn take_failure(&mut self, operation: Operation) -> Option<ApiError> {
        self.failures.get_mut(&operation)?.pop_front()
    }

    fn position(&self, id: i64) -> ApiResult<usize> {
        self.records
            .iter()
            .position(|record| record.id == id)
            .ok_or_else(|| not_found(id))
    }
}

/// Scriptable in-memory ticket backend.
#[derive(Default)]
pub struct FakeBackend {
    inner: RefCell<BackendState>,
}

impl FakeBackend {
    /// Empty backend with no phrases.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Teach the backend how to translate `text` into `target`.
    #[must_use]
    pub fn with_phrase(self, text: &str, target: Language, translated: &str) -> Self {
        self.inner
            .borrow_mut()
            .phrases
            .insert((text.to_string(), target.into()), translated.to_string());
        self
    }

    /// Seed existing tickets; ids continue after the highest seeded id.
    #[must_use]
    pub fn with_records(self, records: Vec<TranslationRecord>) -> Self {
        {
            let mut state = self.inner.borrow_mut();
            let highest = records.iter().map(|record| record.id).max().unwrap_or(0);
            state.next_id = state.next_id.max(highest);
            state.clock = state.clock.max(u32::try_from(records.len()).unwrap_or(u32::MAX));
            state.records.extend(records);
        }
        self
    }

    /// Make the next call to `operation` fail with `error`.
    ///
    /// A translate failure also marks the ticket `FAILED`, as the real provider path does.
    pub fn fail_next(&self, operation: Operation, error: ApiError) {
        self.inner
            .borrow_mut()
            .failures
            .entry(operation)
            .or_default()
            .push_back(error);
    }

    /// Every call received so far.
    #[must_use]
    pub fn calls(&self) -> Vec<ApiCall> {
        self.inner.borrow().calls.clone()
    }

    /// Number of calls received so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.inner.borrow().calls.len()
    }

    /// Tickets currently stored.
    #[must_use]
    pub fn records(&self) -> Vec<TranslationRecord> {
        self.inner.borrow().records.clone()
    }

    fn record_call(&self, call: ApiCall) -> Option<ApiError> {
        let mut state = self.inner.borrow_mut();
        let operation = call.operation();
        state.calls.push(call);
        state.take_failure(operation)
    }
}

#[async_trait(?Send)]
impl TicketApi for FakeBackend {
    async fn create_record(&self, request: &CreateRecordRequest) -> ApiResult<TranslationRecord> {
        if let Some(err) = self.record_call(ApiCall::Create(request.clone())) {
            return Err(err);
        }
        if request.original_text.trim().is_empty() {
            return Err(ApiError::from_response(
                400,
                r#"{"error":"BAD_REQUEST","message":"originalText: originalText is required"}"#,
            ));
        }
        let mut state = self.inner.borrow_mut();
        state.next_id += 1;
        let record = TranslationRecord {
            id: state.next_id,
            original_text: request.original_text.clone(),
            source_lang: request.source_lang.into(),
            target_lang: request.target_lang.into(),
            status: RecordStatus::Created,
            translated_text: None,
            created_at: state.tick(),
            translated_at: None,
        };
        state.records.push(record.clone());
        Ok(record)
    }

    async fn translate_record(&self, id: i64) -> ApiResult<TranslationRecord> {
        let failure = self.record_call(ApiCall::Translate(id));
        let mut state = self.inner.borrow_mut();
        let index = state.position(id)?;
        if state.records[index].is_translated() {
            return Err(ApiError::from_response(
                409,
                &json!({
                    "error": "CONFLICT",
                    "message": format!("Ticket with id {id} is already translated"),
                })
                .to_string(),
            ));
        }
        if let Some(err) = failure {
            let record = &mut state.records[index];
            record.status = RecordStatus::Failed;
            record.translated_text = None;
            record.translated_at = None;
            return Err(err);
        }

        let key = (
            state.records[index].original_text.clone(),
            state.records[index].target_lang.clone(),
        );
        let translated = state
            .phrases
            .get(&key)
            .cloned()
            .unwrap_or_else(|| format!("[{}] {}", key.1, key.0));
        let now = state.tick();
        let record = &mut state.records[index];
        record.status = RecordStatus::Translated;
        record.translated_text = Some(translated);
        record.translated_at = Some(now);
        Ok(record.clone())
    }

    async fn list_records(&self, filter: StatusFilter) -> ApiResult<Vec<TranslationRecord>> {
        if let Some(err) = self.record_call(ApiCall::List(filter)) {
            return Err(err);
        }
        let state = self.inner.borrow();
        Ok(state
            .records
            .iter()
            .filter(|record| filter.status().is_none_or(|status| record.status == status))
            .cloned()
            .collect())
    }

    async fn fetch_record(&self, id: i64) -> ApiResult<TranslationRecord> {
        if let Some(err) = self.record_call(ApiCall::Fetch(id)) {
            return Err(err);
        }
        let state = self.inner.borrow();
        let index = state.position(id)?;
        Ok(state.records[index].clone())
    }

    async fn deliver_record(&self, id: i64) -> ApiResult<DeliveryReceipt> {
        if let Some(err) = self.record_call(ApiCall::Deliver(id)) {
            return Err(err);
        }
        let mut state = self.inner.borrow_mut();
        let index = state.position(id)?;
        let record = state.records[index].clone();
        if !record.is_translated() {
            return Err(ApiError::from_response(
                409,
                &json!({
                    "error": "CONFLICT",
                    "message": format!("Ticket with id {id} is not translated yet"),
                })
                .to_string(),
            ));
        }
        let delivered_at = state.tick();
        Ok(DeliveryReceipt(json!({
            "delivered": true,
            "ticketId": record.id,
            "deliveredAt": delivered_at,
            "payload": {
                "originalText": record.original_text,
                "translatedText": record.translated_text,
                "sourceLang": record.source_lang,
                "targetLang": record.target_lang,
            }
        })))
    }
}

fn not_found(id: i64) -> ApiError {
    ApiError::from_response(
        404,
        &json!({
            "error": "NOT_FOUND",
            "message": format!("Ticket with id {id} not found"),
        })
        .to_string(),
    )
}
