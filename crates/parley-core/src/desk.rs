//! User-action workflows.
//!
//! # Design
//! - Each action is one best-effort attempt: no retries, no cancellation, no rollback.
//! - Errors are caught here, flattened to a display string, and stored on the state.
//! - History is only ever replaced wholesale by a fresh fetch.
//! - State is re-read after every await because other actions may have run meanwhile.

use parley_api_models::{CreateRecordRequest, DeliveryReceipt, Language, TranslationRecord};
use tracing::{debug, info, warn};

use crate::api::{ApiError, ApiResult, TicketApi};
use crate::logic::{
    DELIVERY_FALLBACK, HISTORY_FALLBACK, TRANSLATE_FALLBACK, display_error, sort_history,
    validate_input,
};
use crate::state::StatusFilter;
use crate::store::DeskStore;

/// Controller pairing a ticket client with a desk store.
#[derive(Clone, Debug)]
pub struct Desk<A, S> {
    api: A,
    store: S,
}

impl<A, S> Desk<A, S>
where
    A: TicketApi,
    S: DeskStore,
{
    /// Build a controller over `api` and `store`.
    pub const fn new(api: A, store: S) -> Self {
        Self { api, store }
    }

    /// Ticket client in use.
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Store in use.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Replace the free-text input.
    pub fn set_text(&self, text: impl Into<String>) {
        let text = text.into();
        self.store.update(|state| state.text = text);
    }

    /// Pick the source language.
    pub fn set_source(&self, lang: Language) {
        self.store.update(|state| state.source_lang = lang);
    }

    /// Pick the target language.
    pub fn set_target(&self, lang: Language) {
        self.store.update(|state| state.target_lang = lang);
    }

    /// Select a ticket from history, dropping any pending delivery result.
    pub fn select(&self, id: i64) {
        self.store.update(|state| {
            state.selected_id = Some(id);
            state.delivery = None;
        });
    }

    /// Reset input, result, error, and delivery. History and selection stay.
    pub fn clear(&self) {
        self.store.update(|state| {
            state.text.clear();
            state.result = None;
            state.error = None;
            state.delivery = None;
        });
    }

    /// Create a ticket from the form, translate it, refresh history, and select it.
    ///
    /// Blank input is rejected locally without touching the backend. A failure at
    /// any step stops the sequence; tickets already created stay on the backend.
    ///
    /// # Errors
    ///
    /// Returns the validation or client error that stopped the sequence; the same
    /// error is also stored on the desk state for display.
    pub async fn translate(&self) -> ApiResult<TranslationRecord> {
        let request = self.store.read(|state| CreateRecordRequest {
            original_text: state.text.clone(),
            source_lang: state.source_lang,
            target_lang: state.target_lang,
        });

        self.store.update(|state| {
            state.error = None;
            state.result = None;
            state.delivery = None;
        });

        if let Err(err) = validate_input(&request.original_text) {
            debug!("translate rejected: empty input");
            self.surface(&err, TRANSLATE_FALLBACK);
            return Err(err);
        }

        self.store.update(|state| state.busy.translating = true);
        let outcome = self.run_translate(&request).await;
        self.store.update(|state| state.busy.translating = false);

        match &outcome {
            Ok(record) => info!(record_id = record.id, status = %record.status, "translation finished"),
            Err(err) => self.surface(err, TRANSLATE_FALLBACK),
        }
        outcome
    }

    async fn run_translate(&self, request: &CreateRecordRequest) -> ApiResult<TranslationRecord> {
        let created = self.api.create_record(request).await?;
        debug!(record_id = created.id, "ticket created");

        let translated = self.api.translate_record(created.id).await?;
        let result = translated.translated_text.clone();
        self.store.update(|state| state.result = result);

        let filter = self.store.read(|state| state.filter);
        self.load_history(filter).await?;

        let id = translated.id;
        self.store.update(|state| state.selected_id = Some(id));
        Ok(translated)
    }

    /// Refetch history for the active filter.
    ///
    /// # Errors
    ///
    /// Returns the client error; history keeps its previous value.
    pub async fn refresh_history(&self) -> ApiResult<usize> {
        let filter = self.store.read(|state| state.filter);
        self.refresh_with(filter).await
    }

    /// Refetch history for `filter`, replacing the local list on success.
    ///
    /// # Errors
    ///
    /// Returns the client error; history keeps its previous value.
    pub async fn refresh_with(&self, filter: StatusFilter) -> ApiResult<usize> {
        self.store.update(|state| state.error = None);
        let outcome = self.load_history(filter).await;
        if let Err(err) = &outcome {
            self.surface(err, HISTORY_FALLBACK);
        }
        outcome
    }

    async fn load_history(&self, filter: StatusFilter) -> ApiResult<usize> {
        self.store.update(|state| state.busy.refreshing = true);
        let fetched = self.api.list_records(filter).await;
        match fetched {
            Ok(mut records) => {
                sort_history(&mut records);
                let count = records.len();
                self.store.update(|state| {
                    state.history = records;
                    state.busy.refreshing = false;
                });
                debug!(%filter, count, "history refreshed");
                Ok(count)
            }
            Err(err) => {
                self.store.update(|state| state.busy.refreshing = false);
                Err(err)
            }
        }
    }

    /// Switch the history scope, dropping selection and delivery, then refetch.
    ///
    /// # Errors
    ///
    /// Returns the client error from the refetch.
    pub async fn change_filter(&self, filter: StatusFilter) -> ApiResult<usize> {
        self.store.update(|state| {
            state.filter = filter;
            state.selected_id = None;
            state.delivery = None;
        });
        self.refresh_with(filter).await
    }

    /// Deliver the selected ticket to the partner.
    ///
    /// Does nothing and returns `Ok(None)` unless a ticket is selected, that ticket is
    /// translated, and no delivery is already in flight.
    ///
    /// # Errors
    ///
    /// Returns the client error; it is also stored on the desk state.
    pub async fn deliver(&self) -> ApiResult<Option<DeliveryReceipt>> {
        let target = self.store.read(|state| {
            if state.can_deliver() {
                state.selected().map(|record| record.id)
            } else {
                None
            }
        });
        let Some(id) = target else {
            debug!("deliver skipped: no translated ticket selected");
            return Ok(None);
        };

        self.store.update(|state| {
            state.error = None;
            state.delivery = None;
            state.busy.delivering = true;
        });

        let outcome = self.api.deliver_record(id).await;
        match outcome {
            Ok(receipt) => {
                let stored = receipt.clone();
                self.store.update(|state| {
                    state.delivery = Some(stored);
                    state.busy.delivering = false;
                });
                info!(record_id = id, "ticket delivered");
                Ok(Some(receipt))
            }
            Err(err) => {
                self.store.update(|state| state.busy.delivering = false);
                self.surface(&err, DELIVERY_FALLBACK);
                Err(err)
            }
        }
    }

    fn surface(&self, err: &ApiError, fallback: &str) {
        let message = display_error(err, fallback);
        if !err.is_validation() {
            warn!(error = %message, status = ?err.status(), "desk action failed");
        }
        self.store.update(|state| state.error = Some(message));
    }
}
