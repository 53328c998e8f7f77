//! DOM-free projections of the desk state for rendering.

use parley_api_models::{DeliveryReceipt, Language, RecordStatus, TranslationRecord};
use parley_core::logic::{flow_label, pretty_time, status_tone, translated_or_placeholder};
use parley_core::{BusyFlags, DeskState, StatusFilter};

/// Label for the translate button.
#[must_use]
pub const fn translate_label(busy: BusyFlags) -> &'static str {
    if busy.translating { "Translating…" } else { "Translate" }
}

/// Label for the history refresh button.
#[must_use]
pub const fn refresh_label(busy: BusyFlags) -> &'static str {
    if busy.refreshing { "Refreshing…" } else { "Refresh" }
}

/// Label for the deliver button.
#[must_use]
pub const fn deliver_label(busy: BusyFlags) -> &'static str {
    if busy.delivering { "Delivering…" } else { "Deliver" }
}

/// Badge classes for a ticket status.
#[must_use]
pub fn status_badge_class(status: RecordStatus) -> String {
    format!("badge badge-{}", status_tone(status))
}

/// Option value and label pairs for the language selects.
#[must_use]
pub fn language_options() -> Vec<(&'static str, &'static str)> {
    Language::ALL
        .iter()
        .map(|lang| (lang.as_str(), lang.display_name()))
        .collect()
}

/// Option value and label pairs for the history filter select.
#[must_use]
pub fn filter_options() -> Vec<(&'static str, &'static str)> {
    StatusFilter::ALL
        .iter()
        .map(|filter| (filter.as_value(), filter.label()))
        .collect()
}

/// Message shown in place of an empty history list.
#[must_use]
pub fn empty_history_message(filter: StatusFilter) -> String {
    match filter {
        StatusFilter::All => "No tickets yet.".to_string(),
        other => format!("No {} tickets.", other.label().to_ascii_lowercase()),
    }
}

/// Empty-state text for the history pane; nothing while a load is in flight.
#[must_use]
pub fn history_notice(state: &DeskState) -> Option<String> {
    if state.history.is_empty() && !state.busy.refreshing {
        Some(empty_history_message(state.filter))
    } else {
        None
    }
}

/// One history list entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryRow {
    /// Ticket id.
    pub id: i64,
    /// Status text.
    pub status: &'static str,
    /// Badge classes for the status.
    pub badge_class: String,
    /// `"en → pt"`.
    pub flow: String,
    /// Creation time for display.
    pub created: String,
    /// Original text.
    pub text: String,
    /// Whether this row is the current selection.
    pub selected: bool,
}

/// History rows in stored order, marking the selection.
#[must_use]
pub fn history_rows(state: &DeskState) -> Vec<HistoryRow> {
    state
        .history
        .iter()
        .map(|record| HistoryRow {
            id: record.id,
            status: record.status.as_str(),
            badge_class: status_badge_class(record.status),
            flow: flow_label(record),
            created: pretty_time(&record.created_at),
            text: record.original_text.clone(),
            selected: state.selected_id == Some(record.id),
        })
        .collect()
}

/// Detail pane content for the selected ticket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailView {
    /// Ticket id.
    pub id: i64,
    /// Status text.
    pub status: &'static str,
    /// Badge classes for the status.
    pub badge_class: String,
    /// `"en → pt"`.
    pub flow: String,
    /// Original text.
    pub original: String,
    /// Translation or placeholder.
    pub translated: String,
    /// Creation time for display.
    pub created: String,
    /// Translation time for display, when translated.
    pub translated_at: Option<String>,
    /// Whether the deliver button is enabled.
    pub can_deliver: bool,
}

impl DetailView {
    fn from_record(record: &TranslationRecord, can_deliver: bool) -> Self {
        Self {
            id: record.id,
            status: record.status.as_str(),
            badge_class: status_badge_class(record.status),
            flow: flow_label(record),
            original: record.original_text.clone(),
            translated: translated_or_placeholder(record).to_string(),
            created: pretty_time(&record.created_at),
            translated_at: record.translated_at.as_deref().map(pretty_time),
            can_deliver,
        }
    }
}

/// Detail for the selection, or `None` when nothing valid is selected.
#[must_use]
pub fn detail_view(state: &DeskState) -> Option<DetailView> {
    state
        .selected()
        .map(|record| DetailView::from_record(record, state.can_deliver()))
}

/// Pretty JSON for the last delivery result.
#[must_use]
pub fn delivery_text(delivery: Option<&DeliveryReceipt>) -> Option<String> {
    delivery.map(DeliveryReceipt::pretty)
}

/// Whether the translate and clear buttons accept clicks.
#[must_use]
pub const fn form_enabled(busy: BusyFlags) -> bool {
    !busy.translating
}
