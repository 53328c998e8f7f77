//! Desk state container.
//!
//! # Design
//! - Every piece of client-side state lives in one value so any store can hold it.
//! - The selected record is never cached; it is projected from history on demand.
//! - Busy flags are independent so one in-flight action never hides another's feedback.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use parley_api_models::{DeliveryReceipt, Language, RecordStatus, TranslationRecord};

use crate::logic::find_selected;

/// History scope requested from the backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    /// Every ticket.
    #[default]
    All,
    /// Only tickets in one status.
    Status(RecordStatus),
}

impl StatusFilter {
    /// Every filter choice in menu order.
    pub const ALL: [Self; 4] = [
        Self::All,
        Self::Status(RecordStatus::Created),
        Self::Status(RecordStatus::Translated),
        Self::Status(RecordStatus::Failed),
    ];

    /// Status to put on the query string, if any.
    #[must_use]
    pub const fn status(self) -> Option<RecordStatus> {
        match self {
            Self::All => None,
            Self::Status(status) => Some(status),
        }
    }

    /// Value used by select controls and CLI flags.
    #[must_use]
    pub const fn as_value(self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Status(status) => status.as_str(),
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Status(RecordStatus::Created) => "Created",
            Self::Status(RecordStatus::Translated) => "Translated",
            Self::Status(RecordStatus::Failed) => "Failed",
        }
    }
}

impl Display for StatusFilter {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_value())
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        trimmed
            .parse::<RecordStatus>()
            .map(Self::Status)
            .map_err(|_| format!("invalid filter '{trimmed}' (expected all, created, translated or failed)"))
    }
}

/// In-flight markers for each independent action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BusyFlags {
    /// Create + translate sequence running.
    pub translating: bool,
    /// History fetch running.
    pub refreshing: bool,
    /// Delivery request running.
    pub delivering: bool,
}

/// Everything the desk shows, mirrored from the backend where applicable.
#[derive(Clone, Debug, PartialEq)]
pub struct DeskState {
    /// Language of the text being entered.
    pub source_lang: Language,
    /// Language to translate into.
    pub target_lang: Language,
    /// Free-text input.
    pub text: String,
    /// Translated text from the last successful translate action.
    pub result: Option<String>,
    /// Last surfaced error, ready for display.
    pub error: Option<String>,
    /// Tickets as last fetched, newest first.
    pub history: Vec<TranslationRecord>,
    /// Ticket picked in the history list.
    pub selected_id: Option<i64>,
    /// Active history scope.
    pub filter: StatusFilter,
    /// In-flight markers.
    pub busy: BusyFlags,
    /// Delivery result from the last deliver action.
    pub delivery: Option<DeliveryReceipt>,
}

impl Default for DeskState {
    fn default() -> Self {
        Self {
            source_lang: Language::En,
            target_lang: Language::Pt,
            text: String::new(),
            result: None,
            error: None,
            history: Vec::new(),
            selected_id: None,
            filter: StatusFilter::All,
            busy: BusyFlags::default(),
            delivery: None,
        }
    }
}

impl DeskState {
    /// Ticket matching the selected id, if it is present in history.
    #[must_use]
    pub fn selected(&self) -> Option<&TranslationRecord> {
        find_selected(&self.history, self.selected_id)
    }

    /// Whether the deliver action would do anything right now.
    #[must_use]
    pub fn can_deliver(&self) -> bool {
        !self.busy.delivering && self.selected().is_some_and(TranslationRecord::is_translated)
    }
}
