//! Command handlers grouped by concern.

pub(crate) mod deliver;
pub(crate) mod history;
pub(crate) mod translate;

use parley_core::{ApiError, DeskStore};

use crate::client::CliError;

/// Map a failed desk action, using the message the desk stored for display.
pub(crate) fn desk_failure(store: &impl DeskStore, err: &ApiError) -> CliError {
    CliError::from_desk(err, store.read(|state| state.error.clone()))
}
