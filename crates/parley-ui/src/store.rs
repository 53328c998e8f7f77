//! App-wide yewdux store.
//!
//! # Design
//! - The desk slice is the only shared state; components read it through selectors.
//! - Workflows reach it through [`DispatchStore`], so the same `Desk` code runs here and in the CLI.

use parley_core::{DeskState, DeskStore};
use yewdux::prelude::Dispatch;
use yewdux::store::Store;

/// Global application store.
#[derive(Clone, Debug, Default, PartialEq, Store)]
pub struct AppStore {
    /// Form, history, selection, and delivery state.
    pub desk: DeskState,
}

/// [`DeskStore`] backed by the global [`AppStore`].
#[derive(Clone)]
pub struct DispatchStore {
    dispatch: Dispatch<AppStore>,
}

impl DispatchStore {
    /// Handle onto the global store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dispatch: Dispatch::<AppStore>::new(),
        }
    }
}

impl Default for DispatchStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for DispatchStore {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl DeskStore for DispatchStore {
    fn read<R>(&self, read: impl FnOnce(&DeskState) -> R) -> R {
        read(&self.dispatch.get().desk)
    }

    fn update(&self, update: impl FnOnce(&mut DeskState)) {
        self.dispatch.reduce_mut(|store| update(&mut store.desk));
    }
}
