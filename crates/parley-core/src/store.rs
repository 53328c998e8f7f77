//! Store seam between workflows and whatever holds the desk state.
//!
//! # Design
//! - Workflows never hold a borrow across an await; they read, await, then update.
//! - The UI backs this with a yewdux slice; the CLI and tests use [`LocalStore`].

use std::cell::RefCell;
use std::rc::Rc;

use crate::state::DeskState;

/// Read/update access to a [`DeskState`].
pub trait DeskStore {
    /// Run `read` against the current state.
    fn read<R>(&self, read: impl FnOnce(&DeskState) -> R) -> R;

    /// Apply `update` to the current state.
    fn update(&self, update: impl FnOnce(&mut DeskState));

    /// Owned copy of the current state.
    fn snapshot(&self) -> DeskState {
        self.read(DeskState::clone)
    }
}

/// Single-threaded in-memory store, scoped to whoever holds it.
#[derive(Clone, Debug, Default)]
pub struct LocalStore {
    inner: Rc<RefCell<DeskState>>,
}

impl LocalStore {
    /// Store seeded with `state`.
    #[must_use]
    pub fn new(state: DeskState) -> Self {
        Self {
            inner: Rc::new(RefCell::new(state)),
        }
    }
}

impl DeskStore for LocalStore {
    fn read<R>(&self, read: impl FnOnce(&DeskState) -> R) -> R {
        read(&*self.inner.borrow())
    }

    fn update(&self, update: impl FnOnce(&mut DeskState)) {
        update(&mut *self.inner.borrow_mut());
    }
}
