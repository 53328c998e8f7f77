//! API client context for sharing a singleton client instance.

use std::rc::Rc;

use parley_core::Desk;

use crate::services::api::ApiClient;
use crate::store::DispatchStore;

/// Desk controller as wired in the browser.
pub(crate) type UiDesk = Desk<ApiClient, DispatchStore>;

/// Shared API client context for UI components.
#[derive(Clone)]
pub(crate) struct ApiCtx {
    /// Singleton API client instance.
    pub client: Rc<ApiClient>,
}

impl ApiCtx {
    /// Context for the build-time configured backend.
    pub(crate) fn from_build_env() -> Self {
        Self {
            client: Rc::new(ApiClient::from_build_env()),
        }
    }

    /// Desk controller over the shared client and the global store.
    pub(crate) fn desk(&self) -> UiDesk {
        Desk::new(self.client.as_ref().clone(), DispatchStore::new())
    }
}

impl PartialEq for ApiCtx {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.client, &other.client)
    }
}
