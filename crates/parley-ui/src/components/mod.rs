//! Desk components.

pub(crate) mod history;
pub(crate) mod translate;

use yew::prelude::*;

/// Placeholder rendered when the API context is missing.
pub(crate) fn missing_context() -> Html {
    html! {
        <div class="panel">
            <p class="text-sm text-error">{"Missing API context."}</p>
        </div>
    }
}
