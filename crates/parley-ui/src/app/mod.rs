//! Application shell: API context, initial history load, and the entrypoint.

pub(crate) mod api;

use gloo::console;
use yew::prelude::*;
use yewdux::prelude::use_selector;

use crate::app::api::ApiCtx;
use crate::components::history::HistoryPanel;
use crate::components::translate::TranslatePanel;
use crate::store::AppStore;

#[function_component(ParleyApp)]
fn parley_app() -> Html {
    let api_ctx = use_memo(|_| ApiCtx::from_build_env(), ());
    let error = use_selector(|store: &AppStore| store.desk.error.clone());

    {
        let api_ctx = (*api_ctx).clone();
        use_effect_with_deps(
            move |_| {
                let desk = api_ctx.desk();
                yew::platform::spawn_local(async move {
                    if let Err(err) = desk.refresh_history().await {
                        console::warn!(format!("initial history load failed: {err}"));
                    }
                });
                || ()
            },
            (),
        );
    }

    html! {
        <ContextProvider<ApiCtx> context={(*api_ctx).clone()}>
            <div class="desk">
                <header class="desk-header">
                    <h1>{"Parley"}</h1>
                    <p class="text-sm">{"Translate a ticket, review history, deliver to the partner."}</p>
                </header>
                if let Some(message) = (*error).clone() {
                    <div class="alert alert-error" role="alert">{message}</div>
                }
                <TranslatePanel />
                <HistoryPanel />
            </div>
        </ContextProvider<ApiCtx>>
    }
}

/// Entrypoint invoked by Trunk for wasm32 builds.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<ParleyApp>::with_root(root).render();
    } else {
        yew::Renderer::<ParleyApp>::new().render();
    }
}
