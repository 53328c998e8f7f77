//! Translate form and result panel.

use gloo::console;
use parley_api_models::Language;
use web_sys::{HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;
use yewdux::prelude::use_selector;

use crate::app::api::ApiCtx;
use crate::components::missing_context;
use crate::store::AppStore;
use crate::view_model::{form_enabled, language_options, translate_label};

fn language_select(id: &str, label: &str, current: Language, onchange: Callback<Event>) -> Html {
    html! {
        <label class="field" for={id.to_string()}>
            <span class="label-text">{label.to_string()}</span>
            <select id={id.to_string()} class="select" {onchange}>
                { for language_options().into_iter().map(|(value, name)| html! {
                    <option value={value} selected={value == current.as_str()}>{name}</option>
                }) }
            </select>
        </label>
    }
}

fn select_language(event: &Event) -> Option<Language> {
    event
        .target_dyn_into::<HtmlSelectElement>()
        .and_then(|select| select.value().parse::<Language>().ok())
}

#[function_component(TranslatePanel)]
pub(crate) fn translate_panel() -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let text = use_selector(|store: &AppStore| store.desk.text.clone());
    let source = use_selector(|store: &AppStore| store.desk.source_lang);
    let target = use_selector(|store: &AppStore| store.desk.target_lang);
    let busy = use_selector(|store: &AppStore| store.desk.busy);
    let result = use_selector(|store: &AppStore| store.desk.result.clone());
    let Some(api_ctx) = api_ctx else {
        return missing_context();
    };
    let desk = api_ctx.desk();

    let on_input = {
        let desk = desk.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(area) = event.target_dyn_into::<HtmlTextAreaElement>() {
                desk.set_text(area.value());
            }
        })
    };
    let on_source = {
        let desk = desk.clone();
        Callback::from(move |event: Event| {
            if let Some(lang) = select_language(&event) {
                desk.set_source(lang);
            }
        })
    };
    let on_target = {
        let desk = desk.clone();
        Callback::from(move |event: Event| {
            if let Some(lang) = select_language(&event) {
                desk.set_target(lang);
            }
        })
    };
    let on_translate = {
        let desk = desk.clone();
        Callback::from(move |_: MouseEvent| {
            let desk = desk.clone();
            yew::platform::spawn_local(async move {
                if let Err(err) = desk.translate().await {
                    console::warn!(format!("translate failed: {err}"));
                }
            });
        })
    };
    let on_clear = Callback::from(move |_: MouseEvent| desk.clear());

    let enabled = form_enabled(*busy);
    html! {
        <section class="panel translate-panel">
            <div class="languages">
                { language_select("source-lang", "From", *source, on_source) }
                { language_select("target-lang", "To", *target, on_target) }
            </div>
            <textarea
                class="textarea"
                rows="4"
                placeholder="Type the text to translate"
                value={(*text).clone()}
                oninput={on_input}
            />
            <div class="actions">
                <button class="btn btn-primary" disabled={!enabled} onclick={on_translate}>
                    {translate_label(*busy)}
                </button>
                <button class="btn" disabled={!enabled} onclick={on_clear}>{"Clear"}</button>
            </div>
            if let Some(translated) = (*result).clone() {
                <div class="result">
                    <span class="label-text">{"Result"}</span>
                    <p class="result-text">{translated}</p>
                </div>
            }
        </section>
    }
}
