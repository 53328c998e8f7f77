//! History list with filter, detail pane, and delivery.

use gloo::console;
use parley_core::{BusyFlags, StatusFilter};
use web_sys::HtmlSelectElement;
use yew::prelude::*;
use yewdux::prelude::use_selector;

use crate::app::api::{ApiCtx, UiDesk};
use crate::components::missing_context;
use crate::store::AppStore;
use crate::view_model::{
    DetailView, HistoryRow, deliver_label, delivery_text, detail_view, filter_options,
    history_notice, history_rows, refresh_label,
};

#[function_component(HistoryPanel)]
pub(crate) fn history_panel() -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let rows = use_selector(|store: &AppStore| history_rows(&store.desk));
    let filter = use_selector(|store: &AppStore| store.desk.filter);
    let busy = use_selector(|store: &AppStore| store.desk.busy);
    let notice = use_selector(|store: &AppStore| history_notice(&store.desk));
    let detail = use_selector(|store: &AppStore| detail_view(&store.desk));
    let delivery = use_selector(|store: &AppStore| delivery_text(store.desk.delivery.as_ref()));
    let Some(api_ctx) = api_ctx else {
        return missing_context();
    };
    let desk = api_ctx.desk();

    let on_filter = {
        let desk = desk.clone();
        Callback::from(move |event: Event| {
            let Some(select) = event.target_dyn_into::<HtmlSelectElement>() else {
                return;
            };
            let Ok(filter) = select.value().parse::<StatusFilter>() else {
                return;
            };
            let desk = desk.clone();
            yew::platform::spawn_local(async move {
                if let Err(err) = desk.change_filter(filter).await {
                    console::warn!(format!("history load failed: {err}"));
                }
            });
        })
    };
    let on_refresh = {
        let desk = desk.clone();
        Callback::from(move |_: MouseEvent| {
            let desk = desk.clone();
            yew::platform::spawn_local(async move {
                if let Err(err) = desk.refresh_history().await {
                    console::warn!(format!("history load failed: {err}"));
                }
            });
        })
    };

    html! {
        <section class="panel history-panel">
            <div class="history-toolbar">
                <h2>{"History"}</h2>
                <select class="select" onchange={on_filter}>
                    { for filter_options().into_iter().map(|(value, label)| html! {
                        <option value={value} selected={value == filter.as_value()}>{label}</option>
                    }) }
                </select>
                <button class="btn" disabled={busy.refreshing} onclick={on_refresh}>
                    {refresh_label(*busy)}
                </button>
            </div>
            if let Some(notice) = (*notice).clone() {
                <p class="empty-state">{notice}</p>
            } else {
                <ul class="history-list">
                    { for rows.iter().map(|row| history_item(row, &desk)) }
                </ul>
            }
            { detail_pane((*detail).as_ref(), (*delivery).as_deref(), *busy, &desk) }
        </section>
    }
}

fn history_item(row: &HistoryRow, desk: &UiDesk) -> Html {
    let onclick = {
        let desk = desk.clone();
        let id = row.id;
        Callback::from(move |_: MouseEvent| desk.select(id))
    };
    let class = if row.selected {
        "history-item selected"
    } else {
        "history-item"
    };
    html! {
        <li key={row.id.to_string()} class={class} {onclick}>
            <span class={row.badge_class.clone()}>{row.status}</span>
            <span class="flow">{row.flow.clone()}</span>
            <span class="created">{row.created.clone()}</span>
            <span class="text">{row.text.clone()}</span>
        </li>
    }
}

fn detail_pane(
    detail: Option<&DetailView>,
    delivery: Option<&str>,
    busy: BusyFlags,
    desk: &UiDesk,
) -> Html {
    let Some(detail) = detail else {
        return html! {
            <p class="detail-empty text-sm">{"Select a ticket to see its details."}</p>
        };
    };

    let on_deliver = {
        let desk = desk.clone();
        Callback::from(move |_: MouseEvent| {
            let desk = desk.clone();
            yew::platform::spawn_local(async move {
                if let Err(err) = desk.deliver().await {
                    console::warn!(format!("delivery failed: {err}"));
                }
            });
        })
    };

    html! {
        <article class="detail">
            <header>
                <h3>{format!("Ticket #{}", detail.id)}</h3>
                <span class={detail.badge_class.clone()}>{detail.status}</span>
                <span class="flow">{detail.flow.clone()}</span>
            </header>
            <dl>
                <dt>{"Original"}</dt>
                <dd>{detail.original.clone()}</dd>
                <dt>{"Translation"}</dt>
                <dd>{detail.translated.clone()}</dd>
                <dt>{"Created"}</dt>
                <dd>{detail.created.clone()}</dd>
                if let Some(translated_at) = detail.translated_at.clone() {
                    <dt>{"Translated"}</dt>
                    <dd>{translated_at}</dd>
                }
            </dl>
            <button class="btn btn-secondary" disabled={!detail.can_deliver} onclick={on_deliver}>
                {deliver_label(busy)}
            </button>
            if let Some(payload) = delivery.map(str::to_string) {
                <pre class="delivery">{payload}</pre>
            }
        </article>
    }
}
