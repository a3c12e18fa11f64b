//! Route Panel Component
//!
//! Client/item pickers and the route actions.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{id_value, parse_id};
use crate::context::use_page_context;
use crate::models::Located;
use crate::store::PageStateStoreFields;

#[component]
pub fn RoutePanel() -> impl IntoView {
    let ctx = use_page_context();
    let store = ctx.store;

    let show_route = move |_: web_sys::MouseEvent| {
        let controller = ctx.controller();
        spawn_local(async move {
            controller.apply_settings().await;
        });
    };

    let clear_route = move |_: web_sys::MouseEvent| {
        let controller = ctx.controller();
        spawn_local(async move {
            controller.clear_routes().await;
        });
    };

    view! {
        <section class="panel route-panel">
            <label class="field">
                "Client"
                <select
                    prop:value=move || id_value(store.selected_client().get())
                    on:change=move |ev| ctx.controller().select_client(parse_id(&event_target_value(&ev)))
                >
                    <option value="">"Select a client"</option>
                    {move || store.clients().get().into_iter().map(|client| view! {
                        <option value=id_value(client.id)>{client.name().unwrap_or_default().to_string()}</option>
                    }).collect_view()}
                </select>
            </label>

            <label class="field">
                "Item"
                <select
                    prop:value=move || id_value(store.selected_item().get())
                    on:change=move |ev| ctx.controller().select_item(parse_id(&event_target_value(&ev)))
                >
                    <option value="">"Select an item"</option>
                    {move || store.items().get().into_iter().map(|item| view! {
                        <option value=id_value(item.id)>{item.name().unwrap_or_default().to_string()}</option>
                    }).collect_view()}
                </select>
            </label>

            <div class="panel-actions">
                <button type="button" on:click=show_route>"Show route"</button>
                <button type="button" class="secondary" on:click=clear_route>"Clear"</button>
            </div>
        </section>
    }
}
