//! Entity Panel Component
//!
//! Collapsible registry panel for clients or items: add, edit and delete
//! through one validated form.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::DeleteConfirm;
use crate::context::use_page_context;
use crate::forms::FormField;
use crate::models::{Client, Entity, Item};
use crate::store::{EntityKind, FormAction, Panel, PageStateStoreFields};

/// Form inputs: field, label, placeholder
const FIELDS: [(FormField, &str, &str); 4] = [
    (FormField::Name, "Name", "Name"),
    (FormField::Latitude, "Latitude", "-15.7801"),
    (FormField::Longitude, "Longitude", "-47.9292"),
    (FormField::Icon, "Icon", "truck.png"),
];

#[component]
pub fn EntityPanel(kind: EntityKind) -> impl IntoView {
    let ctx = use_page_context();
    let store = ctx.store;
    let (panel, title, subject) = match kind {
        EntityKind::Client => (Panel::Clients, "Clients", Client::LABEL),
        EntityKind::Item => (Panel::Items, "Items", Item::LABEL),
    };

    let form = move || match kind {
        EntityKind::Client => store.client_form().get(),
        EntityKind::Item => store.item_form().get(),
    };
    let selected = move || match kind {
        EntityKind::Client => store.selected_client().get(),
        EntityKind::Item => store.selected_item().get(),
    };
    let editing = move || store.mode().get().kind() == Some(kind);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let controller = ctx.controller();
        spawn_local(async move {
            controller.submit().await;
        });
    };

    let on_delete = move |_: ()| {
        let controller = ctx.controller();
        spawn_local(async move {
            match kind {
                EntityKind::Client => controller.delete_client().await,
                EntityKind::Item => controller.delete_item().await,
            }
        });
    };

    view! {
        <section class="panel">
            <button
                type="button"
                class="panel-toggle"
                on:click=move |_| ctx.controller().toggle_panel(panel)
            >
                {title}
            </button>

            <Show when=move || store.panels().get().is_open(panel)>
                <div class="panel-actions">
                    <button
                        type="button"
                        on:click=move |_| ctx.controller().set_action(kind, FormAction::Add)
                    >
                        "New"
                    </button>
                    <button
                        type="button"
                        disabled=move || selected().is_none()
                        on:click=move |_| ctx.controller().set_action(kind, FormAction::Edit)
                    >
                        "Edit"
                    </button>
                    <Show when=move || selected().is_some()>
                        <DeleteConfirm subject=subject on_confirm=on_delete />
                    </Show>
                </div>

                <Show when=editing>
                    <form class="entity-form" on:submit=on_submit>
                        {FIELDS
                            .into_iter()
                            .map(|(field, label, placeholder)| {
                                view! {
                                    <label class="field">
                                        {label}
                                        <input
                                            type="text"
                                            placeholder=placeholder
                                            prop:value=move || form().field(field).to_string()
                                            on:input=move |ev| {
                                                ctx.controller().update_form(kind, field, event_target_value(&ev))
                                            }
                                        />
                                    </label>
                                }
                            })
                            .collect_view()}
                        <div class="form-actions">
                            <button type="submit" disabled=move || !form().is_valid()>
                                "Save"
                            </button>
                            <button
                                type="button"
                                class="secondary"
                                on:click=move |_| ctx.controller().clean()
                            >
                                "Cancel"
                            </button>
                        </div>
                    </form>
                </Show>
            </Show>
        </section>
    }
}
