//! Order Panel Component
//!
//! Registers orders for the selected pair and lists existing ones.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::DeleteConfirm;
use crate::context::{use_page_context, PageContext};
use crate::models::{Entity, Located, Order};
use crate::store::{Panel, PageStateStoreFields};

/// One-line summary shown in the order list
fn order_summary(order: &Order) -> String {
    let client = order.client.as_ref().and_then(|c| c.name()).unwrap_or("?");
    let item = order.item.as_ref().and_then(|i| i.name()).unwrap_or("?");
    let mut line = format!("{} → {}", client, item);
    if let Some(description) = order.description.as_deref().filter(|d| !d.trim().is_empty()) {
        line.push_str(&format!(": {}", description.trim()));
    }
    if let Some(status) = &order.status {
        line.push_str(&format!(" [{}]", status));
    }
    if let Some(dt) = order.dt {
        line.push_str(&format!(" {}", dt.format("%Y-%m-%d %H:%M")));
    }
    line
}

#[component]
pub fn OrderPanel() -> impl IntoView {
    let ctx = use_page_context();
    let store = ctx.store;

    let register = move |_: web_sys::MouseEvent| {
        let controller = ctx.controller();
        spawn_local(async move {
            controller.insert_order().await;
        });
    };

    view! {
        <section class="panel">
            <button
                type="button"
                class="panel-toggle"
                on:click=move |_| ctx.controller().toggle_panel(Panel::Orders)
            >
                "Orders"
            </button>

            <Show when=move || store.panels().get().is_open(Panel::Orders)>
                <textarea
                    class="order-description"
                    placeholder="Description"
                    prop:value=move || store.description().get()
                    on:input=move |ev| ctx.controller().set_description(event_target_value(&ev))
                ></textarea>
                <div class="panel-actions">
                    <button type="button" on:click=register>"Register order"</button>
                </div>
                <ul class="order-list">
                    {move || {
                        store
                            .orders()
                            .get()
                            .into_iter()
                            .map(|order| order_row(ctx, order))
                            .collect_view()
                    }}
                </ul>
            </Show>
        </section>
    }
}

fn order_row(ctx: PageContext, order: Order) -> impl IntoView {
    let summary = order_summary(&order);
    let actions = order.id.map(|id| {
        let show = move |_: web_sys::MouseEvent| {
            let controller = ctx.controller();
            spawn_local(async move {
                controller.init_map_order(id).await;
            });
        };
        let remove = move |_: ()| {
            let controller = ctx.controller();
            spawn_local(async move {
                controller.remove_order(id).await;
            });
        };
        view! {
            <button type="button" class="secondary" on:click=show>"Show"</button>
            <DeleteConfirm subject=Order::LABEL on_confirm=remove />
        }
    });

    view! {
        <li class="order-row">
            <span class="order-summary">{summary}</span>
            {actions}
        </li>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Client, Item};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_order_summary() {
        let order = Order {
            id: Some(1),
            dt: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).single(),
            description: Some("panel delivery ".into()),
            status: Some("pending".into()),
            client: Some(Client { name: Some("Depot".into()), ..Default::default() }),
            item: Some(Item { name: Some("Panel".into()), ..Default::default() }),
            ..Default::default()
        };
        assert_eq!(order_summary(&order), "Depot → Panel: panel delivery [pending] 2024-03-01 12:30");
    }

    #[test]
    fn test_summary_of_bare_order() {
        assert_eq!(order_summary(&Order::default()), "? → ?");
    }
}
