//! Route Map App
//!
//! Side column with the registry panels, map on the right.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::components::{EntityPanel, MapView, OrderPanel, RoutePanel};
use crate::config::AppConfig;
use crate::context::PageContext;
use crate::controller::{MapPageController, Services};
use crate::store::{EntityKind, PageState, PageStateStoreFields};

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_env();
    let store = Store::new(PageState::default());
    let ctx = PageContext::new(store, MapPageController::new(store, Services::http(&config)));

    // Provide context to all children
    provide_context(ctx);

    // Load collections and item markers on mount
    Effect::new(move |_| {
        let controller = ctx.controller();
        spawn_local(async move {
            controller.init().await;
        });
    });

    view! {
        <div class="app-layout">
            <aside class="side-column">
                <h1>"Route Map"</h1>
                <RoutePanel />
                <EntityPanel kind=EntityKind::Client />
                <EntityPanel kind=EntityKind::Item />
                <OrderPanel />
            </aside>

            <main class="main-content">
                <MapView />
            </main>

            <Show when=move || store.busy().get()>
                <div class="preload">"Saving..."</div>
            </Show>
        </div>
    }
}
