//! Map View Component
//!
//! Hosts the OpenLayers map and keeps it in sync with the page scene.

use leptos::html;
use leptos::prelude::*;

use crate::context::use_page_context;
use crate::olmap::OlMap;
use crate::store::PageStateStoreFields;

#[component]
pub fn MapView() -> impl IntoView {
    let ctx = use_page_context();
    let map_ref = NodeRef::<html::Div>::new();

    // Mount once the element exists, then redraw on every scene change
    Effect::new(move |map: Option<Option<OlMap>>| {
        let scene = ctx.store.scene().get();
        let target = map_ref.get()?;
        match map.flatten() {
            Some(map) => {
                if let Err(e) = map.render(&scene) {
                    log::error!("Could not draw map: {}", e);
                }
                Some(map)
            }
            None => OlMap::mount(&target, &scene)
                .map_err(|e| log::error!("Could not create map: {}", e))
                .ok(),
        }
    });

    view! { <div id="map" class="map" node_ref=map_ref></div> }
}
