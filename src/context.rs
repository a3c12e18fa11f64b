//! Page Context
//!
//! Shared handles provided via Leptos Context API.

use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;

use crate::controller::MapPageController;
use crate::store::PageStore;

pub type PageController = MapPageController<PageStore>;

/// Page-wide handles provided via context
#[derive(Clone, Copy)]
pub struct PageContext {
    /// Reactive page state
    pub store: PageStore,
    /// Handlers own `Rc` services, so they stay on the local arena
    controller: StoredValue<PageController, LocalStorage>,
}

impl PageContext {
    pub fn new(store: PageStore, controller: PageController) -> Self {
        Self {
            store,
            controller: StoredValue::new_local(controller),
        }
    }

    /// Handle for one event; cheap to clone into a spawned task
    pub fn controller(&self) -> PageController {
        self.controller.get_value()
    }
}

pub fn use_page_context() -> PageContext {
    use_context::<PageContext>().expect("PageContext should be provided")
}
