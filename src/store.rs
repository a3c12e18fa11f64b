//! Page State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;
use std::cell::RefCell;
use std::rc::Rc;

use crate::forms::EntityForm;
use crate::models::{Client, Item, Order};
use crate::scene::MapScene;

/// Which registry form is being submitted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditMode {
    #[default]
    Idle,
    AddingClient,
    EditingClient,
    AddingItem,
    EditingItem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Client,
    Item,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Add,
    Edit,
}

impl EditMode {
    pub fn for_action(kind: EntityKind, action: FormAction) -> Self {
        match (kind, action) {
            (EntityKind::Client, FormAction::Add) => EditMode::AddingClient,
            (EntityKind::Client, FormAction::Edit) => EditMode::EditingClient,
            (EntityKind::Item, FormAction::Add) => EditMode::AddingItem,
            (EntityKind::Item, FormAction::Edit) => EditMode::EditingItem,
        }
    }

    /// Entity whose form is open, if any
    pub fn kind(&self) -> Option<EntityKind> {
        match self {
            EditMode::Idle => None,
            EditMode::AddingClient | EditMode::EditingClient => Some(EntityKind::Client),
            EditMode::AddingItem | EditMode::EditingItem => Some(EntityKind::Item),
        }
    }
}

/// Collapsible side panels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Clients,
    Items,
    Orders,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Panels {
    pub clients: bool,
    pub items: bool,
    pub orders: bool,
}

impl Panels {
    pub fn is_open(&self, panel: Panel) -> bool {
        match panel {
            Panel::Clients => self.clients,
            Panel::Items => self.items,
            Panel::Orders => self.orders,
        }
    }

    pub fn toggle(&mut self, panel: Panel) {
        let open = match panel {
            Panel::Clients => &mut self.clients,
            Panel::Items => &mut self.items,
            Panel::Orders => &mut self.orders,
        };
        *open = !*open;
    }
}

/// Everything the map page shows or edits
#[derive(Clone, Debug, Default, Store)]
pub struct PageState {
    /// Snapshots of the backend collections
    pub clients: Vec<Client>,
    pub items: Vec<Item>,
    pub orders: Vec<Order>,
    pub mode: EditMode,
    pub client_form: EntityForm,
    pub item_form: EntityForm,
    pub selected_client: Option<u32>,
    pub selected_item: Option<u32>,
    /// Description for the next order
    pub description: String,
    pub panels: Panels,
    /// A mutation is in flight
    pub busy: bool,
    pub scene: MapScene,
}

impl PageState {
    pub fn form_mut(&mut self, kind: EntityKind) -> &mut EntityForm {
        match kind {
            EntityKind::Client => &mut self.client_form,
            EntityKind::Item => &mut self.item_form,
        }
    }

    pub fn client(&self, id: u32) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == Some(id))
    }

    pub fn item(&self, id: u32) -> Option<&Item> {
        self.items.iter().find(|i| i.id == Some(id))
    }

    pub fn order(&self, id: u32) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == Some(id))
    }
}

/// Type alias for the store
pub type PageStore = Store<PageState>;

/// Shared handle to the page state
pub trait PageCell: Clone + 'static {
    fn inspect<T>(&self, f: impl FnOnce(&PageState) -> T) -> T;
    fn modify<T>(&self, f: impl FnOnce(&mut PageState) -> T) -> T;
}

impl PageCell for PageStore {
    fn inspect<T>(&self, f: impl FnOnce(&PageState) -> T) -> T {
        self.with_untracked(f)
    }

    fn modify<T>(&self, f: impl FnOnce(&mut PageState) -> T) -> T {
        let mut guard = self.write();
        f(&mut *guard)
    }
}

impl PageCell for Rc<RefCell<PageState>> {
    fn inspect<T>(&self, f: impl FnOnce(&PageState) -> T) -> T {
        f(&*self.borrow())
    }

    fn modify<T>(&self, f: impl FnOnce(&mut PageState) -> T) -> T {
        f(&mut *self.borrow_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_mode_dispatch_table() {
        assert_eq!(EditMode::for_action(EntityKind::Client, FormAction::Add), EditMode::AddingClient);
        assert_eq!(EditMode::for_action(EntityKind::Item, FormAction::Edit), EditMode::EditingItem);
        assert_eq!(EditMode::EditingClient.kind(), Some(EntityKind::Client));
        assert_eq!(EditMode::Idle.kind(), None);
    }

    #[test]
    fn test_panel_toggle() {
        let mut panels = Panels::default();
        panels.toggle(Panel::Orders);
        assert!(panels.is_open(Panel::Orders));
        assert!(!panels.is_open(Panel::Clients));
        panels.toggle(Panel::Orders);
        assert!(!panels.is_open(Panel::Orders));
    }
}
