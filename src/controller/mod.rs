//! Map Page Controller
//!
//! Page handlers: loading collections, framing routes on the map, and
//! running registry mutations. Every handler reads and writes the page
//! through a [`PageCell`], so the same code drives the reactive store in
//! the browser and a plain `RefCell` in tests.


use chrono::Utc;
use std::future::Future;
use std::rc::Rc;

use crate::api::{OsrmRouteProvider, Registry, RestRegistry, RouteProvider};
use crate::config::AppConfig;
use crate::error::ApiResult;
use crate::forms::{EntityForm, FormField};
use crate::geo::LonLat;
use crate::models::{Client, Item, Located, Order};
use crate::notify::{BrowserNotifier, Notifier};
use crate::scene::{Marker, MarkerKind, ROUTE_ZOOM};
use crate::store::{EditMode, EntityKind, FormAction, PageCell, PageState, Panel};

const SELECT_BOTH: &str = "Please select a client and an item to show the route.";
const INVALID_SELECTION: &str = "Invalid client or item.";
const MISSING_COORDINATES: &str = "Client or item does not have valid coordinates.";
const ROUTE_FAILED: &str = "Could not compute the route.";
const ORDER_NEEDS_SELECTION: &str = "Please select a client and an item to register an order.";
const INVALID_ORDER: &str = "Invalid order.";

const ORDER_STATUS_PENDING: &str = "pending";
const ORDER_ACTIVE_ON_CREATE: i32 = 0;

/// Remote collaborators of the page
pub struct Services {
    pub clients: Rc<dyn Registry<Client>>,
    pub items: Rc<dyn Registry<Item>>,
    pub orders: Rc<dyn Registry<Order>>,
    pub routes: Rc<dyn RouteProvider>,
    pub notifier: Rc<dyn Notifier>,
}

impl Services {
    /// HTTP-backed services for the configured endpoints
    pub fn http(config: &AppConfig) -> Self {
        let http = reqwest::Client::new();
        Self {
            clients: Rc::new(RestRegistry::<Client>::new(http.clone(), &config.api_base)),
            items: Rc::new(RestRegistry::<Item>::new(http.clone(), &config.api_base)),
            orders: Rc::new(RestRegistry::<Order>::new(http.clone(), &config.api_base)),
            routes: Rc::new(OsrmRouteProvider::new(http, &config.routing_base)),
            notifier: Rc::new(BrowserNotifier),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Verb {
    Register,
    Update,
    Delete,
}

impl Verb {
    fn present(self) -> &'static str {
        match self {
            Verb::Register => "register",
            Verb::Update => "update",
            Verb::Delete => "delete",
        }
    }

    fn past(self) -> &'static str {
        match self {
            Verb::Register => "registered",
            Verb::Update => "updated",
            Verb::Delete => "deleted",
        }
    }
}

#[derive(Clone)]
pub struct MapPageController<C> {
    state: C,
    services: Rc<Services>,
}

impl<C: PageCell> MapPageController<C> {
    pub fn new(state: C, services: Services) -> Self {
        Self {
            state,
            services: Rc::new(services),
        }
    }

    fn alert(&self, message: &str) {
        self.services.notifier.alert(message);
    }

    // ========================
    // Loading
    // ========================

    /// Page load: default view, every collection, item markers
    pub async fn init(&self) {
        self.state.modify(|s| s.scene.reset());
        futures::join!(self.reload_all(), self.init_map_items());
    }

    pub async fn reload_all(&self) {
        futures::join!(self.load_clients(), self.load_items(), self.load_orders());
    }

    pub async fn load_clients(&self) {
        match self.services.clients.list().await {
            Ok(clients) => {
                log::info!("Clients loaded: {}", clients.len());
                self.state.modify(|s| s.clients = clients);
            }
            Err(e) => log::error!("Error loading clients: {}", e),
        }
    }

    pub async fn load_items(&self) {
        match self.services.items.list().await {
            Ok(items) => {
                log::info!("Items loaded: {}", items.len());
                self.state.modify(|s| s.items = items);
            }
            Err(e) => log::error!("Error loading items: {}", e),
        }
    }

    pub async fn load_orders(&self) {
        match self.services.orders.list().await {
            Ok(orders) => {
                log::info!("Orders loaded: {}", orders.len());
                self.state.modify(|s| s.orders = orders);
            }
            Err(e) => log::error!("Error loading orders: {}", e),
        }
    }

    /// Fetch items and put a marker on every one with a position
    pub async fn init_map_items(&self) {
        match self.services.items.list().await {
            Ok(items) => self.state.modify(|s| {
                s.scene.add_markers(&items, MarkerKind::Item);
                s.items = items;
            }),
            Err(e) => log::error!("Error loading items: {}", e),
        }
    }

    // ========================
    // Map
    // ========================

    /// Frame the selected client/item pair and route between them
    pub async fn apply_settings(&self) {
        let (start, end) = match self.state.inspect(route_markers) {
            Ok(markers) => markers,
            Err(message) => {
                self.alert(message);
                return;
            }
        };
        let (from, to) = (start.position, end.position);

        self.state.modify(|s| {
            s.scene.focus(from.midpoint(&to), ROUTE_ZOOM);
            s.scene.clear();
            s.scene.add_marker(start);
            s.scene.add_marker(end);
        });

        self.get_route(from, to).await;
    }

    pub async fn get_route(&self, start: LonLat, end: LonLat) {
        match self.services.routes.route(start, end).await {
            Ok(path) => {
                log::info!("Route with {} points", path.len());
                self.state.modify(|s| s.scene.set_route(&path));
            }
            Err(e) => {
                log::error!("Error fetching route: {}", e);
                self.state.modify(|s| s.scene.reset());
                self.alert(ROUTE_FAILED);
                self.init_map_items().await;
            }
        }
    }

    /// Forget the selection and go back to the item overview
    pub async fn clear_routes(&self) {
        self.state.modify(|s| {
            s.selected_client = None;
            s.selected_item = None;
            s.scene.reset();
        });
        self.init_map_items().await;
    }

    // ========================
    // Page state
    // ========================

    pub fn set_action(&self, kind: EntityKind, action: FormAction) {
        self.state.modify(|s| s.mode = EditMode::for_action(kind, action));
    }

    /// Leave edit mode and empty both forms
    pub fn clean(&self) {
        self.state.modify(|s| {
            s.mode = EditMode::Idle;
            s.client_form = EntityForm::default();
            s.item_form = EntityForm::default();
        });
    }

    pub fn toggle_panel(&self, panel: Panel) {
        self.state.modify(|s| s.panels.toggle(panel));
        self.clean();
    }

    pub fn select_client(&self, id: Option<u32>) {
        self.state.modify(|s| {
            let form = prefill(id.and_then(|id| s.client(id)));
            s.selected_client = id;
            s.client_form = form;
        });
    }

    pub fn select_item(&self, id: Option<u32>) {
        self.state.modify(|s| {
            let form = prefill(id.and_then(|id| s.item(id)));
            s.selected_item = id;
            s.item_form = form;
        });
    }

    pub fn update_form(&self, kind: EntityKind, field: FormField, value: String) {
        self.state.modify(|s| *s.form_mut(kind).field_mut(field) = value);
    }

    pub fn set_description(&self, description: String) {
        self.state.modify(|s| s.description = description);
    }

    // ========================
    // Mutations
    // ========================

    /// Submit the open form according to the edit mode
    pub async fn submit(&self) {
        let (mode, check) = self.state.inspect(|s| {
            let check = match s.mode.kind() {
                Some(EntityKind::Client) => s.client_form.validate(),
                Some(EntityKind::Item) => s.item_form.validate(),
                None => Ok(()),
            };
            (s.mode, check)
        });
        if let Err(e) = check {
            self.alert(&format!("Please review the form: {}.", e));
            return;
        }
        match mode {
            EditMode::Idle => log::debug!("submit without an open form"),
            EditMode::AddingClient => self.insert_client().await,
            EditMode::EditingClient => self.update_client().await,
            EditMode::AddingItem => self.insert_item().await,
            EditMode::EditingItem => self.update_item().await,
        }
    }

    pub async fn insert_client(&self) {
        let client = self.state.inspect(|s| s.client_form.to_client());
        self.mutate("Client", Verb::Register, self.services.clients.create(&client), |_| {})
            .await;
    }

    pub async fn update_client(&self) {
        let client = self.state.inspect(|s| {
            s.selected_client.map(|id| Client {
                id: Some(id),
                ..s.client_form.to_client()
            })
        });
        let Some(client) = client else {
            self.alert("Please select a client to update.");
            return;
        };
        self.mutate("Client", Verb::Update, self.services.clients.update(&client), |_| {})
            .await;
    }

    pub async fn delete_client(&self) {
        let client = self
            .state
            .inspect(|s| s.selected_client.and_then(|id| s.client(id)).cloned());
        let Some(client) = client else {
            self.alert("Please select a client to delete.");
            return;
        };
        self.mutate("Client", Verb::Delete, self.services.clients.delete(&client), |s| {
            s.selected_client = None;
        })
        .await;
    }

    pub async fn insert_item(&self) {
        let item = self.state.inspect(|s| s.item_form.to_item());
        self.mutate("Item", Verb::Register, self.services.items.create(&item), |_| {})
            .await;
    }

    pub async fn update_item(&self) {
        let item = self.state.inspect(|s| {
            s.selected_item.map(|id| Item {
                id: Some(id),
                ..s.item_form.to_item()
            })
        });
        let Some(item) = item else {
            self.alert("Please select an item to update.");
            return;
        };
        self.mutate("Item", Verb::Update, self.services.items.update(&item), |_| {})
            .await;
    }

    pub async fn delete_item(&self) {
        let item = self
            .state
            .inspect(|s| s.selected_item.and_then(|id| s.item(id)).cloned());
        let Some(item) = item else {
            self.alert("Please select an item to delete.");
            return;
        };
        self.mutate("Item", Verb::Delete, self.services.items.delete(&item), |s| {
            s.selected_item = None;
        })
        .await;
    }

    /// Register an order for the selected client and item
    pub async fn insert_order(&self) {
        let Some(order) = self.state.inspect(order_draft) else {
            self.alert(ORDER_NEEDS_SELECTION);
            return;
        };
        self.mutate("Order", Verb::Register, self.services.orders.create(&order), |s| {
            s.description.clear();
        })
        .await;
    }

    pub async fn remove_order(&self, id: u32) {
        let Some(order) = self.state.inspect(|s| s.order(id).cloned()) else {
            self.alert(INVALID_ORDER);
            return;
        };
        self.mutate("Order", Verb::Delete, self.services.orders.delete(&order), |_| {})
            .await;
    }

    /// Replay an order's route on the map
    pub async fn init_map_order(&self, id: u32) {
        let pair = self.state.inspect(|s| {
            let order = s.order(id)?;
            Some((order.client.as_ref()?.id?, order.item.as_ref()?.id?))
        });
        let Some((client_id, item_id)) = pair else {
            self.alert(INVALID_ORDER);
            return;
        };
        self.select_client(Some(client_id));
        self.select_item(Some(item_id));
        self.apply_settings().await;
    }

    /// Run one registry call, then reset the page and reload everything
    /// whatever the outcome. Without a route on the map the item markers
    /// are redrawn from the fresh list.
    async fn mutate(
        &self,
        label: &'static str,
        verb: Verb,
        request: impl Future<Output = ApiResult<()>>,
        on_success: impl FnOnce(&mut PageState),
    ) {
        self.state.modify(|s| s.busy = true);
        let outcome = request.await;
        match &outcome {
            Ok(()) => {
                log::info!("{} {}", label, verb.past());
                self.state.modify(on_success);
            }
            Err(e) => log::error!("Could not {} {}: {}", verb.present(), label, e),
        }

        self.clean();
        self.reload_all().await;
        self.state.modify(|s| {
            s.busy = false;
            // Overview markers follow the reloaded items; a drawn route keeps its pair
            if s.scene.route.is_none() {
                s.scene.overlays.clear();
                s.scene.add_markers(&s.items, MarkerKind::Item);
            }
        });

        let message = match outcome {
            Ok(()) => format!("{} successfully {}!", label, verb.past()),
            Err(_) => format!("Could not {} the {}!", verb.present(), label.to_lowercase()),
        };
        self.alert(&message);
    }
}

fn prefill(record: Option<&impl Located>) -> EntityForm {
    record.map(EntityForm::from_record).unwrap_or_default()
}

/// Client and item markers for the current selection
fn route_markers(s: &PageState) -> Result<(Marker, Marker), &'static str> {
    let (Some(client_id), Some(item_id)) = (s.selected_client, s.selected_item) else {
        return Err(SELECT_BOTH);
    };
    let (Some(client), Some(item)) = (s.client(client_id), s.item(item_id)) else {
        return Err(INVALID_SELECTION);
    };
    let (Some(from), Some(to)) = (client.coordinate(), item.coordinate()) else {
        return Err(MISSING_COORDINATES);
    };
    Ok((
        Marker::at(client, MarkerKind::Client, from),
        Marker::at(item, MarkerKind::Item, to),
    ))
}

fn order_draft(s: &PageState) -> Option<Order> {
    let client = s.client(s.selected_client?)?.clone();
    let item = s.item(s.selected_item?)?.clone();
    let description = s.description.trim();
    Some(Order {
        id: None,
        dt: Some(Utc::now()),
        description: (!description.is_empty()).then(|| description.to_string()),
        status: Some(ORDER_STATUS_PENDING.to_string()),
        active: Some(ORDER_ACTIVE_ON_CREATE),
        client: Some(client),
        item: Some(item),
    })
}
