//! UI Components
//!
//! Leptos components of the map page.

mod delete_confirm;
mod entity_panel;
mod map_view;
mod order_panel;
mod route_panel;

pub use delete_confirm::DeleteConfirm;
pub use entity_panel::EntityPanel;
pub use map_view::MapView;
pub use order_panel::OrderPanel;
pub use route_panel::RoutePanel;

/// `<option>` value for an optional record id
fn id_value(id: Option<u32>) -> String {
    id.map(|id| id.to_string()).unwrap_or_default()
}

/// Selected id from an `<option>` value; the placeholder maps to `None`
fn parse_id(value: &str) -> Option<u32> {
    value.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_values() {
        assert_eq!(id_value(Some(12)), "12");
        assert_eq!(id_value(None), "");
        assert_eq!(parse_id("12"), Some(12));
        assert_eq!(parse_id(""), None);
    }
}
