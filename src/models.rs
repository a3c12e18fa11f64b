//! Frontend Models
//!
//! Data structures matching backend entities.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::geo::LonLat;

/// Where the record id goes on update/delete requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdPlacement {
    /// `/clients?id=7`
    Query,
    /// `/items/7`
    Path,
}

/// A record owned by one REST collection
pub trait Entity: Clone + Serialize + 'static {
    /// Collection path under the API root
    const COLLECTION: &'static str;
    const ID_PLACEMENT: IdPlacement;
    /// Human-readable name used in alerts
    const LABEL: &'static str;

    fn id(&self) -> Option<u32>;

    /// Copy the known fields out of a loosely shaped document;
    /// anything else (or a non-object) leaves the field empty
    fn transform(data: &Value) -> Self;
}

/// Records placed on the map from their text coordinates
pub trait Located {
    fn name(&self) -> Option<&str>;
    fn latitude(&self) -> Option<&str>;
    fn longitude(&self) -> Option<&str>;
    fn url_icon(&self) -> Option<&str>;

    /// Position when both coordinates are present and numeric
    fn coordinate(&self) -> Option<LonLat> {
        LonLat::parse(self.longitude()?, self.latitude()?)
    }
}

/// Customer location (matches backend)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Client {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
    #[serde(default)]
    pub url_icon: Option<String>,
    #[serde(default)]
    pub active: Option<i32>,
}

/// Target location (matches backend, same shape as Client)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
    #[serde(default)]
    pub url_icon: Option<String>,
    #[serde(default)]
    pub active: Option<i32>,
}

/// Order linking one client to one item (matches backend)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(default)]
    pub dt: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub active: Option<i32>,
    #[serde(default)]
    pub client: Option<Client>,
    #[serde(default)]
    pub item: Option<Item>,
}

// ========================
// Field copy
// ========================

fn text(data: &Value, key: &str) -> Option<String> {
    match data.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn id(data: &Value) -> Option<u32> {
    data.get("id")?.as_u64().and_then(|v| u32::try_from(v).ok())
}

/// Timestamps as RFC 3339, or the SQL-style `2024-03-01 12:00:00` /
/// `2024-03-01` read as UTC
fn timestamp(data: &Value) -> Option<DateTime<Utc>> {
    let raw = data.get("dt")?.as_str()?.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

fn flag(data: &Value) -> Option<i32> {
    data.get("active")?.as_i64().and_then(|v| i32::try_from(v).ok())
}

// ========================
// Trait impls
// ========================

impl Entity for Client {
    const COLLECTION: &'static str = "clients";
    const ID_PLACEMENT: IdPlacement = IdPlacement::Query;
    const LABEL: &'static str = "Client";

    fn id(&self) -> Option<u32> {
        self.id
    }

    fn transform(data: &Value) -> Self {
        Self {
            id: id(data),
            name: text(data, "name"),
            latitude: text(data, "latitude"),
            longitude: text(data, "longitude"),
            url_icon: text(data, "url_icon"),
            active: flag(data),
        }
    }
}

impl Entity for Item {
    const COLLECTION: &'static str = "items";
    const ID_PLACEMENT: IdPlacement = IdPlacement::Path;
    const LABEL: &'static str = "Item";

    fn id(&self) -> Option<u32> {
        self.id
    }

    fn transform(data: &Value) -> Self {
        Self {
            id: id(data),
            name: text(data, "name"),
            latitude: text(data, "latitude"),
            longitude: text(data, "longitude"),
            url_icon: text(data, "url_icon"),
            active: flag(data),
        }
    }
}

impl Entity for Order {
    const COLLECTION: &'static str = "orders";
    const ID_PLACEMENT: IdPlacement = IdPlacement::Path;
    const LABEL: &'static str = "Order";

    fn id(&self) -> Option<u32> {
        self.id
    }

    /// Nested client/item are copied the same way
    fn transform(data: &Value) -> Self {
        let nested = |key: &str| data.get(key).filter(|v| v.is_object());
        Self {
            id: id(data),
            dt: timestamp(data),
            description: text(data, "description"),
            status: text(data, "status"),
            active: flag(data),
            client: nested("client").map(Client::transform),
            item: nested("item").map(Item::transform),
        }
    }
}

impl Located for Client {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
    fn latitude(&self) -> Option<&str> {
        self.latitude.as_deref()
    }
    fn longitude(&self) -> Option<&str> {
        self.longitude.as_deref()
    }
    fn url_icon(&self) -> Option<&str> {
        self.url_icon.as_deref()
    }
}

impl Located for Item {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
    fn latitude(&self) -> Option<&str> {
        self.latitude.as_deref()
    }
    fn longitude(&self) -> Option<&str> {
        self.longitude.as_deref()
    }
    fn url_icon(&self) -> Option<&str> {
        self.url_icon.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transform_copies_known_fields() {
        let client = Client::transform(&json!({
            "id": 3,
            "name": "Depot",
            "latitude": "-15.79",
            "longitude": -47.88,
            "url_icon": "truck.png",
            "active": 1,
            "unexpected": true
        }));
        assert_eq!(client.id, Some(3));
        assert_eq!(client.name.as_deref(), Some("Depot"));
        assert_eq!(client.latitude.as_deref(), Some("-15.79"));
        assert_eq!(client.longitude.as_deref(), Some("-47.88"));
        assert_eq!(client.active, Some(1));
    }

    #[test]
    fn test_transform_of_null_is_empty() {
        assert_eq!(Item::transform(&Value::Null), Item::default());
    }

    #[test]
    fn test_order_transform_nests_records() {
        let order = Order::transform(&json!({
            "id": 9,
            "dt": "2024-03-01T12:00:00Z",
            "description": "deliver panel",
            "status": "pending",
            "client": { "id": 1, "name": "A" },
            "item": { "id": 2, "name": "B" }
        }));
        assert_eq!(order.id, Some(9));
        assert!(order.dt.is_some());
        assert_eq!(order.client.and_then(|c| c.id), Some(1));
        assert_eq!(order.item.and_then(|i| i.id), Some(2));
    }

    #[test]
    fn test_coordinate_requires_both_values() {
        let mut item = Item {
            latitude: Some("-15.8".into()),
            longitude: None,
            ..Default::default()
        };
        assert_eq!(item.coordinate(), None);
        item.longitude = Some("-47.9".into());
        assert_eq!(item.coordinate(), Some(LonLat::new(-47.9, -15.8)));
    }

    #[test]
    fn test_order_timestamp_formats() {
        let dt = |raw: &str| Order::transform(&json!({ "dt": raw })).dt.map(|d| d.to_rfc3339());
        assert_eq!(dt("2024-03-01T12:00:00Z").as_deref(), Some("2024-03-01T12:00:00+00:00"));
        assert_eq!(dt("2024-03-01 12:00:00").as_deref(), Some("2024-03-01T12:00:00+00:00"));
        assert_eq!(dt("2024-03-01").as_deref(), Some("2024-03-01T00:00:00+00:00"));
        assert_eq!(dt("yesterday"), None);
    }

    #[test]
    fn test_new_records_serialize_without_id() {
        let body = serde_json::to_value(Client {
            name: Some("Depot".into()),
            ..Default::default()
        })
        .unwrap();
        assert!(body.get("id").is_none());
        assert_eq!(body["name"], "Depot");

        let body = serde_json::to_value(Order {
            id: Some(5),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(body["id"], 5);
    }

    #[test]
    fn test_order_decodes_from_backend_json() {
        let order: Order = serde_json::from_str(
            r#"{"id":1,"dt":"2024-03-01T12:00:00Z","client":null,"item":{"id":4}}"#,
        )
        .unwrap();
        assert!(order.client.is_none());
        assert_eq!(order.item.unwrap().id, Some(4));
    }
}
