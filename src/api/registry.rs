//! Registry Clients
//!
//! CRUD wrappers over one REST collection per entity type.

use async_trait::async_trait;
use serde_json::Value;
use std::marker::PhantomData;

use super::success_body;
use crate::error::{ApiError, ApiResult};
use crate::models::{Entity, IdPlacement};

/// CRUD operations for one entity collection
#[async_trait(?Send)]
pub trait Registry<T: Entity> {
    /// Fetch the whole collection
    async fn list(&self) -> ApiResult<Vec<T>>;

    async fn create(&self, entity: &T) -> ApiResult<()>;

    /// Replace the record carrying `entity`'s id
    async fn update(&self, entity: &T) -> ApiResult<()>;

    /// Remove the record carrying `entity`'s id
    async fn delete(&self, entity: &T) -> ApiResult<()>;
}

/// Registry backed by the HTTP API
pub struct RestRegistry<T> {
    http: reqwest::Client,
    api_base: String,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> RestRegistry<T> {
    pub fn new(http: reqwest::Client, api_base: impl Into<String>) -> Self {
        Self {
            http,
            api_base: api_base.into(),
            _entity: PhantomData,
        }
    }

    fn collection_url(&self) -> String {
        collection_url(&self.api_base, T::COLLECTION)
    }

    fn record_url(&self, entity: &T) -> ApiResult<String> {
        let id = entity
            .id()
            .ok_or(ApiError::MissingId { entity: T::LABEL })?;
        Ok(record_url(&self.api_base, T::COLLECTION, T::ID_PLACEMENT, id))
    }
}

pub(crate) fn collection_url(api_base: &str, collection: &str) -> String {
    format!("{}/{}", api_base, collection)
}

pub(crate) fn record_url(api_base: &str, collection: &str, placement: IdPlacement, id: u32) -> String {
    match placement {
        IdPlacement::Query => format!("{}/{}?id={}", api_base, collection, id),
        IdPlacement::Path => format!("{}/{}/{}", api_base, collection, id),
    }
}

/// Field-copy every element of a JSON array body
pub(crate) fn decode_collection<T: Entity>(body: &str) -> ApiResult<Vec<T>> {
    let documents: Vec<Value> = serde_json::from_str(body)?;
    Ok(documents.iter().map(T::transform).collect())
}

#[async_trait(?Send)]
impl<T: Entity> Registry<T> for RestRegistry<T> {
    async fn list(&self) -> ApiResult<Vec<T>> {
        let url = self.collection_url();
        log::debug!("GET {}", url);
        let response = self.http.get(&url).send().await?;
        let body = success_body(response, &url).await?;
        decode_collection(&body)
    }

    async fn create(&self, entity: &T) -> ApiResult<()> {
        let url = self.collection_url();
        log::debug!("POST {}", url);
        let response = self.http.post(&url).json(entity).send().await?;
        success_body(response, &url).await.map(|_| ())
    }

    async fn update(&self, entity: &T) -> ApiResult<()> {
        let url = self.record_url(entity)?;
        log::debug!("PUT {}", url);
        let response = self.http.put(&url).json(entity).send().await?;
        success_body(response, &url).await.map(|_| ())
    }

    async fn delete(&self, entity: &T) -> ApiResult<()> {
        let url = self.record_url(entity)?;
        log::debug!("DELETE {}", url);
        let response = self.http.delete(&url).send().await?;
        success_body(response, &url).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Client, Item, Order};

    const API: &str = "http://api.test";

    #[test]
    fn test_clients_use_query_id() {
        assert_eq!(
            record_url(API, Client::COLLECTION, Client::ID_PLACEMENT, 7),
            "http://api.test/clients?id=7"
        );
    }

    #[test]
    fn test_items_and_orders_use_path_id() {
        assert_eq!(
            record_url(API, Item::COLLECTION, Item::ID_PLACEMENT, 4),
            "http://api.test/items/4"
        );
        assert_eq!(
            record_url(API, Order::COLLECTION, Order::ID_PLACEMENT, 9),
            "http://api.test/orders/9"
        );
    }

    #[test]
    fn test_collection_url() {
        assert_eq!(collection_url(API, Order::COLLECTION), "http://api.test/orders");
    }

    #[test]
    fn test_decode_collection_is_lenient() {
        let clients: Vec<Client> = decode_collection(
            r#"[{"id": 1, "name": "A", "latitude": -15.8, "longitude": "-47.9", "extra": [1]}, {}]"#,
        )
        .unwrap();
        assert_eq!(clients.len(), 2);
        assert_eq!(clients[0].latitude.as_deref(), Some("-15.8"));
        assert_eq!(clients[1], Client::default());
    }

    #[test]
    fn test_decode_collection_rejects_non_array() {
        let result = decode_collection::<Order>(r#"{"error": "nope"}"#);
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_record_without_id_is_rejected() {
        let registry = RestRegistry::<Item>::new(reqwest::Client::new(), API);
        let err = registry.record_url(&Item::default()).unwrap_err();
        assert!(matches!(err, ApiError::MissingId { entity: "Item" }));
    }
}
