//! Route Provider
//!
//! Driving directions from an OSRM-compatible service.

use async_trait::async_trait;
use serde::Deserialize;

use super::success_body;
use crate::error::{ApiError, ApiResult};
use crate::geo::LonLat;

/// Computes a driving path between two positions
#[async_trait(?Send)]
pub trait RouteProvider {
    /// Path vertices from `start` to `end`, in travel order
    async fn route(&self, start: LonLat, end: LonLat) -> ApiResult<Vec<LonLat>>;
}

pub struct OsrmRouteProvider {
    http: reqwest::Client,
    routing_base: String,
}

impl OsrmRouteProvider {
    pub fn new(http: reqwest::Client, routing_base: impl Into<String>) -> Self {
        Self {
            http,
            routing_base: routing_base.into(),
        }
    }
}

#[derive(Deserialize)]
struct RouteResponse {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    routes: Vec<Route>,
}

#[derive(Deserialize)]
struct Route {
    geometry: Geometry,
}

#[derive(Deserialize)]
struct Geometry {
    coordinates: Vec<[f64; 2]>,
}

pub(crate) fn route_url(routing_base: &str, start: LonLat, end: LonLat) -> String {
    format!(
        "{}/route/v1/driving/{},{};{},{}?overview=full&geometries=geojson",
        routing_base, start.lon, start.lat, end.lon, end.lat
    )
}

/// First route of a GeoJSON response
pub(crate) fn parse_route(body: &str) -> ApiResult<Vec<LonLat>> {
    let response: RouteResponse = serde_json::from_str(body)?;
    if let Some(code) = response.code.filter(|c| c != "Ok") {
        return Err(ApiError::Routing(code));
    }
    let route = response.routes.into_iter().next().ok_or(ApiError::NoRoute)?;
    Ok(route
        .geometry
        .coordinates
        .into_iter()
        .map(|[lon, lat]| LonLat::new(lon, lat))
        .collect())
}

#[async_trait(?Send)]
impl RouteProvider for OsrmRouteProvider {
    async fn route(&self, start: LonLat, end: LonLat) -> ApiResult<Vec<LonLat>> {
        let url = route_url(&self.routing_base, start, end);
        log::debug!("GET {}", url);
        let response = self.http.get(&url).send().await?;
        let body = success_body(response, &url).await?;
        parse_route(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_url_is_lon_lat_ordered() {
        let url = route_url(
            "https://router.test",
            LonLat::new(-47.9, -15.8),
            LonLat::new(-48.1, -15.7),
        );
        assert_eq!(
            url,
            "https://router.test/route/v1/driving/-47.9,-15.8;-48.1,-15.7?overview=full&geometries=geojson"
        );
    }

    #[test]
    fn test_parse_first_route() {
        let body = r#"{
            "code": "Ok",
            "routes": [
                {"geometry": {"coordinates": [[-47.9, -15.8], [-48.0, -15.75], [-48.1, -15.7]]}},
                {"geometry": {"coordinates": [[0.0, 0.0]]}}
            ]
        }"#;
        let path = parse_route(body).unwrap();
        assert_eq!(
            path,
            vec![
                LonLat::new(-47.9, -15.8),
                LonLat::new(-48.0, -15.75),
                LonLat::new(-48.1, -15.7)
            ]
        );
    }

    #[test]
    fn test_empty_routes() {
        assert!(matches!(parse_route(r#"{"routes": []}"#), Err(ApiError::NoRoute)));
    }

    #[test]
    fn test_error_code() {
        let err = parse_route(r#"{"code": "NoSegment", "routes": []}"#).unwrap_err();
        assert!(matches!(err, ApiError::Routing(code) if code == "NoSegment"));
    }

    #[test]
    fn test_garbage_body() {
        assert!(matches!(parse_route("<html>"), Err(ApiError::Decode(_))));
    }
}
