//! Map Scene
//!
//! What the map should show, kept apart from the OpenLayers objects that
//! draw it so page handlers can be exercised without a browser.

use crate::geo::{LonLat, Projected};
use crate::models::Located;

/// View center when nothing is selected
pub const DEFAULT_CENTER: LonLat = LonLat::new(-48.0, -15.8);
pub const DEFAULT_ZOOM: f64 = 12.0;
/// Zoom used when framing a client/item pair
pub const ROUTE_ZOOM: f64 = 14.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Client,
    Item,
}

/// Overlay anchored at a map position
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub kind: MarkerKind,
    pub position: LonLat,
    pub label: String,
    pub icon: Option<String>,
}

impl Marker {
    /// Marker for a record, if it has a usable position
    pub fn for_record(record: &impl Located, kind: MarkerKind) -> Option<Self> {
        Some(Self::at(record, kind, record.coordinate()?))
    }

    pub fn at(record: &impl Located, kind: MarkerKind, position: LonLat) -> Self {
        Self {
            kind,
            position,
            label: record.name().unwrap_or_default().to_string(),
            icon: record.url_icon().map(str::to_string),
        }
    }
}

/// Driving path already transformed into map projection
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePath {
    pub points: Vec<Projected>,
}

impl RoutePath {
    pub fn from_lon_lat(path: &[LonLat]) -> Self {
        Self {
            points: path.iter().map(LonLat::project).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapScene {
    pub center: LonLat,
    pub zoom: f64,
    pub overlays: Vec<Marker>,
    pub route: Option<RoutePath>,
}

impl Default for MapScene {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            overlays: Vec::new(),
            route: None,
        }
    }
}

impl MapScene {
    /// Drop route and overlays and go back to the default view
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn focus(&mut self, center: LonLat, zoom: f64) {
        self.center = center;
        self.zoom = zoom;
    }

    /// Remove the route feature and every overlay, keeping the view
    pub fn clear(&mut self) {
        self.route = None;
        self.overlays.clear();
    }

    pub fn add_marker(&mut self, marker: Marker) {
        self.overlays.push(marker);
    }

    /// Markers for every record with a position; the rest are skipped
    pub fn add_markers<'a, T: Located + 'a>(
        &mut self,
        records: impl IntoIterator<Item = &'a T>,
        kind: MarkerKind,
    ) {
        self.overlays
            .extend(records.into_iter().filter_map(|r| Marker::for_record(r, kind)));
    }

    pub fn set_route(&mut self, path: &[LonLat]) {
        self.route = Some(RoutePath::from_lon_lat(path));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Item;

    fn item(id: u32, lat: Option<&str>, lon: Option<&str>) -> Item {
        Item {
            id: Some(id),
            name: Some(format!("Item {}", id)),
            latitude: lat.map(Into::into),
            longitude: lon.map(Into::into),
            url_icon: Some("panel.png".into()),
            active: Some(1),
        }
    }

    #[test]
    fn test_markers_skip_records_without_position() {
        let items = vec![
            item(1, Some("-15.8"), Some("-47.9")),
            item(2, None, Some("-47.9")),
            item(3, Some("x"), Some("-47.9")),
            item(4, Some("-15.7"), Some("-48.0")),
        ];
        let mut scene = MapScene::default();
        scene.add_markers(&items, MarkerKind::Item);

        let labels: Vec<_> = scene.overlays.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, ["Item 1", "Item 4"]);
        assert_eq!(scene.overlays[1].position, LonLat::new(-48.0, -15.7));
    }

    #[test]
    fn test_reset() {
        let mut scene = MapScene::default();
        scene.focus(LonLat::new(1.0, 2.0), ROUTE_ZOOM);
        scene.set_route(&[LonLat::new(1.0, 2.0)]);
        scene.add_marker(Marker::at(&item(1, None, None), MarkerKind::Client, LonLat::new(1.0, 2.0)));

        scene.reset();
        assert_eq!(scene, MapScene::default());
        assert_eq!(scene.center, LonLat::new(-48.0, -15.8));
        assert_eq!(scene.zoom, 12.0);
    }

    #[test]
    fn test_route_is_projected_in_order() {
        let path = [LonLat::new(-47.9, -15.8), LonLat::new(-48.1, -15.7)];
        let mut scene = MapScene::default();
        scene.set_route(&path);
        let points = &scene.route.as_ref().unwrap().points;
        assert_eq!(points, &vec![path[0].project(), path[1].project()]);
    }
}
