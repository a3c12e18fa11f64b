//! OpenLayers Bridge
//!
//! Draws a [`MapScene`] with the global `ol` build loaded by index.html.
//! Coordinates cross the boundary already in EPSG:3857.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::scene::{MapScene, Marker, MarkerKind};

const MARKER_BASE: &str = "assets/marker.png";
const ROUTE_COLOR: &str = "yellow";
const ROUTE_WIDTH: f64 = 5.0;

/// Characters escaped in icon file names; `/` stays so icons may live in subfolders
const ASSET_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[wasm_bindgen(inline_js = "
export function route_map_mount(target, x, y, zoom) {
    const source = new ol.source.Vector();
    const map = new ol.Map({
        target: target,
        layers: [
            new ol.layer.Tile({ source: new ol.source.OSM() }),
            new ol.layer.Vector({ source: source }),
        ],
        view: new ol.View({ center: [x, y], zoom: zoom }),
    });
    return { map: map, source: source };
}

export function route_map_set_view(handle, x, y, zoom) {
    const view = handle.map.getView();
    view.setCenter([x, y]);
    view.setZoom(zoom);
}

export function route_map_clear_overlays(handle) {
    handle.map.getOverlays().clear();
}

export function route_map_add_marker(handle, spec) {
    const element = document.createElement('div');
    element.className = 'custom-marker ' + spec.class_name;
    element.title = spec.label;

    const wrapper = document.createElement('div');
    wrapper.className = 'marker-wrapper';
    const base = document.createElement('img');
    base.src = spec.base_url;
    base.className = 'marker-base';
    wrapper.appendChild(base);
    if (spec.icon_url) {
        const icon = document.createElement('img');
        icon.src = spec.icon_url;
        icon.className = 'marker-icon';
        wrapper.appendChild(icon);
    }
    element.appendChild(wrapper);

    handle.map.addOverlay(new ol.Overlay({
        element: element,
        position: [spec.x, spec.y],
        positioning: 'bottom-center',
        stopEvent: false,
    }));
}

export function route_map_set_route(handle, coords, color, width) {
    handle.source.clear();
    if (coords.length < 2) {
        return;
    }
    const points = [];
    for (let i = 0; i + 1 < coords.length; i += 2) {
        points.push([coords[i], coords[i + 1]]);
    }
    const feature = new ol.Feature({ geometry: new ol.geom.LineString(points) });
    feature.setStyle(new ol.style.Style({
        stroke: new ol.style.Stroke({ color: color, width: width }),
    }));
    handle.source.addFeature(feature);
}
")]
extern "C" {
    #[wasm_bindgen(catch)]
    fn route_map_mount(target: &web_sys::HtmlElement, x: f64, y: f64, zoom: f64) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    fn route_map_set_view(handle: &JsValue, x: f64, y: f64, zoom: f64) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    fn route_map_clear_overlays(handle: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    fn route_map_add_marker(handle: &JsValue, spec: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    fn route_map_set_route(handle: &JsValue, coords: &[f64], color: &str, width: f64) -> Result<(), JsValue>;
}

/// Marker description handed to the shim
#[derive(Serialize)]
struct MarkerSpec<'a> {
    x: f64,
    y: f64,
    label: &'a str,
    class_name: &'static str,
    base_url: &'static str,
    icon_url: Option<String>,
}

/// Asset path of a record icon
pub fn icon_url(icon: &str) -> String {
    let icon = icon.trim().trim_start_matches('/');
    format!("assets/{}", utf8_percent_encode(icon, ASSET_ENCODE_SET))
}

fn describe(err: JsValue) -> String {
    err.dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{:?}", err))
}

/// A live OpenLayers map with one vector layer for the route
pub struct OlMap {
    handle: JsValue,
}

impl OlMap {
    pub fn mount(target: &web_sys::HtmlElement, scene: &MapScene) -> Result<Self, String> {
        let center = scene.center.project();
        let handle = route_map_mount(target, center.x, center.y, scene.zoom).map_err(describe)?;
        let map = Self { handle };
        map.render(scene)?;
        Ok(map)
    }

    /// Replace view, overlays and route with the scene's
    pub fn render(&self, scene: &MapScene) -> Result<(), String> {
        let center = scene.center.project();
        route_map_set_view(&self.handle, center.x, center.y, scene.zoom).map_err(describe)?;

        route_map_clear_overlays(&self.handle).map_err(describe)?;
        for marker in &scene.overlays {
            self.add_marker(marker)?;
        }

        let coords: Vec<f64> = scene
            .route
            .iter()
            .flat_map(|route| route.points.iter())
            .flat_map(|p| [p.x, p.y])
            .collect();
        route_map_set_route(&self.handle, &coords, ROUTE_COLOR, ROUTE_WIDTH).map_err(describe)
    }

    fn add_marker(&self, marker: &Marker) -> Result<(), String> {
        let position = marker.position.project();
        let spec = MarkerSpec {
            x: position.x,
            y: position.y,
            label: &marker.label,
            class_name: match marker.kind {
                MarkerKind::Client => "client-marker",
                MarkerKind::Item => "item-marker",
            },
            base_url: MARKER_BASE,
            icon_url: marker.icon.as_deref().filter(|i| !i.trim().is_empty()).map(icon_url),
        };
        let spec = serde_wasm_bindgen::to_value(&spec).map_err(|e| e.to_string())?;
        route_map_add_marker(&self.handle, spec).map_err(describe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_url() {
        assert_eq!(icon_url("truck.png"), "assets/truck.png");
        assert_eq!(icon_url("my icon#2.png"), "assets/my%20icon%232.png");
        assert_eq!(icon_url("/icons/panel.png"), "assets/icons/panel.png");
    }
}
