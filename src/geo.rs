//! Geographic Helpers
//!
//! Lon/lat pairs and the Web Mercator projection used by the map.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Earth radius used by EPSG:3857
const RADIUS: f64 = 6_378_137.0;
const HALF_SIZE: f64 = PI * RADIUS;

/// Geographic position in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Parse text coordinates as stored on clients and items
    pub fn parse(longitude: &str, latitude: &str) -> Option<Self> {
        let lon = longitude.trim().parse::<f64>().ok()?;
        let lat = latitude.trim().parse::<f64>().ok()?;
        if lon.is_finite() && lat.is_finite() {
            Some(Self { lon, lat })
        } else {
            None
        }
    }

    pub fn midpoint(&self, other: &LonLat) -> LonLat {
        LonLat {
            lon: (self.lon + other.lon) / 2.0,
            lat: (self.lat + other.lat) / 2.0,
        }
    }

    pub fn project(&self) -> Projected {
        from_lon_lat(*self)
    }
}

/// Map coordinate in EPSG:3857 meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projected {
    pub x: f64,
    pub y: f64,
}

/// Same transform as OpenLayers `fromLonLat` with the default projection.
pub fn from_lon_lat(coord: LonLat) -> Projected {
    let x = RADIUS * PI * coord.lon / 180.0;
    let y = RADIUS * (PI * (coord.lat + 90.0) / 360.0).tan().ln();
    Projected {
        x,
        y: y.clamp(-HALF_SIZE, HALF_SIZE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_origin_projects_to_origin() {
        let p = from_lon_lat(LonLat::new(0.0, 0.0));
        assert!(close(p.x, 0.0));
        assert!(close(p.y, 0.0));
    }

    #[test]
    fn test_antimeridian_is_half_world() {
        let p = from_lon_lat(LonLat::new(180.0, 0.0));
        assert!(close(p.x, HALF_SIZE));
    }

    #[test]
    fn test_known_point() {
        // Brasília, checked against OpenLayers
        let p = from_lon_lat(LonLat::new(-48.0, -15.8));
        assert!((p.x - -5_343_335.558_077).abs() < 1e-3);
        assert!((p.y - -1_781_573.182_190).abs() < 1e-3);
    }

    #[test]
    fn test_poles_are_clamped() {
        let north = from_lon_lat(LonLat::new(0.0, 90.0));
        let south = from_lon_lat(LonLat::new(0.0, -90.0));
        assert!(close(north.y, HALF_SIZE));
        assert!(close(south.y, -HALF_SIZE));
    }

    #[test]
    fn test_midpoint() {
        let a = LonLat::new(-48.0, -15.0);
        let b = LonLat::new(-47.0, -16.0);
        assert_eq!(a.midpoint(&b), LonLat::new(-47.5, -15.5));
    }

    #[test]
    fn test_parse() {
        assert_eq!(LonLat::parse(" -47.9 ", "-15.8"), Some(LonLat::new(-47.9, -15.8)));
        assert_eq!(LonLat::parse("", "-15.8"), None);
        assert_eq!(LonLat::parse("abc", "1"), None);
        assert_eq!(LonLat::parse("NaN", "1"), None);
    }
}
