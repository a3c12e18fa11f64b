//! Build-time Configuration
//!
//! Endpoints are baked in when the bundle is built, e.g.
//! `ROUTE_MAP_API=https://api.example.com trunk build --release`.

use log::LevelFilter;

const DEFAULT_API: &str = "http://localhost:3000";
const DEFAULT_ROUTING: &str = "https://router.project-osrm.org";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Root of the CRUD backend
    pub api_base: String,
    /// Root of the OSRM-compatible routing service
    pub routing_base: String,
    pub log_level: LevelFilter,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("ROUTE_MAP_API"),
            option_env!("ROUTE_MAP_ROUTING"),
            option_env!("ROUTE_MAP_LOG"),
        )
    }

    fn from_values(api: Option<&str>, routing: Option<&str>, log: Option<&str>) -> Self {
        Self {
            api_base: base_url(api, DEFAULT_API),
            routing_base: base_url(routing, DEFAULT_ROUTING),
            log_level: log
                .and_then(|l| l.trim().parse().ok())
                .unwrap_or(LevelFilter::Info),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None, None, None)
    }
}

fn base_url(value: Option<&str>, fallback: &str) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(fallback)
        .trim_end_matches('/')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_base, "http://localhost:3000");
        assert_eq!(config.routing_base, "https://router.project-osrm.org");
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_overrides_are_trimmed() {
        let config = AppConfig::from_values(Some("https://api.test/v1/ "), Some(""), Some("debug"));
        assert_eq!(config.api_base, "https://api.test/v1");
        assert_eq!(config.routing_base, DEFAULT_ROUTING);
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_unknown_level_falls_back() {
        let config = AppConfig::from_values(None, None, Some("loud"));
        assert_eq!(config.log_level, LevelFilter::Info);
    }
}
