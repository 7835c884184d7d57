use serde::{Deserialize, Serialize};
use crate::models::{LatLng, TileStyle};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub enable_logging: bool,
    pub map_config: MapConfig,
    pub heatmap_config: HeatmapConfig,
    pub geocoder_config: GeocoderConfig,
    pub weather_config: WeatherConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            enable_logging: true,
            map_config: MapConfig::default(),
            heatmap_config: HeatmapConfig::default(),
            geocoder_config: GeocoderConfig::default(),
            weather_config: WeatherConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    pub default_center_lat: f64,
    pub default_center_lng: f64,
    pub default_zoom: u8,
    pub default_tile_style: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_center_lat: 48.8566,
            default_center_lng: 2.3522,
            default_zoom: 5,
            default_tile_style: "streets".to_string(),
        }
    }
}

impl MapConfig {
    pub fn center(&self) -> LatLng {
        LatLng::new(self.default_center_lat, self.default_center_lng)
    }

    pub fn tile_style(&self) -> TileStyle {
        TileStyle::parse_or_default(&self.default_tile_style)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapConfig {
    pub radius: u32,
    pub blur: u32,
    pub max_zoom: u8,
    /// (stop, css color), ascending
    pub gradient: Vec<(f64, String)>,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            radius: 25,
            blur: 15,
            max_zoom: 10,
            gradient: vec![
                (0.4, "blue".to_string()),
                (0.6, "lime".to_string()),
                (0.8, "yellow".to_string()),
                (1.0, "red".to_string()),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocoderConfig {
    pub placeholder: String,
    pub error_message: String,
    pub suggest_min_length: u32,
    pub suggest_timeout_ms: u32,
    pub query_min_length: u32,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            placeholder: "Search for a location...".to_string(),
            error_message: "Nothing found.".to_string(),
            suggest_min_length: 3,
            suggest_timeout_ms: 250,
            query_min_length: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeatherProviderKind {
    Mock,
    OpenMeteo,
}

impl WeatherProviderKind {
    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "open-meteo" | "openmeteo" => WeatherProviderKind::OpenMeteo,
            _ => WeatherProviderKind::Mock,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    pub provider: WeatherProviderKind,
    /// Artificial latency of the mock provider
    pub delay_ms: u32,
    /// None = fetch once
    pub refresh_interval_secs: Option<u32>,
    /// None = seed from entropy
    pub seed: Option<u64>,
    pub open_meteo_url: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            provider: WeatherProviderKind::Mock,
            delay_ms: 700,
            refresh_interval_secs: None,
            seed: None,
            open_meteo_url: "https://api.open-meteo.com/v1/forecast".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from compile-time environment variables (see build.rs)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            map_config: MapConfig {
                default_center_lat: option_env!("DEFAULT_MAP_CENTER_LAT")
                    .unwrap_or("48.8566").parse().unwrap_or(48.8566),
                default_center_lng: option_env!("DEFAULT_MAP_CENTER_LNG")
                    .unwrap_or("2.3522").parse().unwrap_or(2.3522),
                default_zoom: option_env!("DEFAULT_MAP_ZOOM")
                    .unwrap_or("5").parse().unwrap_or(5),
                default_tile_style: option_env!("DEFAULT_TILE_STYLE")
                    .unwrap_or("streets").to_string(),
            },
            heatmap_config: HeatmapConfig {
                radius: option_env!("HEATMAP_RADIUS")
                    .unwrap_or("25").parse().unwrap_or(25),
                blur: option_env!("HEATMAP_BLUR")
                    .unwrap_or("15").parse().unwrap_or(15),
                max_zoom: option_env!("HEATMAP_MAX_ZOOM")
                    .unwrap_or("10").parse().unwrap_or(10),
                gradient: defaults.heatmap_config.gradient,
            },
            geocoder_config: GeocoderConfig {
                error_message: option_env!("GEOCODER_ERROR_MESSAGE")
                    .unwrap_or("Nothing found.").to_string(),
                ..defaults.geocoder_config
            },
            weather_config: WeatherConfig {
                provider: WeatherProviderKind::parse(option_env!("WEATHER_PROVIDER").unwrap_or("mock")),
                delay_ms: option_env!("WEATHER_DELAY_MS")
                    .unwrap_or("700").parse().unwrap_or(700),
                refresh_interval_secs: option_env!("WEATHER_REFRESH_SECS")
                    .and_then(|s| s.parse().ok())
                    .filter(|secs: &u32| *secs > 0),
                seed: option_env!("WEATHER_SEED").and_then(|s| s.parse().ok()),
                open_meteo_url: option_env!("OPEN_METEO_URL")
                    .unwrap_or("https://api.open-meteo.com/v1/forecast").to_string(),
            },
        }
    }

    /// Whether console logging is enabled
    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

// Global configuration, resolved once
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_initial_view() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.map_config.center(), LatLng::new(48.8566, 2.3522));
        assert_eq!(cfg.map_config.default_zoom, 5);
        assert_eq!(cfg.map_config.tile_style(), TileStyle::Streets);
        assert_eq!(cfg.geocoder_config.error_message, "Nothing found.");
        assert_eq!(cfg.weather_config.provider, WeatherProviderKind::Mock);
    }

    #[test]
    fn test_provider_parse() {
        assert_eq!(WeatherProviderKind::parse("Open-Meteo"), WeatherProviderKind::OpenMeteo);
        assert_eq!(WeatherProviderKind::parse("whatever"), WeatherProviderKind::Mock);
    }
}
