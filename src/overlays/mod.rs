// ============================================================================
// OVERLAYS - Everything attached on top of the base tiles
// ============================================================================

pub mod heatmap;
pub mod geocoder;
pub mod weather_card;
pub mod mode_control;

pub use heatmap::{HeatmapOptions, HeatmapOverlay, WeightedPoint};
pub use geocoder::{GeocoderControl, SearchResultMarker};
pub use weather_card::WeatherCard;
pub use mode_control::{ModeControl, ZoomControl};
