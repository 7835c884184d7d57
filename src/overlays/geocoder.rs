// ============================================================================
// GEOCODER - Search control and the marker dropped on a result
// ============================================================================

use crate::config::GeocoderConfig;
use crate::maps::{
    ControlKind, ControlPosition, ControlSpec, EntranceAnimation, GeocoderOptions, MapError, MapOverlay,
    OverlayHandle, OverlayLayer, ViewportControl,
};
use crate::models::LatLng;

/// Search box (top-left). The lookup itself is done by the map library plugin;
/// results come back as `MapEvent::GeocodeFinished`.
pub struct GeocoderControl {
    options: GeocoderOptions,
}

impl GeocoderControl {
    pub fn new(config: &GeocoderConfig) -> Self {
        Self {
            options: GeocoderOptions {
                placeholder: config.placeholder.clone(),
                error_message: config.error_message.clone(),
                suggest_min_length: config.suggest_min_length,
                suggest_timeout_ms: config.suggest_timeout_ms,
                query_min_length: config.query_min_length,
            },
        }
    }
}

impl MapOverlay for GeocoderControl {
    fn attach(&mut self, viewport: &mut dyn ViewportControl) -> Result<OverlayHandle, MapError> {
        viewport.add_control(ControlSpec {
            position: ControlPosition::TopLeft,
            kind: ControlKind::Geocoder(self.options.clone()),
        })
    }
}

/// Marker placed at a geocoding result, labelled with the result name.
pub struct SearchResultMarker {
    position: LatLng,
    label: String,
}

impl SearchResultMarker {
    pub fn new(position: LatLng, label: impl Into<String>) -> Self {
        Self { position, label: label.into() }
    }
}

impl MapOverlay for SearchResultMarker {
    fn attach(&mut self, viewport: &mut dyn ViewportControl) -> Result<OverlayHandle, MapError> {
        if !self.position.is_valid() {
            return Err(MapError::InvalidCoordinates);
        }
        viewport.add_layer(OverlayLayer::TransientMarker {
            position: self.position,
            label: self.label.clone(),
            entrance: EntranceAnimation::Bounce,
        })
    }
}
