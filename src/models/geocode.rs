// ============================================================================
// GEOCODE - Search results coming back from the geocoder control
// ============================================================================

use super::geo::{LatLng, LatLngBounds};

#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    pub center: LatLng,
    pub bounds: LatLngBounds,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeOutcome {
    Found(GeocodeResult),
    NoMatch { query: String },
}
