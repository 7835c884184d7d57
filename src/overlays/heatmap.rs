// ============================================================================
// HEATMAP - Density overlay over catalog and user markers
// ============================================================================

use crate::config::HeatmapConfig;
use crate::maps::{MapError, MapOverlay, OverlayHandle, OverlayLayer, ViewportControl};
use crate::models::{LatLng, PointOfInterest, UserMarker};

pub const CATALOG_WEIGHT: f64 = 0.8;
pub const USER_MARKER_WEIGHT: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedPoint {
    pub position: LatLng,
    pub weight: f64,
}

impl WeightedPoint {
    /// `[lat, lng, intensity]`, the tuple leaflet.heat expects
    pub fn to_array(self) -> [f64; 3] {
        [self.position.lat, self.position.lng, self.weight]
    }
}

/// Catalog points first, then user markers, both in their own order.
pub fn weighted_points(catalog: &[PointOfInterest], markers: &[UserMarker]) -> Vec<WeightedPoint> {
    catalog
        .iter()
        .map(|poi| WeightedPoint { position: poi.position, weight: CATALOG_WEIGHT })
        .chain(markers.iter().map(|m| WeightedPoint { position: m.position, weight: USER_MARKER_WEIGHT }))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapOptions {
    pub radius: u32,
    pub blur: u32,
    pub max_zoom: u8,
    pub gradient: Vec<(f64, String)>,
}

impl From<&HeatmapConfig> for HeatmapOptions {
    fn from(cfg: &HeatmapConfig) -> Self {
        Self {
            radius: cfg.radius,
            blur: cfg.blur,
            max_zoom: cfg.max_zoom,
            gradient: cfg.gradient.clone(),
        }
    }
}

/// A heat layer built from a point set captured at construction.
/// Build a new one per activation.
pub struct HeatmapOverlay {
    points: Vec<WeightedPoint>,
    options: HeatmapOptions,
}

impl HeatmapOverlay {
    pub fn new(points: Vec<WeightedPoint>, options: HeatmapOptions) -> Self {
        Self { points, options }
    }
}

impl MapOverlay for HeatmapOverlay {
    fn attach(&mut self, viewport: &mut dyn ViewportControl) -> Result<OverlayHandle, MapError> {
        log::info!("🔥 [HEATMAP] Installing heat layer with {} points", self.points.len());
        viewport.add_layer(OverlayLayer::Heatmap {
            points: self.points.clone(),
            options: self.options.clone(),
        })
    }

    fn detach(&mut self, viewport: &mut dyn ViewportControl, handle: OverlayHandle) -> Result<(), MapError> {
        log::info!("🔥 [HEATMAP] Removing heat layer");
        viewport.remove(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MarkerId;
    use crate::test_support::sample_catalog;

    #[test]
    fn test_weights_per_source() {
        let catalog = sample_catalog();
        let markers = vec![
            UserMarker { id: MarkerId(1), position: LatLng::new(1.0, 1.0), title: "a".into(), note: String::new() },
            UserMarker { id: MarkerId(2), position: LatLng::new(2.0, 2.0), title: "b".into(), note: String::new() },
        ];
        let points = weighted_points(&catalog, &markers);

        assert_eq!(points.len(), catalog.len() + 2);
        let (from_catalog, from_users) = points.split_at(catalog.len());
        assert!(from_catalog.iter().all(|p| p.weight == CATALOG_WEIGHT));
        assert_eq!(from_users[0].position, LatLng::new(1.0, 1.0));
        assert_eq!(from_users[1].weight, USER_MARKER_WEIGHT);
        assert_eq!(from_users[1].to_array(), [2.0, 2.0, 0.5]);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(weighted_points(&[], &[]).is_empty());
    }
}
