// Map abstraction: the viewport seam overlays talk through, plus the
// platform implementation behind it.

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(test)]
pub mod headless;

use crate::models::{LatLng, LatLngBounds, TileSource, WeatherReport};
use crate::overlays::heatmap::{HeatmapOptions, WeightedPoint};
use crate::viewmodels::marker_viewmodel::{MarkerView, RadiusCircle};

/// Identifies a layer or control installed on the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ControlPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlPosition::TopLeft => "topleft",
            ControlPosition::TopRight => "topright",
            ControlPosition::BottomLeft => "bottomleft",
            ControlPosition::BottomRight => "bottomright",
        }
    }
}

/// Entrance animation of newly placed transient markers. Timing is cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntranceAnimation {
    None,
    Bounce,
}

impl EntranceAnimation {
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            EntranceAnimation::None => None,
            EntranceAnimation::Bounce => Some("marker-enter-bounce"),
        }
    }
}

/// Layers that can be stacked on top of the base tiles
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayLayer {
    Heatmap {
        points: Vec<WeightedPoint>,
        options: HeatmapOptions,
    },
    /// Search result marker, popup opened on insertion
    TransientMarker {
        position: LatLng,
        label: String,
        entrance: EntranceAnimation,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeocoderOptions {
    pub placeholder: String,
    pub error_message: String,
    pub suggest_min_length: u32,
    pub suggest_timeout_ms: u32,
    pub query_min_length: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ControlKind {
    Geocoder(GeocoderOptions),
    Weather(WeatherReport),
    ModeButtons { add_marker_active: bool, heatmap_active: bool },
    Zoom,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ControlSpec {
    pub position: ControlPosition,
    pub kind: ControlKind,
}

/// Operations overlays may perform on the viewport. Passed explicitly to
/// whoever needs it; there is no global map handle.
pub trait ViewportControl {
    fn center(&self) -> LatLng;

    fn zoom(&self) -> u8;

    /// Swap the base tiles. Must not move the viewport.
    fn set_tile_source(&mut self, source: TileSource) -> Result<(), MapError>;

    fn fit_bounds(&mut self, bounds: LatLngBounds) -> Result<(), MapError>;

    fn add_layer(&mut self, layer: OverlayLayer) -> Result<OverlayHandle, MapError>;

    fn add_control(&mut self, control: ControlSpec) -> Result<OverlayHandle, MapError>;

    /// Works for both layers and controls
    fn remove(&mut self, handle: OverlayHandle) -> Result<(), MapError>;

    /// Replace the whole marker layer (catalog + user markers + radius circles)
    fn render_markers(&mut self, markers: &[MarkerView], circles: &[RadiusCircle]) -> Result<(), MapError>;

    /// Container size changed (e.g. the detail panel opened)
    fn refresh_size(&mut self) {}

    /// Tear the map down. Further calls fail with `NotReady`.
    fn destroy(&mut self);
}

/// Capability shared by every overlay: install on a viewport, get a handle
/// back, and remove by handle.
pub trait MapOverlay {
    fn attach(&mut self, viewport: &mut dyn ViewportControl) -> Result<OverlayHandle, MapError>;

    fn detach(&mut self, viewport: &mut dyn ViewportControl, handle: OverlayHandle) -> Result<(), MapError> {
        viewport.remove(handle)
    }
}

/// Holds at most one attached overlay of a kind. Mounting replaces the
/// previous one.
pub struct OverlaySlot<O: MapOverlay> {
    mounted: Option<(O, OverlayHandle)>,
}

impl<O: MapOverlay> Default for OverlaySlot<O> {
    fn default() -> Self {
        Self { mounted: None }
    }
}

impl<O: MapOverlay> OverlaySlot<O> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&mut self, mut overlay: O, viewport: &mut dyn ViewportControl) -> Result<OverlayHandle, MapError> {
        self.unmount(viewport)?;
        let handle = overlay.attach(viewport)?;
        self.mounted = Some((overlay, handle));
        Ok(handle)
    }

    /// On a failed detach the overlay stays in the slot.
    pub fn unmount(&mut self, viewport: &mut dyn ViewportControl) -> Result<(), MapError> {
        if let Some((mut overlay, handle)) = self.mounted.take() {
            if let Err(e) = overlay.detach(viewport, handle) {
                self.mounted = Some((overlay, handle));
                return Err(e);
            }
        }
        Ok(())
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }
}

/// Map error
#[derive(Debug, Clone, PartialEq)]
pub enum MapError {
    NotReady,
    InvalidCoordinates,
    UnknownHandle(OverlayHandle),
    Bridge(String),
    NetworkError(String),
    Unknown(String),
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapError::NotReady => write!(f, "Map is not ready"),
            MapError::InvalidCoordinates => write!(f, "Invalid coordinates"),
            MapError::UnknownHandle(h) => write!(f, "Unknown overlay handle {}", h.0),
            MapError::Bridge(msg) => write!(f, "Map library error: {}", msg),
            MapError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            MapError::Unknown(msg) => write!(f, "Unknown error: {}", msg),
        }
    }
}

impl std::error::Error for MapError {}

impl From<wasm_bindgen::JsValue> for MapError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        MapError::Bridge(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maps::headless::HeadlessViewport;
    use crate::overlays::ZoomControl;

    #[test]
    fn test_slot_replaces_previous_overlay() {
        let mut vp = HeadlessViewport::new(LatLng::new(0.0, 0.0), 3);
        let mut slot = OverlaySlot::new();
        let first = slot.mount(ZoomControl, &mut vp).unwrap();
        let second = slot.mount(ZoomControl, &mut vp).unwrap();
        assert_ne!(first, second);
        assert_eq!(vp.controls.keys().copied().collect::<Vec<_>>(), vec![second]);
    }

    #[test]
    fn test_failed_detach_keeps_overlay_in_slot() {
        let mut vp = HeadlessViewport::new(LatLng::new(0.0, 0.0), 3);
        let mut slot = OverlaySlot::new();
        let first = slot.mount(ZoomControl, &mut vp).unwrap();

        vp.destroyed = true;
        assert_eq!(slot.mount(ZoomControl, &mut vp), Err(MapError::NotReady));
        assert!(slot.is_mounted());
        assert_eq!(vp.controls.len(), 1);

        // once the viewport answers again the original control can still be removed
        vp.destroyed = false;
        slot.unmount(&mut vp).unwrap();
        assert!(!vp.controls.contains_key(&first));
        assert!(!slot.is_mounted());
    }
}
