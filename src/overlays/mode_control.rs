use crate::maps::{ControlKind, ControlPosition, ControlSpec, MapError, MapOverlay, OverlayHandle, ViewportControl};

/// Top-right button pair (📍 add markers, 🔥 heatmap). Rebuilt whenever
/// either flag changes so the `active` classes follow the state.
pub struct ModeControl {
    pub add_marker_active: bool,
    pub heatmap_active: bool,
}

impl MapOverlay for ModeControl {
    fn attach(&mut self, viewport: &mut dyn ViewportControl) -> Result<OverlayHandle, MapError> {
        viewport.add_control(ControlSpec {
            position: ControlPosition::TopRight,
            kind: ControlKind::ModeButtons {
                add_marker_active: self.add_marker_active,
                heatmap_active: self.heatmap_active,
            },
        })
    }
}

/// Zoom buttons, moved to the bottom-right corner.
pub struct ZoomControl;

impl MapOverlay for ZoomControl {
    fn attach(&mut self, viewport: &mut dyn ViewportControl) -> Result<OverlayHandle, MapError> {
        viewport.add_control(ControlSpec {
            position: ControlPosition::BottomRight,
            kind: ControlKind::Zoom,
        })
    }
}
