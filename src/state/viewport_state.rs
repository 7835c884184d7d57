// ============================================================================
// VIEWPORT STATE - Center, zoom and tile style
// ============================================================================

use crate::models::{LatLng, TileStyle};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    pub center: LatLng,
    pub zoom: u8,
    pub tile_style: TileStyle,
}

impl ViewportState {
    pub fn new(center: LatLng, zoom: u8, tile_style: TileStyle) -> Self {
        Self { center, zoom, tile_style }
    }

    /// Pan/zoom reported by the viewport. Invalid centers are ignored.
    pub fn moved(&mut self, center: LatLng, zoom: u8) {
        if center.is_valid() {
            self.center = center;
        }
        self.zoom = zoom;
    }

    /// Returns true if the style actually changed. Center and zoom are untouched.
    pub fn set_tile_style(&mut self, style: TileStyle) -> bool {
        let changed = self.tile_style != style;
        self.tile_style = style;
        changed
    }
}
