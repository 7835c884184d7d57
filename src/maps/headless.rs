// In-memory viewport used by the tests. Records every call so assertions
// can inspect what the overlays asked for.

use std::collections::BTreeMap;
use crate::models::{LatLng, LatLngBounds, TileSource};
use crate::viewmodels::marker_viewmodel::{MarkerView, RadiusCircle};
use super::{ControlSpec, MapError, OverlayHandle, OverlayLayer, ViewportControl};

pub struct HeadlessViewport {
    pub center: LatLng,
    pub zoom: u8,
    pub tile_source: Option<TileSource>,
    pub layers: BTreeMap<OverlayHandle, OverlayLayer>,
    pub controls: BTreeMap<OverlayHandle, ControlSpec>,
    pub markers: Vec<MarkerView>,
    pub circles: Vec<RadiusCircle>,
    pub fitted: Vec<LatLngBounds>,
    pub destroyed: bool,
    next_handle: u32,
}

impl HeadlessViewport {
    pub fn new(center: LatLng, zoom: u8) -> Self {
        Self {
            center,
            zoom,
            tile_source: None,
            layers: BTreeMap::new(),
            controls: BTreeMap::new(),
            markers: Vec::new(),
            circles: Vec::new(),
            fitted: Vec::new(),
            destroyed: false,
            next_handle: 0,
        }
    }

    fn ensure_alive(&self) -> Result<(), MapError> {
        if self.destroyed {
            Err(MapError::NotReady)
        } else {
            Ok(())
        }
    }

    fn allocate(&mut self) -> OverlayHandle {
        self.next_handle += 1;
        OverlayHandle(self.next_handle)
    }

    pub fn overlay_count(&self) -> usize {
        self.layers.len() + self.controls.len()
    }

    pub fn heatmap_layers(&self) -> Vec<&OverlayLayer> {
        self.layers
            .values()
            .filter(|l| matches!(l, OverlayLayer::Heatmap { .. }))
            .collect()
    }
}

impl ViewportControl for HeadlessViewport {
    fn center(&self) -> LatLng {
        self.center
    }

    fn zoom(&self) -> u8 {
        self.zoom
    }

    fn set_tile_source(&mut self, source: TileSource) -> Result<(), MapError> {
        self.ensure_alive()?;
        self.tile_source = Some(source);
        Ok(())
    }

    fn fit_bounds(&mut self, bounds: LatLngBounds) -> Result<(), MapError> {
        self.ensure_alive()?;
        if !bounds.is_valid() {
            return Err(MapError::InvalidCoordinates);
        }
        self.fitted.push(bounds);
        self.center = bounds.center();
        Ok(())
    }

    fn add_layer(&mut self, layer: OverlayLayer) -> Result<OverlayHandle, MapError> {
        self.ensure_alive()?;
        let handle = self.allocate();
        self.layers.insert(handle, layer);
        Ok(handle)
    }

    fn add_control(&mut self, control: ControlSpec) -> Result<OverlayHandle, MapError> {
        self.ensure_alive()?;
        let handle = self.allocate();
        self.controls.insert(handle, control);
        Ok(handle)
    }

    fn remove(&mut self, handle: OverlayHandle) -> Result<(), MapError> {
        self.ensure_alive()?;
        if self.layers.remove(&handle).is_some() || self.controls.remove(&handle).is_some() {
            Ok(())
        } else {
            Err(MapError::UnknownHandle(handle))
        }
    }

    fn render_markers(&mut self, markers: &[MarkerView], circles: &[RadiusCircle]) -> Result<(), MapError> {
        self.ensure_alive()?;
        self.markers = markers.to_vec();
        self.circles = circles.to_vec();
        Ok(())
    }

    fn destroy(&mut self) {
        self.destroyed = true;
    }
}
