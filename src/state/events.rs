// ============================================================================
// MAP EVENTS - Everything the UI can report to the view model
// ============================================================================

use crate::models::{GeocodeOutcome, LatLng, MarkerId, WeatherReport};

#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    ViewportClicked(LatLng),
    ViewportMoved { center: LatLng, zoom: u8 },
    /// Marker click or its popup "More Info" button
    CatalogMarkerActivated(usize),
    DetailPanelClosed,
    ToggleAddMarkerMode,
    ToggleHeatmap,
    /// Raw `<select>` value
    TileStyleSelected(String),
    UserMarkerDragged { id: MarkerId, position: LatLng },
    UserMarkerTitleEdited { id: MarkerId, title: String },
    UserMarkerNoteEdited { id: MarkerId, note: String },
    UserMarkerRemoved(MarkerId),
    GeocodeFinished(GeocodeOutcome),
    WeatherLoaded(WeatherReport),
}
