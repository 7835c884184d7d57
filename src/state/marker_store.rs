// ============================================================================
// USER MARKER STORE - Ordered collection of visitor markers
// ============================================================================

use crate::models::{LatLng, MarkerId, UserMarker};

/// Title prefix of freshly dropped markers; the 1-based creation index follows.
pub const USER_MARKER_TITLE_PREFIX: &str = "My Marker #";

/// Keeps insertion order. Ids come from a counter that only moves forward,
/// so an id is never handed out twice even after removals.
#[derive(Debug, Clone, Default)]
pub struct UserMarkerStore {
    markers: Vec<UserMarker>,
    next_id: u64,
}

impl UserMarkerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a marker at `position`. The title index is computed from the
    /// count before insertion.
    pub fn add(&mut self, position: LatLng) -> MarkerId {
        self.next_id += 1;
        let id = MarkerId(self.next_id);
        let title = format!("{}{}", USER_MARKER_TITLE_PREFIX, self.markers.len() + 1);
        self.markers.push(UserMarker {
            id,
            position,
            title,
            note: String::new(),
        });
        id
    }

    pub fn get(&self, id: MarkerId) -> Option<&UserMarker> {
        self.markers.iter().find(|m| m.id == id)
    }

    fn get_mut(&mut self, id: MarkerId) -> Option<&mut UserMarker> {
        self.markers.iter_mut().find(|m| m.id == id)
    }

    /// Drag end. Returns false for unknown ids.
    pub fn move_to(&mut self, id: MarkerId, position: LatLng) -> bool {
        match self.get_mut(id) {
            Some(marker) => {
                marker.position = position;
                true
            }
            None => false,
        }
    }

    pub fn set_title(&mut self, id: MarkerId, title: &str) -> bool {
        match self.get_mut(id) {
            Some(marker) => {
                marker.title = title.to_string();
                true
            }
            None => false,
        }
    }

    pub fn set_note(&mut self, id: MarkerId, note: &str) -> bool {
        match self.get_mut(id) {
            Some(marker) => {
                marker.note = note.to_string();
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: MarkerId) -> Option<UserMarker> {
        let index = self.markers.iter().position(|m| m.id == id)?;
        Some(self.markers.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &UserMarker> {
        self.markers.iter()
    }

    pub fn as_slice(&self) -> &[UserMarker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
