// ============================================================================
// USER MARKER - Markers dropped by the visitor (mutable)
// ============================================================================

use std::fmt;
use serde::{Deserialize, Serialize};
use super::geo::LatLng;
use super::poi::Category;

/// Opaque marker identity, assigned once by the marker store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarkerId(pub u64);

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserMarker {
    pub id: MarkerId,
    pub position: LatLng,
    pub title: String,
    pub note: String,
}

impl UserMarker {
    pub fn category(&self) -> Category {
        Category::User
    }
}
