// ============================================================================
// POINT OF INTEREST - Curated catalog entries (immutable)
// ============================================================================

use serde::{Deserialize, Serialize};
use super::geo::LatLng;

/// Marker category. Catalog entries use the first four; `User` is reserved for
/// markers the visitor drops. Anything else deserializes to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Landmark,
    Food,
    Activity,
    Hotel,
    User,
    #[serde(other)]
    Unknown,
}

/// Circle outline used when an entry declares no color of its own.
pub const DEFAULT_RADIUS_COLOR: &str = "#3388ff";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointOfInterest {
    pub name: String,
    pub position: LatLng,
    pub description: String,
    pub category: Category,
    /// Meters
    #[serde(default)]
    pub display_radius: Option<f64>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub facts: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl PointOfInterest {
    pub fn radius_color(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_RADIUS_COLOR)
    }

    /// Radius only counts when it is a positive, finite distance.
    pub fn has_display_radius(&self) -> bool {
        matches!(self.display_radius, Some(r) if r.is_finite() && r > 0.0)
    }
}
