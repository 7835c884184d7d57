// ============================================================================
// MARKER VIEWMODEL - Prepares what the marker layer draws
// ============================================================================
// Data preparation only; drawing happens behind `ViewportControl`.
// ============================================================================

use crate::models::{LatLng, MarkerId, PointOfInterest, UserMarker};
use crate::utils::constants::marker_icon_url;

/// Which entity a drawn marker stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// Index into the catalog
    Catalog(usize),
    User(MarkerId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerView {
    pub kind: MarkerKind,
    pub position: LatLng,
    pub icon_url: &'static str,
    pub draggable: bool,
    /// Catalog: name. User: editable title.
    pub title: String,
    /// Catalog: description. User: editable note.
    pub body: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadiusCircle {
    pub center: LatLng,
    pub radius_m: f64,
    pub color: String,
    pub fill_opacity: f64,
}

const RADIUS_FILL_OPACITY: f64 = 0.1;

pub struct MarkerViewModel;

impl MarkerViewModel {
    /// One view per catalog entry, whatever its category.
    pub fn catalog_markers(catalog: &[PointOfInterest]) -> Vec<MarkerView> {
        catalog
            .iter()
            .enumerate()
            .map(|(index, poi)| MarkerView {
                kind: MarkerKind::Catalog(index),
                position: poi.position,
                icon_url: marker_icon_url(poi.category),
                draggable: false,
                title: poi.name.clone(),
                body: poi.description.clone(),
            })
            .collect()
    }

    pub fn user_markers(markers: &[UserMarker]) -> Vec<MarkerView> {
        markers
            .iter()
            .map(|m| MarkerView {
                kind: MarkerKind::User(m.id),
                position: m.position,
                icon_url: marker_icon_url(m.category()),
                draggable: true,
                title: m.title.clone(),
                body: m.note.clone(),
            })
            .collect()
    }

    pub fn all_markers(catalog: &[PointOfInterest], markers: &[UserMarker]) -> Vec<MarkerView> {
        let mut views = Self::catalog_markers(catalog);
        views.extend(Self::user_markers(markers));
        views
    }

    /// Only entries declaring a positive radius get a circle.
    pub fn radius_circles(catalog: &[PointOfInterest]) -> Vec<RadiusCircle> {
        catalog
            .iter()
            .filter(|poi| poi.has_display_radius())
            .filter_map(|poi| {
                poi.display_radius.map(|radius_m| RadiusCircle {
                    center: poi.position,
                    radius_m,
                    color: poi.radius_color().to_string(),
                    fill_opacity: RADIUS_FILL_OPACITY,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use crate::test_support::sample_catalog;
    use crate::utils::constants::DEFAULT_MARKER_ICON;

    #[test]
    fn test_one_marker_per_entry_and_circles_for_radius() {
        let catalog = sample_catalog();
        let views = MarkerViewModel::catalog_markers(&catalog);
        assert_eq!(views.len(), catalog.len());
        assert!(views.iter().all(|v| !v.draggable));

        let circles = MarkerViewModel::radius_circles(&catalog);
        let expected = catalog.iter().filter(|p| p.display_radius.is_some()).count();
        assert_eq!(circles.len(), expected);
        assert!(circles.iter().all(|c| c.fill_opacity == 0.1));
    }

    #[test]
    fn test_unknown_category_uses_default_icon() {
        let mut catalog = sample_catalog();
        catalog[1].category = Category::Unknown;
        let views = MarkerViewModel::catalog_markers(&catalog);
        assert_eq!(views.len(), catalog.len());
        assert_eq!(views[1].icon_url, DEFAULT_MARKER_ICON);
    }

    #[test]
    fn test_user_markers_are_draggable_with_user_icon() {
        let markers = vec![UserMarker {
            id: MarkerId(4),
            position: LatLng::new(3.0, 4.0),
            title: "My Marker #1".into(),
            note: "note".into(),
        }];
        let views = MarkerViewModel::user_markers(&markers);
        assert_eq!(views[0].kind, MarkerKind::User(MarkerId(4)));
        assert!(views[0].draggable);
        assert_eq!(views[0].icon_url, marker_icon_url(Category::User));
        assert_eq!(views[0].body, "note");
    }
}
