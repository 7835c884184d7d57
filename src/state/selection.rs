// ============================================================================
// DETAIL PANEL - Selection state machine for catalog points
// ============================================================================

use crate::models::PointOfInterest;

/// `Open` holds the catalog index of the selected point, so "panel open"
/// always implies "a point is selected".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailPanel {
    #[default]
    Closed,
    Open(usize),
}

impl DetailPanel {
    /// Opening while already open replaces the point directly.
    pub fn open(&mut self, index: usize) {
        *self = DetailPanel::Open(index);
    }

    pub fn close(&mut self) {
        *self = DetailPanel::Closed;
    }

    pub fn selected_index(&self) -> Option<usize> {
        match self {
            DetailPanel::Open(index) => Some(*index),
            DetailPanel::Closed => None,
        }
    }

    pub fn selected<'a>(&self, catalog: &'a [PointOfInterest]) -> Option<&'a PointOfInterest> {
        self.selected_index().and_then(|i| catalog.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_replaces_without_closing() {
        let mut panel = DetailPanel::default();
        panel.open(0);
        assert_eq!(panel, DetailPanel::Open(0));
        panel.open(3);
        assert_eq!(panel, DetailPanel::Open(3));
    }

    #[test]
    fn test_close_from_any_point() {
        for i in 0..3 {
            let mut panel = DetailPanel::Open(i);
            panel.close();
            assert_eq!(panel, DetailPanel::Closed);
            assert!(panel.selected_index().is_none());
        }
    }
}
