use crate::maps::{ControlKind, ControlPosition, ControlSpec, MapError, MapOverlay, OverlayHandle, ViewportControl};
use crate::models::WeatherReport;

/// Bottom-left card showing the latest report. Only ever built once a report exists.
pub struct WeatherCard {
    report: WeatherReport,
}

impl WeatherCard {
    pub fn new(report: WeatherReport) -> Self {
        Self { report }
    }
}

impl MapOverlay for WeatherCard {
    fn attach(&mut self, viewport: &mut dyn ViewportControl) -> Result<OverlayHandle, MapError> {
        viewport.add_control(ControlSpec {
            position: ControlPosition::BottomLeft,
            kind: ControlKind::Weather(self.report.clone()),
        })
    }
}
