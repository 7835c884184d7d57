pub mod marker_viewmodel;
pub mod map_viewmodel;

pub use marker_viewmodel::{MarkerKind, MarkerView, MarkerViewModel, RadiusCircle};
pub use map_viewmodel::{deliver_weather, MapViewModel};
