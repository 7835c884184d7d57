pub mod geo;
pub mod poi;
pub mod user_marker;
pub mod tile_style;
pub mod weather;
pub mod geocode;

pub use geo::{LatLng, LatLngBounds};
pub use poi::{Category, PointOfInterest};
pub use user_marker::{MarkerId, UserMarker};
pub use tile_style::{TileSource, TileStyle};
pub use weather::{WeatherCondition, WeatherReport};
pub use geocode::{GeocodeOutcome, GeocodeResult};
