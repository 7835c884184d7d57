// ============================================================================
// SERVICES - Data sources only (no UI logic)
// ============================================================================

pub mod catalog_service;
pub mod weather_service;

pub use catalog_service::*;
pub use weather_service::*;
