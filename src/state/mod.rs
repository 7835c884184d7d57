// ============================================================================
// STATE MODULE - State Management with Rc<RefCell> + notifications
// ============================================================================

pub mod marker_store;
pub mod selection;
pub mod viewport_state;
pub mod events;
pub mod app_state;

pub use marker_store::*;
pub use selection::*;
pub use viewport_state::*;
pub use events::*;
pub use app_state::*;
