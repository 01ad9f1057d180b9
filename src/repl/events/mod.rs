//! # Events Module
//!
//! Re-exports all event system components organized by category.
//! Model events describe what changed in the catalog state, view events
//! describe what the renderer has to redraw.

pub mod event_bus;
pub mod model_events;
pub mod view_events;

pub use event_bus::{EventBus, ModelEventHandler, SimpleEventBus, ViewEventHandler};
pub use model_events::ModelEvent;
pub use view_events::ViewEvent;
