//! # Event Bus
//!
//! Fans model and view events out to subscribers. The ViewModel publishes
//! every catalog change and redraw request here; the application subscribes
//! a tracing logger.

use super::model_events::ModelEvent;
use super::view_events::ViewEvent;

pub type ModelEventHandler = Box<dyn Fn(&ModelEvent) + Send + Sync>;

pub type ViewEventHandler = Box<dyn Fn(&ViewEvent) + Send + Sync>;

/// Event bus for decoupled communication between components
pub trait EventBus: Send + Sync {
    /// Publish a model event
    fn publish_model_event(&mut self, event: ModelEvent);

    /// Publish a view event
    fn publish_view_event(&mut self, event: ViewEvent);

    /// Subscribe to model events
    fn subscribe_to_model_events(&mut self, handler: ModelEventHandler);

    /// Subscribe to view events
    fn subscribe_to_view_events(&mut self, handler: ViewEventHandler);
}

/// In-process bus calling handlers synchronously in subscription order
pub struct SimpleEventBus {
    model_handlers: Vec<ModelEventHandler>,
    view_handlers: Vec<ViewEventHandler>,
}

impl SimpleEventBus {
    pub fn new() -> Self {
        Self {
            model_handlers: Vec::new(),
            view_handlers: Vec::new(),
        }
    }

    /// Bus with subscribers that trace catalog changes and redraws
    pub fn with_tracing() -> Self {
        let mut bus = Self::new();
        bus.subscribe_to_model_events(Box::new(trace_model_event));
        bus.subscribe_to_view_events(Box::new(|event| tracing::trace!("View event: {:?}", event)));
        bus
    }
}

fn trace_model_event(event: &ModelEvent) {
    match event {
        ModelEvent::FetchFailed { message } => {
            tracing::warn!("Movie list fetch failed: {}", message)
        }
        ModelEvent::ImportCompleted { succeeded, failed } => {
            tracing::info!(succeeded, failed, "Import completed")
        }
        other => tracing::debug!("Catalog changed: {:?}", other),
    }
}

impl Default for SimpleEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus for SimpleEventBus {
    fn publish_model_event(&mut self, event: ModelEvent) {
        for handler in &self.model_handlers {
            handler(&event);
        }
    }

    fn publish_view_event(&mut self, event: ViewEvent) {
        for handler in &self.view_handlers {
            handler(&event);
        }
    }

    fn subscribe_to_model_events(&mut self, handler: ModelEventHandler) {
        self.model_handlers.push(handler);
    }

    fn subscribe_to_view_events(&mut self, handler: ViewEventHandler) {
        self.view_handlers.push(handler);
    }
}
