//! # ViewModel - Business Logic Coordinator
//!
//! The ViewModel owns the movie store and the state of the list, the filter
//! inputs and every card. Commands delegate to it, and it records which
//! parts of the screen went stale as pending view events.

use crate::repl::events::{EventBus, ModelEvent, ViewEvent};
use crate::repl::models::{MovieId, MovieStore, StatusLine};
use crate::repl::services::MoviesApi;
use crate::repl::view_models::card_manager::MovieCardViewModel;
use crate::repl::view_models::filter_manager::FilterViewModel;
use crate::repl::view_models::list_manager::ListViewModel;
use encoding_rs::Encoding;
use std::collections::HashMap;
use std::sync::Arc;

/// Type alias for event bus option to reduce complexity
type EventBusOption = Option<Box<dyn EventBus>>;

/// The central ViewModel that coordinates all catalog state
pub struct ViewModel {
    // Remote catalog
    pub(super) api: Arc<dyn MoviesApi>,

    // Core models
    pub(super) store: MovieStore,
    pub(super) status_line: StatusLine,

    // Sub view models
    pub(super) list: ListViewModel,
    pub(super) filters: FilterViewModel,
    pub(super) cards: HashMap<MovieId, MovieCardViewModel>,

    // Import configuration
    pub(super) import_encoding: Option<&'static Encoding>,

    // Event management
    pub(super) event_bus: EventBusOption,
    pub(super) pending_view_events: Vec<ViewEvent>,
}

impl ViewModel {
    /// Create a ViewModel backed by `api`
    pub fn new(api: Arc<dyn MoviesApi>, page_size: u32) -> Self {
        Self {
            api,
            store: MovieStore::new(),
            status_line: StatusLine::new(),
            list: ListViewModel::new(page_size),
            filters: FilterViewModel::default(),
            cards: HashMap::new(),
            import_encoding: None,
            event_bus: None,
            pending_view_events: Vec::new(),
        }
    }

    /// Set the event bus for this ViewModel
    pub fn set_event_bus(&mut self, event_bus: Box<dyn EventBus>) {
        self.event_bus = Some(event_bus);
        tracing::debug!("Event bus set for ViewModel");
    }

    /// Fallback encoding for import files that are not UTF-8
    pub fn set_import_encoding(&mut self, encoding: Option<&'static Encoding>) {
        self.import_encoding = encoding;
    }

    pub fn set_profile_info(&mut self, profile_name: String, profile_path: String) {
        self.status_line.set_profile(profile_name, profile_path);
    }

    pub fn api(&self) -> Arc<dyn MoviesApi> {
        Arc::clone(&self.api)
    }

    pub fn store(&self) -> &MovieStore {
        &self.store
    }

    pub fn list(&self) -> &ListViewModel {
        &self.list
    }

    pub fn status_line(&self) -> &StatusLine {
        &self.status_line
    }

    // === Event Methods ===

    /// Queue a view event for the next render
    pub(super) fn emit_view_event(&mut self, event: ViewEvent) {
        tracing::debug!("View event emitted: {:?}", event);
        if let Some(bus) = self.event_bus.as_mut() {
            bus.publish_view_event(event.clone());
        }
        self.pending_view_events.push(event);
    }

    /// Queue a message for the user
    pub(super) fn emit_message<S: Into<String>>(&mut self, message: S) {
        let message = message.into();
        self.status_line.set_status_message(message.clone());
        self.emit_view_event(ViewEvent::MessageRequired { message });
    }

    pub(super) fn publish_model_event(&mut self, event: ModelEvent) {
        tracing::debug!("Model event: {:?}", event);
        if let Some(bus) = self.event_bus.as_mut() {
            bus.publish_model_event(event);
        }
    }

    /// Collect and clear pending view events
    pub fn collect_pending_view_events(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.pending_view_events)
    }

    /// Record an API call on the status line
    pub(super) fn record_api_call(
        &mut self,
        operation: &str,
        succeeded: bool,
        duration: std::time::Duration,
    ) {
        let duration_ms = duration.as_millis() as u64;
        tracing::debug!(operation, succeeded, duration_ms, "API call finished");
        self.status_line
            .set_api_status(operation, succeeded, duration_ms);
        self.emit_view_event(ViewEvent::StatusBarUpdateRequired);
    }
}
