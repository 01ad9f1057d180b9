//! # Filter Management
//!
//! Debounces the title and actor filter inputs. Each field keeps the value
//! typed last and a deadline; a new keystroke replaces the value and restarts
//! the window, so only the value present when the window elapses is applied.

use crate::config::FILTER_DEBOUNCE;
use crate::repl::models::FilterCriteria;
use crate::repl::view_models::core::ViewModel;
use crate::repl::view_models::list_manager::PageRequest;
use std::time::Duration;
use tokio::time::Instant;

/// Which filter input a value was typed into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Title,
    Actor,
}

/// One input field whose value settles after a quiet period
#[derive(Debug, Clone)]
pub struct DebouncedInput {
    committed: String,
    pending: Option<(String, Instant)>,
    delay: Duration,
}

impl DebouncedInput {
    pub fn new(delay: Duration) -> Self {
        Self {
            committed: String::new(),
            pending: None,
            delay,
        }
    }

    /// Record a keystroke; restarts the debounce window
    pub fn input<S: Into<String>>(&mut self, value: S, now: Instant) {
        self.pending = Some((value.into(), now + self.delay));
    }

    /// When the pending value settles, if there is one
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Commit the pending value once its deadline has passed
    ///
    /// Returns true when the committed value changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending.take() {
            Some((value, deadline)) if deadline <= now => {
                let changed = value != self.committed;
                self.committed = value;
                changed
            }
            pending => {
                self.pending = pending;
                false
            }
        }
    }

    /// The last settled value
    pub fn value(&self) -> &str {
        &self.committed
    }

    /// The value waiting for its window to elapse
    pub fn pending_value(&self) -> Option<&str> {
        self.pending.as_ref().map(|(value, _)| value.as_str())
    }
}

/// Title and actor filter inputs
#[derive(Debug, Clone)]
pub struct FilterViewModel {
    title: DebouncedInput,
    actor: DebouncedInput,
}

impl FilterViewModel {
    pub fn new(delay: Duration) -> Self {
        Self {
            title: DebouncedInput::new(delay),
            actor: DebouncedInput::new(delay),
        }
    }

    pub fn input<S: Into<String>>(&mut self, field: FilterField, value: S, now: Instant) {
        let value = value.into();
        tracing::debug!(?field, %value, "Filter input");
        self.field_mut(field).input(value, now);
    }

    /// Earliest pending deadline across both fields
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.title.deadline(), self.actor.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Settle due fields; returns the combined criteria when a field changed
    pub fn poll(&mut self, now: Instant) -> Option<FilterCriteria> {
        let title_changed = self.title.poll(now);
        let actor_changed = self.actor.poll(now);
        (title_changed || actor_changed).then(|| self.criteria())
    }

    /// Criteria built from the settled values
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::from_inputs(self.title.value(), self.actor.value())
    }

    pub fn field(&self, field: FilterField) -> &DebouncedInput {
        match field {
            FilterField::Title => &self.title,
            FilterField::Actor => &self.actor,
        }
    }

    fn field_mut(&mut self, field: FilterField) -> &mut DebouncedInput {
        match field {
            FilterField::Title => &mut self.title,
            FilterField::Actor => &mut self.actor,
        }
    }
}

impl Default for FilterViewModel {
    fn default() -> Self {
        Self::new(FILTER_DEBOUNCE)
    }
}

impl ViewModel {
    /// Type into a filter field
    pub fn input_filter<S: Into<String>>(&mut self, field: FilterField, value: S, now: Instant) {
        self.filters.input(field, value, now);
        self.emit_view_event(crate::repl::events::ViewEvent::StatusBarUpdateRequired);
    }

    /// When the controller should next call [`ViewModel::settle_filters`]
    pub fn next_filter_deadline(&self) -> Option<Instant> {
        self.filters.next_deadline()
    }

    /// Apply settled filter values to the list
    ///
    /// Returns the page load to run when the criteria actually changed.
    pub fn settle_filters(&mut self, now: Instant) -> Option<PageRequest> {
        let criteria = self.filters.poll(now)?;
        let request = self.list.apply_filters(criteria.clone())?;
        self.publish_model_event(crate::repl::events::ModelEvent::FiltersChanged {
            title: criteria.title,
            actor: criteria.actor,
        });
        self.emit_view_event(crate::repl::events::ViewEvent::StatusBarUpdateRequired);
        Some(request)
    }

    pub fn filter_inputs(&self) -> &FilterViewModel {
        &self.filters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(500);

    #[test]
    fn input_should_wait_for_debounce_window() {
        let start = Instant::now();
        let mut input = DebouncedInput::new(DELAY);

        input.input("Matrix", start);

        assert!(!input.poll(start + Duration::from_millis(499)));
        assert_eq!(input.value(), "");
        assert_eq!(input.pending_value(), Some("Matrix"));
        assert!(input.poll(start + DELAY));
        assert_eq!(input.value(), "Matrix");
        assert_eq!(input.deadline(), None);
    }

    #[test]
    fn second_input_should_restart_window_and_win() {
        let start = Instant::now();
        let mut filters = FilterViewModel::new(DELAY);

        filters.input(FilterField::Title, "Mat", start);
        filters.input(FilterField::Title, "Matrix", start + Duration::from_millis(300));

        assert_eq!(filters.poll(start + Duration::from_millis(600)), None);
        let criteria = filters.poll(start + Duration::from_millis(800)).unwrap();
        assert_eq!(criteria.title.as_deref(), Some("Matrix"));
    }

    #[test]
    fn short_values_should_clear_filters() {
        let start = Instant::now();
        let mut filters = FilterViewModel::new(DELAY);
        filters.input(FilterField::Title, "Matrix", start);
        filters.input(FilterField::Actor, "Keanu", start);
        filters.poll(start + DELAY);

        filters.input(FilterField::Title, "Ma", start + DELAY);
        filters.input(FilterField::Actor, "K", start + DELAY);
        let criteria = filters.poll(start + DELAY * 2).unwrap();

        assert_eq!(criteria, FilterCriteria::default());
    }

    #[test]
    fn next_deadline_should_be_earliest_field() {
        let start = Instant::now();
        let mut filters = FilterViewModel::new(DELAY);
        assert_eq!(filters.next_deadline(), None);

        filters.input(FilterField::Actor, "Tom", start + Duration::from_millis(100));
        filters.input(FilterField::Title, "Big", start);

        assert_eq!(filters.next_deadline(), Some(start + DELAY));
    }

    #[test]
    fn retyping_same_value_should_not_report_change() {
        let start = Instant::now();
        let mut filters = FilterViewModel::new(DELAY);
        filters.input(FilterField::Title, "Heat", start);
        assert!(filters.poll(start + DELAY).is_some());

        filters.input(FilterField::Title, "Heat", start + DELAY);

        assert_eq!(filters.poll(start + DELAY * 2), None);
    }
}
