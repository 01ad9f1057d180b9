//! # Card Management
//!
//! Per-movie detail cards. A card fetches the full movie the first time it
//! is expanded and keeps it for later toggles. Detail and delete failures are
//! tracked separately so each can be shown and dismissed on its own.

use crate::repl::events::ViewEvent;
use crate::repl::models::{Movie, MovieId};
use crate::repl::services::ApiError;
use crate::repl::view_models::core::ViewModel;
use crate::repl::view_models::list_manager::PageRequest;
use std::sync::Arc;

/// Which card operation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardErrorKind {
    Details,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardError {
    pub kind: CardErrorKind,
    pub message: String,
}

/// State of one movie card
#[derive(Debug, Clone, Default)]
pub struct MovieCardViewModel {
    expanded: bool,
    details: Option<Movie>,
    loading: bool,
    deleting: bool,
    error: Option<CardError>,
}

impl MovieCardViewModel {
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    pub fn details(&self) -> Option<&Movie> {
        self.details.as_ref()
    }

    pub fn error(&self) -> Option<&CardError> {
        self.error.as_ref()
    }

    /// Flip the expanded flag
    ///
    /// Returns true when the card was opened without cached details and a
    /// fetch must follow.
    pub fn toggle(&mut self) -> bool {
        self.expanded = !self.expanded;
        let needs_fetch = self.expanded && self.details.is_none();
        if needs_fetch {
            self.loading = true;
            self.error = None;
        }
        needs_fetch
    }

    pub fn apply_details(&mut self, result: Result<Movie, ApiError>) {
        self.loading = false;
        match result {
            Ok(movie) => self.details = Some(movie),
            Err(e) => {
                self.error = Some(CardError {
                    kind: CardErrorKind::Details,
                    message: e.to_string(),
                })
            }
        }
    }

    /// Mark the card as deleting; false when a delete is already running
    pub fn begin_delete(&mut self) -> bool {
        if self.deleting {
            return false;
        }
        self.deleting = true;
        self.error = None;
        true
    }

    pub fn fail_delete(&mut self, error: &ApiError) {
        self.deleting = false;
        self.error = Some(CardError {
            kind: CardErrorKind::Delete,
            message: error.to_string(),
        });
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Actor names for the expanded view
    pub fn actor_line(&self) -> String {
        match &self.details {
            Some(movie) if !movie.actors.is_empty() => movie.actor_names().join(", "),
            _ => "No actors listed".to_string(),
        }
    }
}

impl ViewModel {
    pub fn card(&self, id: MovieId) -> Option<&MovieCardViewModel> {
        self.cards.get(&id)
    }

    /// Expand or collapse a card, fetching details on first expansion
    pub async fn toggle_card(&mut self, id: MovieId) {
        if !self.store.contains(id) {
            self.emit_message(format!("Movie {id} is not on this page"));
            return;
        }

        let needs_fetch = self.cards.entry(id).or_default().toggle();
        if needs_fetch {
            tracing::debug!("Fetching details for movie {}", id);
            let api = Arc::clone(&self.api);
            let started = std::time::Instant::now();
            let result = api.get_movie(id).await;
            self.record_api_call("details", result.is_ok(), started.elapsed());
            if let Err(e) = &result {
                tracing::error!("Failed to load details for movie {}: {}", id, e);
            }
            if let Some(card) = self.cards.get_mut(&id) {
                card.apply_details(result);
            }
        }
        self.emit_view_event(ViewEvent::CardRedrawRequired { id });
    }

    /// Delete a movie on the current page
    ///
    /// On success the movie leaves the store and the returned page load
    /// reconciles the page position.
    pub async fn delete_movie(&mut self, id: MovieId) -> Option<PageRequest> {
        if !self.store.contains(id) {
            self.emit_message(format!("Movie {id} is not on this page"));
            return None;
        }
        if !self.cards.entry(id).or_default().begin_delete() {
            tracing::debug!("Delete of movie {} already in progress", id);
            return None;
        }

        let api = Arc::clone(&self.api);
        let started = std::time::Instant::now();
        let result = api.delete_movie(id).await;
        self.record_api_call("delete", result.is_ok(), started.elapsed());

        match result {
            Ok(()) => {
                tracing::info!("Deleted movie {}", id);
                self.cards.remove(&id);
                if let Some(event) = self.store.remove(id) {
                    self.publish_model_event(event);
                }
                self.emit_view_event(ViewEvent::ListRedrawRequired);
                Some(self.list.reconcile_after_delete(self.store.len()))
            }
            Err(e) => {
                if e.is_not_found() {
                    tracing::warn!("Movie {} is no longer on the server", id);
                }
                tracing::error!("Failed to delete movie {}: {}", id, e);
                if let Some(card) = self.cards.get_mut(&id) {
                    card.fail_delete(&e);
                }
                self.emit_view_event(ViewEvent::CardRedrawRequired { id });
                None
            }
        }
    }

    pub fn dismiss_card_error(&mut self, id: MovieId) {
        if let Some(card) = self.cards.get_mut(&id) {
            card.dismiss_error();
            self.emit_view_event(ViewEvent::CardRedrawRequired { id });
        }
    }

    /// Drop card state for movies no longer in the store
    pub(super) fn prune_cards(&mut self) {
        let store = &self.store;
        self.cards.retain(|id, _| store.contains(*id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::models::MovieFormat;

    fn movie() -> Movie {
        Movie {
            id: 5,
            title: "Heat".into(),
            year: 1995,
            format: MovieFormat::BluRay,
            actors: vec![],
        }
    }

    #[test]
    fn first_expand_should_request_details() {
        let mut card = MovieCardViewModel::default();

        assert!(card.toggle());
        assert!(card.is_expanded());
        assert!(card.is_loading());
    }

    #[test]
    fn cached_details_should_not_refetch() {
        let mut card = MovieCardViewModel::default();
        card.toggle();
        card.apply_details(Ok(movie()));

        assert!(!card.toggle());
        assert!(!card.is_expanded());
        assert!(!card.toggle());
        assert!(card.is_expanded());
    }

    #[test]
    fn collapsing_should_never_fetch() {
        let mut card = MovieCardViewModel::default();
        card.toggle();
        card.apply_details(Err(ApiError::InvalidResponse("x".into())));

        assert!(!card.toggle());
    }

    #[test]
    fn details_and_delete_errors_should_be_distinct() {
        let mut card = MovieCardViewModel::default();
        card.toggle();
        card.apply_details(Err(ApiError::Status {
            status: 404,
            body: "missing".into(),
        }));
        assert_eq!(card.error().unwrap().kind, CardErrorKind::Details);

        assert!(card.begin_delete());
        card.fail_delete(&ApiError::Rejected {
            code: "NOT_FOUND".into(),
            fields: vec![],
        });
        let error = card.error().unwrap();
        assert_eq!(error.kind, CardErrorKind::Delete);
        assert_eq!(error.message, "NOT_FOUND");
        assert!(!card.is_deleting());

        card.dismiss_error();
        assert!(card.error().is_none());
    }

    #[test]
    fn second_delete_should_be_refused_while_running() {
        let mut card = MovieCardViewModel::default();
        assert!(card.begin_delete());
        assert!(!card.begin_delete());
    }

    #[test]
    fn actor_line_should_fall_back_when_empty() {
        let mut card = MovieCardViewModel::default();
        assert_eq!(card.actor_line(), "No actors listed");

        let mut full = movie();
        full.actors = vec![
            crate::repl::models::Actor {
                id: Some(1),
                name: "Al Pacino".into(),
            },
            crate::repl::models::Actor {
                id: Some(2),
                name: "Robert De Niro".into(),
            },
        ];
        card.toggle();
        card.apply_details(Ok(full));
        assert_eq!(card.actor_line(), "Al Pacino, Robert De Niro");
    }
}
