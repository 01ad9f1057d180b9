//! # List Management
//!
//! Owns the page position, the active filters and the load state of the
//! movie list. Every load is tagged with a request token; only the response
//! carrying the most recently issued token is applied, so a slow response
//! for an old page or filter can never overwrite a newer one.
//!
//! ```text
//!            mount / filters / page / reload
//!   Idle ─────────────────────────────────────▶ Loading
//!   Loaded ───────────────────────────────────▶ Loading
//!   Errored ──────────────────────────────────▶ Loading
//!   Loading ── response ok ──▶ Loaded
//!   Loading ── response err ─▶ Errored (store keeps the last good page)
//! ```

use crate::repl::events::{ModelEvent, ViewEvent};
use crate::repl::models::{FilterCriteria, MovieQuery, MovieStore, PaginationState};
use crate::repl::services::{ApiError, MoviePage, MoviesApi};
use crate::repl::view_models::core::ViewModel;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Monotonic identifier of an issued page load
pub type RequestToken = u64;

/// Load state of the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    Idle,
    Loading,
    Loaded,
    Errored(String),
}

/// Why a load was started, for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadTrigger {
    Mount,
    FiltersChanged,
    Navigation,
    Reload,
    Deletion,
}

/// A page load the caller must execute and report back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub token: RequestToken,
    pub query: MovieQuery,
}

/// What happened to a reported response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseOutcome {
    /// Page installed in the store
    Applied,
    /// Load failed; the list is now errored
    Failed,
    /// A newer load was issued; response dropped
    Stale,
}

/// Paginated list controller
#[derive(Debug, Clone)]
pub struct ListViewModel {
    state: ListState,
    pagination: PaginationState,
    filters: FilterCriteria,
    last_issued: RequestToken,
}

impl ListViewModel {
    pub fn new(page_size: u32) -> Self {
        Self {
            state: ListState::Idle,
            pagination: PaginationState::new(page_size),
            filters: FilterCriteria::default(),
            last_issued: 0,
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn filters(&self) -> &FilterCriteria {
        &self.filters
    }

    pub fn page(&self) -> u32 {
        self.pagination.page()
    }

    pub fn has_more(&self) -> bool {
        self.pagination.has_more()
    }

    pub fn is_loading(&self) -> bool {
        self.state == ListState::Loading
    }

    /// Error message of the last failed load
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ListState::Errored(message) => Some(message),
            _ => None,
        }
    }

    /// Token of the most recent load, 0 before the first one
    pub fn last_issued(&self) -> RequestToken {
        self.last_issued
    }

    /// Initial load of page 1
    pub fn mount(&mut self) -> PageRequest {
        self.pagination.reset();
        self.begin_load(LoadTrigger::Mount)
    }

    /// Install new filter criteria and reload from page 1
    ///
    /// Returns `None` when the criteria equal the active ones.
    pub fn apply_filters(&mut self, filters: FilterCriteria) -> Option<PageRequest> {
        if filters == self.filters {
            return None;
        }
        tracing::debug!(?filters, "Filter criteria changed");
        self.filters = filters;
        self.pagination.reset();
        Some(self.begin_load(LoadTrigger::FiltersChanged))
    }

    /// Go to the next page; no-op when no more records exist
    pub fn next_page(&mut self) -> Option<PageRequest> {
        if !self.pagination.advance() {
            tracing::debug!("Already on the last page");
            return None;
        }
        Some(self.begin_load(LoadTrigger::Navigation))
    }

    /// Go to the previous page; no-op on page 1
    pub fn previous_page(&mut self) -> Option<PageRequest> {
        if !self.pagination.retreat() {
            tracing::debug!("Already on the first page");
            return None;
        }
        Some(self.begin_load(LoadTrigger::Navigation))
    }

    /// Reload the current page
    pub fn reload(&mut self) -> PageRequest {
        self.begin_load(LoadTrigger::Reload)
    }

    /// Fix the page position after a movie was deleted
    ///
    /// An emptied page other than the first steps back one page; anything
    /// else reloads the current page to pick up the new total and any
    /// record that shifted into view.
    pub fn reconcile_after_delete(&mut self, remaining_on_page: usize) -> PageRequest {
        if remaining_on_page == 0 && self.pagination.retreat() {
            tracing::debug!("Page emptied by deletion, moving to page {}", self.page());
        }
        self.begin_load(LoadTrigger::Deletion)
    }

    /// Report the result of a load
    pub fn apply_response(
        &mut self,
        token: RequestToken,
        result: Result<MoviePage, ApiError>,
        store: &mut MovieStore,
    ) -> ResponseOutcome {
        if token != self.last_issued {
            tracing::debug!(
                "Discarding stale page response {} (latest is {})",
                token,
                self.last_issued
            );
            return ResponseOutcome::Stale;
        }

        match result {
            Ok(page) => {
                tracing::debug!(
                    "Loaded page {} with {} movies of {}",
                    self.page(),
                    page.movies.len(),
                    page.total
                );
                self.pagination.set_total(page.total);
                store.replace_all(page.movies);
                self.state = ListState::Loaded;
                ResponseOutcome::Applied
            }
            Err(e) => {
                tracing::error!("Failed to load page {}: {}", self.page(), e);
                self.state = ListState::Errored(e.to_string());
                ResponseOutcome::Failed
            }
        }
    }

    fn begin_load(&mut self, trigger: LoadTrigger) -> PageRequest {
        self.last_issued += 1;
        self.state = ListState::Loading;
        tracing::debug!(?trigger, token = self.last_issued, page = self.page(), "Loading page");
        PageRequest {
            token: self.last_issued,
            query: MovieQuery::for_page(
                self.pagination.page(),
                self.pagination.page_size(),
                self.filters.clone(),
            ),
        }
    }
}

/// A finished page load
#[derive(Debug)]
pub struct PageResponse {
    pub token: RequestToken,
    pub result: Result<MoviePage, ApiError>,
    pub duration: Duration,
}

/// Run a page load against the catalog
pub async fn fetch_page(api: Arc<dyn MoviesApi>, request: PageRequest) -> PageResponse {
    let started = Instant::now();
    let result = api.list_movies(&request.query).await;
    PageResponse {
        token: request.token,
        result,
        duration: started.elapsed(),
    }
}

impl ViewModel {
    /// Start the first page load
    pub fn mount_list(&mut self) -> PageRequest {
        let request = self.list.mount();
        self.emit_view_event(ViewEvent::StatusBarUpdateRequired);
        request
    }

    pub fn next_page(&mut self) -> Option<PageRequest> {
        let old = self.list.page();
        let request = self.list.next_page();
        self.after_navigation(old, request.is_some(), "Already on the last page");
        request
    }

    pub fn previous_page(&mut self) -> Option<PageRequest> {
        let old = self.list.page();
        let request = self.list.previous_page();
        self.after_navigation(old, request.is_some(), "Already on the first page");
        request
    }

    pub fn reload_list(&mut self) -> PageRequest {
        let request = self.list.reload();
        self.emit_view_event(ViewEvent::StatusBarUpdateRequired);
        request
    }

    fn after_navigation(&mut self, old: u32, moved: bool, refusal: &str) {
        if moved {
            let new = self.list.page();
            self.publish_model_event(ModelEvent::PageChanged { old, new });
            self.emit_view_event(ViewEvent::StatusBarUpdateRequired);
        } else {
            self.emit_message(refusal);
        }
    }

    /// Install a finished page load
    pub fn apply_page_response(&mut self, response: PageResponse) -> ResponseOutcome {
        let succeeded = response.result.is_ok();
        let outcome = self
            .list
            .apply_response(response.token, response.result, &mut self.store);

        match outcome {
            ResponseOutcome::Applied => {
                self.record_api_call("list", succeeded, response.duration);
                self.publish_model_event(ModelEvent::MoviesReplaced {
                    count: self.store.len(),
                });
                self.prune_cards();
                self.emit_view_event(ViewEvent::ListRedrawRequired);
            }
            ResponseOutcome::Failed => {
                self.record_api_call("list", succeeded, response.duration);
                let message = self.list.error().unwrap_or_default().to_string();
                self.publish_model_event(ModelEvent::FetchFailed { message });
                self.emit_view_event(ViewEvent::ListRedrawRequired);
            }
            ResponseOutcome::Stale => {}
        }
        outcome
    }

    /// Run a page load inline and install it
    pub async fn load_page(&mut self, request: PageRequest) -> ResponseOutcome {
        let response = fetch_page(self.api(), request).await;
        self.apply_page_response(response)
    }
}
