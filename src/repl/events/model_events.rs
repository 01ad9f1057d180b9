//! # Model Events
//!
//! Events emitted when catalog state changes.
//! These events notify the system of data changes for reactive updates.

use crate::repl::models::MovieId;

/// Events emitted when models change
#[derive(Debug, Clone, PartialEq)]
pub enum ModelEvent {
    /// Store contents replaced by a fetched page
    MoviesReplaced { count: usize },

    /// A single movie appended to the store
    MovieAppended { id: MovieId },

    /// A movie removed from the store
    MovieRemoved { id: MovieId, remaining: usize },

    /// Current page number changed
    PageChanged { old: u32, new: u32 },

    /// Active filter criteria changed
    FiltersChanged {
        title: Option<String>,
        actor: Option<String>,
    },

    /// A page fetch failed
    FetchFailed { message: String },

    /// A bulk import finished
    ImportCompleted { succeeded: usize, failed: usize },
}
