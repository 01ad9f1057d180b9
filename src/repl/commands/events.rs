//! # Command Events
//!
//! Events produced by commands that describe what should happen.
//! Commands produce these events, and the controller applies them to the ViewModel.

use crate::repl::models::MovieId;
use crate::repl::view_models::{AddMovieForm, FilterField};
use std::path::PathBuf;

/// Events that commands can produce to request changes
#[derive(Debug, Clone, PartialEq)]
pub enum CommandEvent {
    /// Reload the current page
    ReloadRequested,

    NextPageRequested,

    PreviousPageRequested,

    /// A keystroke-equivalent for a filter field; debounced by the ViewModel
    FilterInputRequested { field: FilterField, value: String },

    /// Expand or collapse a movie card
    CardToggleRequested { id: MovieId },

    DeleteRequested { id: MovieId },

    /// Clear the error shown on a card
    DismissErrorRequested { id: MovieId },

    AddMovieRequested { form: AddMovieForm },

    /// Bulk import from a text file
    ImportRequested { path: PathBuf },

    HelpRequested,
    /// Wipe the screen and redraw the page
    ClearRequested,

    QuitRequested,

    NoAction,
}
