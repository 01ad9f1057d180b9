//! # ViewModel Module
//!
//! Catalog view models split into focused responsibilities. `core` owns the
//! state; each manager adds the operations for one part of the screen.

mod card_manager;
mod core;
mod filter_manager;
mod form_manager;
mod list_manager;


// Re-export the main ViewModel
pub use core::ViewModel;

// Re-export types that other modules need
pub use card_manager::{CardError, CardErrorKind, MovieCardViewModel};
pub use filter_manager::{DebouncedInput, FilterField, FilterViewModel};
pub use form_manager::{AddMovieForm, FORM_ADDED, FORM_FAILED, FORM_INCOMPLETE};
pub use list_manager::{
    fetch_page, ListState, ListViewModel, LoadTrigger, PageRequest, PageResponse, RequestToken,
    ResponseOutcome,
};
