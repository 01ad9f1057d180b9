//! # Services Layer
//!
//! Provides the operations view models use to reach the outside world.
//! Services encapsulate reusable operations and reduce coupling
//! between commands and the ViewModel.
//!
//! Services should only exist when they add real value by:
//! - Abstracting external resources (the movies API, the auth endpoints)
//! - Providing multi-step business logic (sequential bulk import)

pub mod auth;
pub mod http;
pub mod import;

// Re-export service types
pub use auth::{AuthService, Session};
pub use http::{ApiError, HttpMoviesApi, MoviePage, MoviesApi};
pub use import::{
    decode_import_text, encoding_for_label, read_import_file, BulkImporter, ImportError,
    ImportTally,
};
