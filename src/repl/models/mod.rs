//! # Models
//!
//! Pure data models without UI concerns: catalog records, queries,
//! pagination bookkeeping, the local movie store and the status line.

pub mod movie;
pub mod movie_store;
pub mod pagination;
pub mod query;
pub mod status_line;

pub use movie::{Actor, Movie, MovieFormat, MovieId, NewMovie, UnknownFormat};
pub use movie_store::MovieStore;
pub use pagination::PaginationState;
pub use query::{FilterCriteria, MovieQuery, SortKey, SortOrder};
pub use status_line::{ApiStatus, StatusLine};
