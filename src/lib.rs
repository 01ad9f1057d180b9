//! # MovieLine - Terminal Client for a Movie Catalog
//!
//! A line-oriented REPL for browsing, filtering and bulk-importing a remote
//! movie catalog over its REST API.
//!
//! ## Architecture
//!
//! This application follows the Model-View-ViewModel (MVVM) pattern:
//!
//! ```text
//! ┌─────────────┐    Events    ┌──────────────┐    Updates   ┌─────────────┐
//! │    View     │◄─────────────│  ViewModel   │◄─────────────│   Models    │
//! │             │              │              │              │             │
//! │ - Terminal  │              │ - List state │              │ - Store     │
//! │ - Rendering │              │ - Filters    │              │ - Paging    │
//! │             │              │ - Cards/Form │              │ - Status    │
//! └─────────────┘              └──────────────┘              └─────────────┘
//!                                 ▲        │
//!                        Commands │        │ MoviesApi
//!                                 │        ▼
//!                        ┌──────────────┐ ┌──────────────┐
//!                        │  Controller  │ │   Services   │
//!                        │              │ │              │
//!                        │ - Input      │ │ - HTTP       │
//!                        │ - Event Loop │ │ - Auth       │
//!                        │ - Page loads │ │ - Import     │
//!                        └──────────────┘ └──────────────┘
//! ```

pub mod cmd_args;
pub mod config;
pub mod repl;

// Re-export main types for easy access
pub use repl::*;
