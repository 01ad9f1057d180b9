//! # Utils Module
//!
//! Contains utility functions and helpers used across the REPL.

pub mod import_parser;

// Re-export main functions for convenience
pub use import_parser::{parse_movies, Candidates, ImportDocument};
