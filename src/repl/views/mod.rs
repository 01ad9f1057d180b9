//! # Views Module
//!
//! Text rendering of the catalog: the movie page, single cards, messages
//! and the prompt.

pub mod terminal_renderer;

pub use terminal_renderer::{TerminalRenderer, ViewRenderer, LIST_HEADING, PROMPT};
