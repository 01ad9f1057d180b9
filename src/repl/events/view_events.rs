//! # View Events
//!
//! Events related to view updates.
//! These events tell the renderer which parts of the screen are stale.

use crate::repl::models::MovieId;

/// Events emitted when view updates are needed
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// The movie list (and its page footer) needs redrawing
    ListRedrawRequired,

    /// A single card's details or error changed
    CardRedrawRequired { id: MovieId },

    /// Status bar needs updating
    StatusBarUpdateRequired,

    /// A one-off message for the user (import tally, form result)
    MessageRequired { message: String },
}
