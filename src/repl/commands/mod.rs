//! # Command Implementations
//!
//! Line commands for the catalog REPL, organized by category. Each command
//! decides whether an input line is meant for it and turns the line into
//! [`CommandEvent`]s; the controller applies those events to the ViewModel.

use anyhow::Result;

pub mod app;
pub mod card;
pub mod context;
pub mod events;
pub mod list;
pub mod registry;
pub mod request;

pub use context::{CommandContext, CommandInput, ViewModelSnapshot};
pub use events::CommandEvent;
pub use registry::CommandRegistry;

/// A REPL command
pub trait Command: Send + Sync {
    /// Check if this command should handle the given input line
    fn is_relevant(&self, context: &CommandContext, input: &CommandInput) -> bool;

    /// Turn the input into events; errors are shown to the user
    fn execute(&self, input: &CommandInput, context: &CommandContext) -> Result<Vec<CommandEvent>>;

    /// Get command name for debugging and logging
    fn name(&self) -> &'static str;

    /// One-line usage for `help`
    fn usage(&self) -> &'static str;
}
