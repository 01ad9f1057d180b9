//! # Application Control Commands
//!
//! Commands for the session itself: help, clearing the screen and quitting.

use super::{Command, CommandContext, CommandEvent, CommandInput};
use anyhow::Result;

/// List the available commands
pub struct HelpCommand;

impl Command for HelpCommand {
    fn is_relevant(&self, _context: &CommandContext, input: &CommandInput) -> bool {
        input.is(&["help", "?"])
    }

    fn execute(&self, _input: &CommandInput, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::HelpRequested])
    }

    fn name(&self) -> &'static str {
        "Help"
    }

    fn usage(&self) -> &'static str {
        "help                        show this list"
    }
}

/// Clear the screen and print the page again
pub struct ClearCommand;

impl Command for ClearCommand {
    fn is_relevant(&self, _context: &CommandContext, input: &CommandInput) -> bool {
        input.is(&["clear", "cls"])
    }

    fn execute(&self, _input: &CommandInput, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::ClearRequested])
    }

    fn name(&self) -> &'static str {
        "Clear"
    }

    fn usage(&self) -> &'static str {
        "clear                       clear the screen"
    }
}

/// Terminate application
pub struct QuitCommand;

impl Command for QuitCommand {
    fn is_relevant(&self, _context: &CommandContext, input: &CommandInput) -> bool {
        input.is(&["quit", "exit", "q"])
    }

    fn execute(&self, _input: &CommandInput, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::QuitRequested])
    }

    fn name(&self) -> &'static str {
        "Quit"
    }

    fn usage(&self) -> &'static str {
        "quit                        leave movieline"
    }
}
