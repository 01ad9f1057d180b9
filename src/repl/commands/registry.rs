//! # Command Registry
//!
//! Holds every command and dispatches an input line to the first one that
//! reports itself relevant.

use super::app::{ClearCommand, HelpCommand, QuitCommand};
use super::card::{DeleteMovieCommand, DismissErrorCommand, ShowCardCommand};
use super::list::{
    ActorFilterCommand, NextPageCommand, PreviousPageCommand, ReloadCommand, TitleFilterCommand,
};
use super::request::{AddMovieCommand, ImportCommand};
use super::{Command, CommandContext, CommandEvent, CommandInput};
use anyhow::{bail, Result};

pub struct CommandRegistry {
    commands: Vec<Box<dyn Command>>,
}

impl CommandRegistry {
    /// Create a new registry with default commands
    pub fn new() -> Self {
        Self {
            commands: vec![
                Box::new(ReloadCommand),
                Box::new(NextPageCommand),
                Box::new(PreviousPageCommand),
                Box::new(TitleFilterCommand),
                Box::new(ActorFilterCommand),
                Box::new(ShowCardCommand),
                Box::new(DeleteMovieCommand),
                Box::new(DismissErrorCommand),
                Box::new(AddMovieCommand),
                Box::new(ImportCommand),
                Box::new(HelpCommand),
                Box::new(ClearCommand),
                Box::new(QuitCommand),
            ],
        }
    }

    /// Process an input line through the first relevant command
    pub fn process_input(
        &self,
        input: &CommandInput,
        context: &CommandContext,
    ) -> Result<Vec<CommandEvent>> {
        match self
            .commands
            .iter()
            .find(|command| command.is_relevant(context, input))
        {
            Some(command) => {
                tracing::debug!("Command {} handles '{}'", command.name(), input.verb());
                command.execute(input, context)
            }
            None => bail!(
                "Unknown command '{}'. Type 'help' for a list of commands.",
                input.verb()
            ),
        }
    }

    /// Usage lines of every registered command
    pub fn help_lines(&self) -> Vec<&'static str> {
        self.commands.iter().map(|command| command.usage()).collect()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::commands::ViewModelSnapshot;

    fn context() -> CommandContext {
        CommandContext::new(ViewModelSnapshot {
            visible_ids: vec![3, 4],
        })
    }

    fn process(line: &str) -> Result<Vec<CommandEvent>> {
        let input = CommandInput::parse(line).unwrap();
        CommandRegistry::new().process_input(&input, &context())
    }

    #[test]
    fn registry_should_dispatch_to_matching_command() {
        assert_eq!(process("next").unwrap(), vec![CommandEvent::NextPageRequested]);
        assert_eq!(process("q").unwrap(), vec![CommandEvent::QuitRequested]);
        assert_eq!(
            process("show 4").unwrap(),
            vec![CommandEvent::CardToggleRequested { id: 4 }]
        );
    }

    #[test]
    fn registry_should_reject_unknown_verbs() {
        let error = process("frobnicate").unwrap_err();
        assert!(error.to_string().contains("Unknown command 'frobnicate'"));
    }

    #[test]
    fn help_should_list_every_command() {
        let registry = CommandRegistry::new();
        let lines = registry.help_lines();
        assert_eq!(lines.len(), 13);
        assert!(lines.iter().any(|line| line.starts_with("import")));
    }
}
