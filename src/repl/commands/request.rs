//! # Catalog Mutation Commands
//!
//! Adding a single movie and importing a file of them.

use super::{Command, CommandContext, CommandEvent, CommandInput};
use crate::config::expand_path;
use crate::repl::view_models::AddMovieForm;
use anyhow::{bail, Result};

/// Add one movie (`add Title | Year | Format | Actor, Actor`)
pub struct AddMovieCommand;

impl Command for AddMovieCommand {
    fn is_relevant(&self, _context: &CommandContext, input: &CommandInput) -> bool {
        input.is(&["add"])
    }

    fn execute(&self, input: &CommandInput, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::AddMovieRequested {
            form: AddMovieForm::from_line(input.argument()),
        }])
    }

    fn name(&self) -> &'static str {
        "AddMovie"
    }

    fn usage(&self) -> &'static str {
        "add <title> | <year> | <format> | <actor, ...>"
    }
}

/// Import movies from a text file (`import <path>`)
pub struct ImportCommand;

impl Command for ImportCommand {
    fn is_relevant(&self, _context: &CommandContext, input: &CommandInput) -> bool {
        input.is(&["import"])
    }

    fn execute(&self, input: &CommandInput, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        if input.argument().is_empty() {
            bail!("Usage: import <path>");
        }
        Ok(vec![CommandEvent::ImportRequested {
            path: expand_path(input.argument()),
        }])
    }

    fn name(&self) -> &'static str {
        "Import"
    }

    fn usage(&self) -> &'static str {
        "import <path>               import movies from a text file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::commands::ViewModelSnapshot;
    use std::path::PathBuf;

    fn context() -> CommandContext {
        CommandContext::new(ViewModelSnapshot::default())
    }

    #[test]
    fn add_should_build_form_from_argument() {
        let input = CommandInput::parse("add Heat | 1995 | DVD | Al Pacino").unwrap();
        let events = AddMovieCommand.execute(&input, &context()).unwrap();

        match &events[0] {
            CommandEvent::AddMovieRequested { form } => {
                assert_eq!(form.title, "Heat");
                assert_eq!(form.actors, vec!["Al Pacino"]);
            }
            other => panic!("Expected AddMovieRequested, got {other:?}"),
        }
    }

    #[test]
    fn import_should_require_path() {
        let input = CommandInput::parse("import").unwrap();
        assert!(ImportCommand.execute(&input, &context()).is_err());
    }

    #[test]
    fn import_should_keep_path_with_spaces() {
        let input = CommandInput::parse("import /tmp/my movies.txt").unwrap();
        let events = ImportCommand.execute(&input, &context()).unwrap();
        assert_eq!(
            events,
            vec![CommandEvent::ImportRequested {
                path: PathBuf::from("/tmp/my movies.txt")
            }]
        );
    }
}
