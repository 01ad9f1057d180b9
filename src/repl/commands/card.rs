//! # Card Commands
//!
//! Commands addressing one movie on the current page by id.

use super::{Command, CommandContext, CommandEvent, CommandInput};
use crate::repl::models::MovieId;
use anyhow::{anyhow, bail, Result};

/// Parse the id argument and make sure the movie is on screen
fn visible_movie_id(input: &CommandInput, context: &CommandContext) -> Result<MovieId> {
    let id = input
        .argument()
        .parse::<MovieId>()
        .map_err(|_| anyhow!("Usage: {} <id>", input.verb()))?;
    if !context.is_visible(id) {
        bail!("Movie {id} is not on this page");
    }
    Ok(id)
}

/// Expand or collapse a card (`show <id>`)
pub struct ShowCardCommand;

impl Command for ShowCardCommand {
    fn is_relevant(&self, _context: &CommandContext, input: &CommandInput) -> bool {
        input.is(&["show", "toggle"])
    }

    fn execute(&self, input: &CommandInput, context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let id = visible_movie_id(input, context)?;
        Ok(vec![CommandEvent::CardToggleRequested { id }])
    }

    fn name(&self) -> &'static str {
        "ShowCard"
    }

    fn usage(&self) -> &'static str {
        "show <id>                   expand or collapse a movie"
    }
}

/// Delete a movie (`delete <id>`)
pub struct DeleteMovieCommand;

impl Command for DeleteMovieCommand {
    fn is_relevant(&self, _context: &CommandContext, input: &CommandInput) -> bool {
        input.is(&["delete", "rm"])
    }

    fn execute(&self, input: &CommandInput, context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let id = visible_movie_id(input, context)?;
        Ok(vec![CommandEvent::DeleteRequested { id }])
    }

    fn name(&self) -> &'static str {
        "DeleteMovie"
    }

    fn usage(&self) -> &'static str {
        "delete <id>                 delete a movie"
    }
}

/// Clear a card's error (`dismiss <id>`)
pub struct DismissErrorCommand;

impl Command for DismissErrorCommand {
    fn is_relevant(&self, _context: &CommandContext, input: &CommandInput) -> bool {
        input.is(&["dismiss"])
    }

    fn execute(&self, input: &CommandInput, context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let id = visible_movie_id(input, context)?;
        Ok(vec![CommandEvent::DismissErrorRequested { id }])
    }

    fn name(&self) -> &'static str {
        "DismissError"
    }

    fn usage(&self) -> &'static str {
        "dismiss <id>                clear a movie's error"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::commands::ViewModelSnapshot;

    fn context() -> CommandContext {
        CommandContext::new(ViewModelSnapshot {
            visible_ids: vec![7],
        })
    }

    #[test]
    fn delete_should_target_visible_movie() {
        let input = CommandInput::parse("rm 7").unwrap();
        let events = DeleteMovieCommand.execute(&input, &context()).unwrap();
        assert_eq!(events, vec![CommandEvent::DeleteRequested { id: 7 }]);
    }

    #[test]
    fn show_should_reject_movie_not_on_page() {
        let input = CommandInput::parse("show 8").unwrap();
        let error = ShowCardCommand.execute(&input, &context()).unwrap_err();
        assert_eq!(error.to_string(), "Movie 8 is not on this page");
    }

    #[test]
    fn missing_id_should_print_usage() {
        let input = CommandInput::parse("dismiss").unwrap();
        let error = DismissErrorCommand.execute(&input, &context()).unwrap_err();
        assert_eq!(error.to_string(), "Usage: dismiss <id>");
    }
}
