//! # List Commands
//!
//! Page navigation, reload and the two filter inputs.

use super::{Command, CommandContext, CommandEvent, CommandInput};
use crate::repl::view_models::FilterField;
use anyhow::Result;

/// Reload the current page (`list`, `reload`)
pub struct ReloadCommand;

impl Command for ReloadCommand {
    fn is_relevant(&self, _context: &CommandContext, input: &CommandInput) -> bool {
        input.is(&["list", "ls", "reload"])
    }

    fn execute(&self, _input: &CommandInput, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::ReloadRequested])
    }

    fn name(&self) -> &'static str {
        "Reload"
    }

    fn usage(&self) -> &'static str {
        "list | reload               reload the current page"
    }
}

/// Go to the next page (`next`, `n`)
pub struct NextPageCommand;

impl Command for NextPageCommand {
    fn is_relevant(&self, _context: &CommandContext, input: &CommandInput) -> bool {
        input.is(&["next", "n"])
    }

    fn execute(&self, _input: &CommandInput, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::NextPageRequested])
    }

    fn name(&self) -> &'static str {
        "NextPage"
    }

    fn usage(&self) -> &'static str {
        "next                        go to the next page"
    }
}

/// Go to the previous page (`prev`, `p`)
pub struct PreviousPageCommand;

impl Command for PreviousPageCommand {
    fn is_relevant(&self, _context: &CommandContext, input: &CommandInput) -> bool {
        input.is(&["prev", "previous", "p"])
    }

    fn execute(&self, _input: &CommandInput, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::PreviousPageRequested])
    }

    fn name(&self) -> &'static str {
        "PreviousPage"
    }

    fn usage(&self) -> &'static str {
        "prev                        go to the previous page"
    }
}

/// Type into the title filter; no argument clears it
pub struct TitleFilterCommand;

impl Command for TitleFilterCommand {
    fn is_relevant(&self, _context: &CommandContext, input: &CommandInput) -> bool {
        input.is(&["title"])
    }

    fn execute(&self, input: &CommandInput, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::FilterInputRequested {
            field: FilterField::Title,
            value: input.argument().to_string(),
        }])
    }

    fn name(&self) -> &'static str {
        "TitleFilter"
    }

    fn usage(&self) -> &'static str {
        "title [text]                filter by title (3+ characters)"
    }
}

/// Type into the actor filter; no argument clears it
pub struct ActorFilterCommand;

impl Command for ActorFilterCommand {
    fn is_relevant(&self, _context: &CommandContext, input: &CommandInput) -> bool {
        input.is(&["actor"])
    }

    fn execute(&self, input: &CommandInput, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::FilterInputRequested {
            field: FilterField::Actor,
            value: input.argument().to_string(),
        }])
    }

    fn name(&self) -> &'static str {
        "ActorFilter"
    }

    fn usage(&self) -> &'static str {
        "actor [name]                filter by actor (2+ characters)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::commands::ViewModelSnapshot;

    fn context() -> CommandContext {
        CommandContext::new(ViewModelSnapshot::default())
    }

    #[test]
    fn next_should_be_relevant_for_aliases() {
        let cmd = NextPageCommand;
        assert!(cmd.is_relevant(&context(), &CommandInput::parse("n").unwrap()));
        assert!(cmd.is_relevant(&context(), &CommandInput::parse("NEXT").unwrap()));
        assert!(!cmd.is_relevant(&context(), &CommandInput::parse("prev").unwrap()));
    }

    #[test]
    fn title_filter_should_carry_raw_argument() {
        let input = CommandInput::parse("title The Ma").unwrap();
        let events = TitleFilterCommand.execute(&input, &context()).unwrap();

        assert_eq!(
            events,
            vec![CommandEvent::FilterInputRequested {
                field: FilterField::Title,
                value: "The Ma".into()
            }]
        );
    }

    #[test]
    fn actor_filter_without_argument_should_clear() {
        let input = CommandInput::parse("actor").unwrap();
        let events = ActorFilterCommand.execute(&input, &context()).unwrap();

        assert_eq!(
            events,
            vec![CommandEvent::FilterInputRequested {
                field: FilterField::Actor,
                value: String::new()
            }]
        );
    }
}
