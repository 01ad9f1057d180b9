//! # Command Context
//!
//! The parsed input line and a read-only snapshot of ViewModel state that
//! commands consult before producing events.

use crate::repl::models::MovieId;
use crate::repl::view_models::ViewModel;

/// One input line split into a verb and the rest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInput {
    verb: String,
    argument: String,
}

impl CommandInput {
    /// Split a line at the first whitespace; blank lines yield `None`
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (verb, argument) = line
            .split_once(char::is_whitespace)
            .unwrap_or((line, ""));
        Some(Self {
            verb: verb.to_lowercase(),
            argument: argument.trim().to_string(),
        })
    }

    pub fn verb(&self) -> &str {
        &self.verb
    }

    pub fn argument(&self) -> &str {
        &self.argument
    }

    /// True when the verb is one of `names`
    pub fn is(&self, names: &[&str]) -> bool {
        names.contains(&self.verb.as_str())
    }
}

/// Read-only snapshot of ViewModel state for commands
#[derive(Debug, Clone, Default)]
pub struct ViewModelSnapshot {
    /// Ids of the movies on the current page
    pub visible_ids: Vec<MovieId>,
}

impl ViewModelSnapshot {
    /// Create snapshot from current ViewModel state
    pub fn from_view_model(view_model: &ViewModel) -> Self {
        Self {
            visible_ids: view_model
                .store()
                .movies()
                .iter()
                .map(|movie| movie.id)
                .collect(),
        }
    }
}

/// Base context available to all commands
pub struct CommandContext {
    pub state: ViewModelSnapshot,
}

impl CommandContext {
    pub fn new(state: ViewModelSnapshot) -> Self {
        Self { state }
    }

    pub fn is_visible(&self, id: MovieId) -> bool {
        self.state.visible_ids.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_should_split_verb_and_argument() {
        let input = CommandInput::parse("  Title   The Matrix  ").unwrap();
        assert_eq!(input.verb(), "title");
        assert_eq!(input.argument(), "The Matrix");
    }

    #[test]
    fn parse_should_accept_bare_verb() {
        let input = CommandInput::parse("next").unwrap();
        assert_eq!(input.verb(), "next");
        assert_eq!(input.argument(), "");
        assert!(input.is(&["n", "next"]));
    }

    #[test]
    fn parse_should_skip_blank_lines() {
        assert_eq!(CommandInput::parse("   "), None);
    }
}
