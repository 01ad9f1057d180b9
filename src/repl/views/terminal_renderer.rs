//! # View Layer for the Catalog REPL
//!
//! Views turn ViewModel state into lines of text. They react to view events:
//! a list redraw prints the whole page, a card redraw prints one card, and
//! messages are printed as they arrive.

use crate::repl::events::ViewEvent;
use crate::repl::io::RenderStream;
use crate::repl::models::{Movie, MovieId};
use crate::repl::view_models::{CardErrorKind, ListState, MovieCardViewModel, ViewModel};
use anyhow::Result;
use crossterm::{
    execute,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};

// Helper macro to convert crossterm errors to anyhow errors
macro_rules! execute_term {
    ($($arg:expr),* $(,)?) => {
        execute!($($arg),*).map_err(anyhow::Error::from)
    };
}

pub const LIST_HEADING: &str = "Movies List (A-Z)";
pub const PROMPT: &str = "movieline> ";

/// Trait for rendering views
pub trait ViewRenderer {
    /// Print the current page of movies
    fn render_list(&mut self, view_model: &ViewModel) -> Result<()>;

    /// Print one movie card
    fn render_card(&mut self, view_model: &ViewModel, id: MovieId) -> Result<()>;

    /// Print the one-line status summary
    fn render_status_bar(&mut self, view_model: &ViewModel) -> Result<()>;

    fn render_message(&mut self, message: &str) -> Result<()>;

    fn render_error(&mut self, message: &str) -> Result<()>;

    fn render_help(&mut self, usage: &[&str]) -> Result<()>;

    fn render_prompt(&mut self) -> Result<()>;

    /// Handle a batch of view events
    ///
    /// A list redraw covers every card, so card redraws in the same batch
    /// are skipped.
    fn handle_view_events(&mut self, events: &[ViewEvent], view_model: &ViewModel) -> Result<()> {
        let list_redraw = events.contains(&ViewEvent::ListRedrawRequired);
        let mut drawn_cards: Vec<MovieId> = Vec::new();

        for event in events {
            match event {
                ViewEvent::MessageRequired { message } => self.render_message(message)?,
                ViewEvent::CardRedrawRequired { id } if !list_redraw => {
                    if !drawn_cards.contains(id) {
                        drawn_cards.push(*id);
                        self.render_card(view_model, *id)?;
                    }
                }
                _ => {}
            }
        }
        if list_redraw {
            self.render_list(view_model)?;
        }
        Ok(())
    }
}

/// Line-oriented renderer writing to a [`RenderStream`]
pub struct TerminalRenderer<RS: RenderStream> {
    render_stream: RS,
}

impl<RS: RenderStream> TerminalRenderer<RS> {
    pub fn new(render_stream: RS) -> Self {
        Self { render_stream }
    }

    pub fn clear(&mut self) -> Result<()> {
        self.render_stream.clear_screen()
    }

    fn line(&mut self, text: &str) -> Result<()> {
        execute_term!(self.render_stream, Print(text), Print("\n"))
    }

    fn styled_line(&mut self, text: &str, color: Option<Color>, bold: bool) -> Result<()> {
        if !self.render_stream.supports_color() {
            return self.line(text);
        }
        if let Some(color) = color {
            execute_term!(self.render_stream, SetForegroundColor(color))?;
        }
        if bold {
            execute_term!(self.render_stream, SetAttribute(Attribute::Bold))?;
        }
        execute_term!(
            self.render_stream,
            Print(text),
            SetAttribute(Attribute::Reset),
            ResetColor,
            Print("\n")
        )
    }

    fn movie_line(movie: &Movie) -> String {
        format!(
            "  [{}] {} ({}) {}",
            movie.id,
            movie.title,
            movie.year,
            movie.format.label()
        )
    }

    fn write_card_body(&mut self, id: MovieId, card: &MovieCardViewModel) -> Result<()> {
        if card.is_expanded() {
            if card.is_loading() {
                self.line("      Loading details...")?;
            } else if card.details().is_some() {
                self.line(&format!("      Actors: {}", card.actor_line()))?;
            }
        }
        if card.is_deleting() {
            self.line("      Deleting...")?;
        }
        if let Some(error) = card.error() {
            let show = match error.kind {
                CardErrorKind::Details => card.is_expanded(),
                CardErrorKind::Delete => true,
            };
            if show {
                let label = match error.kind {
                    CardErrorKind::Details => "Could not load details",
                    CardErrorKind::Delete => "Could not delete",
                };
                self.styled_line(
                    &format!("      {label}: {} (dismiss {id})", error.message),
                    Some(Color::Red),
                    false,
                )?;
            }
        }
        Ok(())
    }
}

impl<RS: RenderStream> ViewRenderer for TerminalRenderer<RS> {
    fn render_list(&mut self, view_model: &ViewModel) -> Result<()> {
        let list = view_model.list();
        self.styled_line(LIST_HEADING, None, true)?;

        let filters = list.filters();
        if !filters.is_empty() {
            let mut parts = Vec::new();
            if let Some(title) = &filters.title {
                parts.push(format!("title \"{title}\""));
            }
            if let Some(actor) = &filters.actor {
                parts.push(format!("actor \"{actor}\""));
            }
            self.line(&format!("Filtered by {}", parts.join(", ")))?;
        }

        if let ListState::Errored(message) = list.state() {
            self.styled_line(
                &format!("Could not load movies: {message}"),
                Some(Color::Red),
                false,
            )?;
        }

        if view_model.store().is_empty() {
            self.line("  No movies found.")?;
        }
        for movie in view_model.store().movies() {
            self.line(&Self::movie_line(movie))?;
            if let Some(card) = view_model.card(movie.id) {
                self.write_card_body(movie.id, card)?;
            }
        }

        let mut footer = format!("Page {}", list.page());
        if list.page() > 1 {
            footer.push_str("  < prev");
        }
        if list.has_more() {
            footer.push_str("  next >");
        }
        self.line(&footer)?;
        self.render_status_bar(view_model)?;
        self.render_stream.flush()?;
        Ok(())
    }

    fn render_card(&mut self, view_model: &ViewModel, id: MovieId) -> Result<()> {
        let Some(movie) = view_model.store().get(id) else {
            return Ok(());
        };
        self.line(&Self::movie_line(movie))?;
        if let Some(card) = view_model.card(id) {
            self.write_card_body(id, card)?;
        }
        self.render_stream.flush()?;
        Ok(())
    }

    fn render_status_bar(&mut self, view_model: &ViewModel) -> Result<()> {
        let status = view_model.status_line();
        let pagination = view_model.list().pagination();
        let mut text = format!(
            "[{}] {} movies",
            status.profile_name(),
            pagination.total()
        );
        if view_model.list().is_loading() {
            text.push_str(" | loading");
        }
        if let Some(summary) = status.api_status().summary() {
            text.push_str(&format!(" | {summary}"));
        }
        self.styled_line(&text, Some(Color::DarkGrey), false)
    }

    fn render_message(&mut self, message: &str) -> Result<()> {
        self.styled_line(message, Some(Color::Cyan), false)?;
        self.render_stream.flush()?;
        Ok(())
    }

    fn render_error(&mut self, message: &str) -> Result<()> {
        self.styled_line(&format!("Error: {message}"), Some(Color::Red), false)?;
        self.render_stream.flush()?;
        Ok(())
    }

    fn render_help(&mut self, usage: &[&str]) -> Result<()> {
        self.styled_line("Commands:", None, true)?;
        for line in usage {
            self.line(&format!("  {line}"))?;
        }
        self.render_stream.flush()?;
        Ok(())
    }

    fn render_prompt(&mut self) -> Result<()> {
        execute_term!(self.render_stream, Print(PROMPT))?;
        self.render_stream.flush()?;
        Ok(())
    }
}
