//! # Form Management
//!
//! The add-movie form and the bulk import entry point. Both append created
//! movies to the store instead of reloading the page.

use crate::repl::events::{ModelEvent, ViewEvent};
use crate::repl::models::{MovieFormat, NewMovie};
use crate::repl::services::{BulkImporter, ImportError, ImportTally};
use crate::repl::view_models::core::ViewModel;
use std::path::Path;
use std::sync::Arc;

pub const FORM_INCOMPLETE: &str = "Please fill in all fields.";
pub const FORM_ADDED: &str = "Movie added successfully!";
pub const FORM_FAILED: &str = "Failed to add movie.";

/// Raw add-movie form fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddMovieForm {
    pub title: String,
    pub year: String,
    pub format: String,
    pub actors: Vec<String>,
}

impl Default for AddMovieForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            year: String::new(),
            format: MovieFormat::Dvd.label().to_string(),
            actors: vec![String::new()],
        }
    }
}

impl AddMovieForm {
    /// Read `title | year | format | actor, actor` into form fields
    ///
    /// Missing trailing fields stay at their defaults: an empty year, the
    /// DVD format and a single blank actor.
    pub fn from_line(line: &str) -> Self {
        let mut fields = line.split('|').map(str::trim);
        let mut form = Self::default();
        if let Some(title) = fields.next() {
            form.title = title.to_string();
        }
        if let Some(year) = fields.next() {
            form.year = year.to_string();
        }
        if let Some(format) = fields.next().filter(|format| !format.is_empty()) {
            form.format = format.to_string();
        }
        if let Some(actors) = fields.next() {
            form.actors = actors.split(',').map(|a| a.trim().to_string()).collect();
        }
        form
    }

    /// Check the fields and build the record to submit
    pub fn validate(&self) -> Option<NewMovie> {
        let year = self.year.trim().parse::<i64>().ok().filter(|year| *year != 0)?;
        let format = self.format.parse::<MovieFormat>().ok()?;
        let movie = NewMovie::new(
            self.title.trim(),
            year,
            format,
            self.actors.iter().map(|a| a.trim().to_string()).collect(),
        );
        movie.is_valid().then_some(movie)
    }
}

impl ViewModel {
    /// Submit the add-movie form
    ///
    /// Returns the message shown to the user.
    pub async fn add_movie(&mut self, form: &AddMovieForm) -> &'static str {
        let Some(movie) = form.validate() else {
            tracing::debug!(?form, "Add form incomplete");
            self.emit_message(FORM_INCOMPLETE);
            return FORM_INCOMPLETE;
        };

        let api = Arc::clone(&self.api);
        let started = std::time::Instant::now();
        let result = api.create_movie(&movie).await;
        self.record_api_call("create", result.is_ok(), started.elapsed());

        let message = match result {
            Ok(created) => {
                tracing::info!(id = created.id, title = %created.title, "Movie added");
                let event = self.store.append(created);
                self.publish_model_event(event);
                self.emit_view_event(ViewEvent::ListRedrawRequired);
                FORM_ADDED
            }
            Err(e) => {
                let reason = if e.is_movie_exists() {
                    "title already exists"
                } else if e.is_year_out_of_range() {
                    "year out of range"
                } else {
                    "request failed"
                };
                tracing::error!(title = %movie.title, reason, "Error adding movie: {}", e);
                FORM_FAILED
            }
        };
        self.emit_message(message);
        message
    }

    /// Import movies from a text file
    pub async fn import_file(&mut self, path: &Path) -> Result<ImportTally, ImportError> {
        let api = Arc::clone(&self.api);
        let started = std::time::Instant::now();
        let result = BulkImporter::new(api.as_ref())
            .import_file(path, self.import_encoding, &mut self.store)
            .await;
        self.report_import(&result, started.elapsed());
        result
    }

    /// Import movies from already decoded text
    pub async fn import_text(&mut self, text: &str) -> ImportTally {
        let api = Arc::clone(&self.api);
        let started = std::time::Instant::now();
        let tally = BulkImporter::new(api.as_ref())
            .import_text(text, &mut self.store)
            .await;
        self.report_import(&Ok(tally), started.elapsed());
        tally
    }

    fn report_import(
        &mut self,
        result: &Result<ImportTally, ImportError>,
        duration: std::time::Duration,
    ) {
        self.record_api_call("import", result.is_ok(), duration);
        match result {
            Ok(tally) => {
                self.publish_model_event(ModelEvent::ImportCompleted {
                    succeeded: tally.succeeded,
                    failed: tally.failed,
                });
                if tally.succeeded > 0 {
                    self.emit_view_event(ViewEvent::ListRedrawRequired);
                }
                self.emit_message(tally.summary());
            }
            Err(e) => self.emit_message(e.to_string()),
        }
    }
}
