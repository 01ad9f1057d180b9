//! # Import File Parser
//!
//! Turns the plain-text import format into candidate movies:
//!
//! ```text
//! Title: Blazing Saddles
//! Release Year: 1974
//! Format: VHS
//! Stars: Mel Brooks, Clevon Little, Harvey Korman
//!
//! Title: Casablanca
//! ...
//! ```
//!
//! Blocks are separated by blank lines. A block that lacks a field or carries
//! an invalid one is skipped without failing the rest of the file.

use crate::repl::models::{MovieFormat, NewMovie};
use regex::Regex;
use std::sync::LazyLock;

/// A newline, optional whitespace (including `\r` and blank lines), a newline
static BLOCK_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("block separator pattern is valid"));

const TITLE_KEY: &str = "Title";
const YEAR_KEY: &str = "Release Year";
const FORMAT_KEY: &str = "Format";
const STARS_KEY: &str = "Stars";

/// Import text that can be walked for candidates any number of times
#[derive(Debug, Clone, Copy)]
pub struct ImportDocument<'a> {
    text: &'a str,
}

impl<'a> ImportDocument<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Lazily parse the document; each call starts from the top
    pub fn candidates(&self) -> Candidates<'a> {
        Candidates {
            blocks: BLOCK_SEPARATOR.split(self.text),
        }
    }
}

impl<'a> IntoIterator for &ImportDocument<'a> {
    type Item = NewMovie;
    type IntoIter = Candidates<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates()
    }
}

/// Iterator over the valid candidates of an [`ImportDocument`]
pub struct Candidates<'a> {
    blocks: regex::Split<'static, 'a>,
}

impl Iterator for Candidates<'_> {
    type Item = NewMovie;

    fn next(&mut self) -> Option<NewMovie> {
        self.blocks.by_ref().find_map(parse_block)
    }
}

/// Parse every valid candidate of `text` eagerly
pub fn parse_movies(text: &str) -> Vec<NewMovie> {
    ImportDocument::new(text).candidates().collect()
}

/// Fields collected from one block before validation
#[derive(Debug, Default)]
struct BlockFields {
    title: String,
    year: Option<i64>,
    format: Option<MovieFormat>,
    actors: Vec<String>,
}

fn parse_block(block: &str) -> Option<NewMovie> {
    let mut fields = BlockFields::default();
    let mut seen_line = false;

    for line in block.lines().filter(|line| !line.trim().is_empty()) {
        seen_line = true;
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();

        match key.trim() {
            TITLE_KEY => fields.title = value.to_string(),
            YEAR_KEY => fields.year = parse_leading_int(value),
            FORMAT_KEY => {
                if let Ok(format) = value.parse::<MovieFormat>() {
                    fields.format = Some(format);
                }
            }
            STARS_KEY => {
                fields.actors = value
                    .split(',')
                    .map(str::trim)
                    .filter(|actor| !actor.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            _ => {}
        }
    }

    if !seen_line {
        return None;
    }

    let candidate = match fields {
        BlockFields {
            title,
            year: Some(year),
            format: Some(format),
            actors,
        } => NewMovie::new(title, year, format, actors),
        incomplete => {
            tracing::debug!(?incomplete, "Skipping import block with missing or invalid fields");
            return None;
        }
    };
    if !candidate.is_valid() {
        tracing::debug!(?candidate, "Skipping import block without a title or actors");
        return None;
    }
    Some(candidate)
}

/// Parse an optionally signed run of leading digits, ignoring anything after
///
/// "1999", "1999 (remastered)" and "+1999" all give 1999; "" and "abc" give
/// `None`. Range checks are left to the server.
fn parse_leading_int(value: &str) -> Option<i64> {
    let (sign, digits) = match value.strip_prefix('-') {
        Some(rest) => (-1i64, rest),
        None => (1i64, value.strip_prefix('+').unwrap_or(value)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(sign * magnitude)
}
