//! # Movie Model
//!
//! Catalog records as they travel between the import parser, the API and the
//! local store: a [`NewMovie`] is a candidate that has not been submitted yet,
//! a [`Movie`] carries the identifier the server assigned to it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Server-assigned movie identifier
pub type MovieId = u64;

/// Physical or digital release format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovieFormat {
    #[serde(rename = "DVD")]
    Dvd,
    #[serde(rename = "Blu-ray")]
    BluRay,
    #[serde(rename = "Digital")]
    Digital,
    #[serde(rename = "VHS")]
    Vhs,
}

impl MovieFormat {
    /// Every known format, in the order forms present them
    pub const ALL: [MovieFormat; 4] = [
        MovieFormat::Dvd,
        MovieFormat::BluRay,
        MovieFormat::Digital,
        MovieFormat::Vhs,
    ];

    /// Wire label used by the API and the import file
    pub fn label(&self) -> &'static str {
        match self {
            MovieFormat::Dvd => "DVD",
            MovieFormat::BluRay => "Blu-ray",
            MovieFormat::Digital => "Digital",
            MovieFormat::Vhs => "VHS",
        }
    }
}

impl fmt::Display for MovieFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string is not one of the four format labels
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown movie format '{0}'")]
pub struct UnknownFormat(pub String);

impl FromStr for MovieFormat {
    type Err = UnknownFormat;

    /// Labels match exactly; "dvd" or "Bluray" are rejected like the server does
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MovieFormat::ALL
            .into_iter()
            .find(|format| format.label() == s)
            .ok_or_else(|| UnknownFormat(s.to_string()))
    }
}

/// A movie description that has not been submitted to the server yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewMovie {
    pub title: String,
    pub year: i64,
    pub format: MovieFormat,
    pub actors: Vec<String>,
}

impl NewMovie {
    pub fn new<T: Into<String>>(title: T, year: i64, format: MovieFormat, actors: Vec<String>) -> Self {
        Self {
            title: title.into(),
            year,
            format,
            actors,
        }
    }

    /// True when the record satisfies the candidate invariants
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty()
            && !self.actors.is_empty()
            && self.actors.iter().all(|actor| !actor.trim().is_empty())
    }
}

/// Actor entry as returned by the detail endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
}

/// A movie entity known to the server
///
/// List responses omit the actors, so `actors` is empty for summaries and
/// only filled in by the detail endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub year: i64,
    pub format: MovieFormat,
    #[serde(default)]
    pub actors: Vec<Actor>,
}

impl Movie {
    /// Actor names joined for display
    pub fn actor_names(&self) -> Vec<&str> {
        self.actors.iter().map(|actor| actor.name.as_str()).collect()
    }
}
