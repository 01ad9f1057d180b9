//! Testing infrastructure for catalog components
//!
//! Provides an in-memory [`MoviesApi`] that sorts, filters and pages like
//! the real server, so view models and the controller can be exercised
//! without a network.

use crate::repl::models::{Actor, Movie, MovieId, MovieQuery, NewMovie, SortKey, SortOrder};
use crate::repl::services::http::{ApiError, MoviePage, MoviesApi, FORMAT_ERROR, MOVIE_EXISTS, NOT_FOUND};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;

/// Years the fake server accepts
const VALID_YEARS: std::ops::RangeInclusive<i64> = 1850..=2100;

#[derive(Debug, Default)]
struct FakeState {
    movies: Vec<Movie>,
    next_id: MovieId,
    rejected_titles: HashSet<String>,
    created_titles: Vec<String>,
    queries: Vec<MovieQuery>,
    fail_lists: usize,
    fail_details: bool,
    fail_deletes: bool,
}

/// In-memory movie catalog implementing [`MoviesApi`]
#[derive(Debug, Default)]
pub struct InMemoryMoviesApi {
    state: Mutex<FakeState>,
}

impl InMemoryMoviesApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog pre-filled with `count` movies titled "Movie 01", "Movie 02", ...
    pub fn with_numbered_movies(count: usize) -> Self {
        let api = Self::new();
        for n in 1..=count {
            api.insert(NewMovie::new(
                format!("Movie {n:02}"),
                2000,
                crate::repl::models::MovieFormat::Dvd,
                vec![format!("Actor {n}")],
            ));
        }
        api
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Store a movie directly, bypassing validation
    pub fn insert(&self, movie: NewMovie) -> Movie {
        let mut state = self.lock();
        state.next_id += 1;
        let movie = Movie {
            id: state.next_id,
            title: movie.title,
            year: movie.year,
            format: movie.format,
            actors: movie
                .actors
                .into_iter()
                .map(|name| Actor { id: None, name })
                .collect(),
        };
        state.movies.push(movie.clone());
        movie
    }

    /// Make creates with this title fail
    pub fn reject_title(&self, title: &str) {
        self.lock().rejected_titles.insert(title.to_string());
    }

    /// Make the next `count` list calls fail
    pub fn fail_next_lists(&self, count: usize) {
        self.lock().fail_lists = count;
    }

    pub fn set_fail_details(&self, fail: bool) {
        self.lock().fail_details = fail;
    }

    pub fn set_fail_deletes(&self, fail: bool) {
        self.lock().fail_deletes = fail;
    }

    /// Titles passed to successful or failed creates, in call order
    pub fn created_titles(&self) -> Vec<String> {
        self.lock().created_titles.clone()
    }

    /// Queries received by `list_movies`, in call order
    pub fn queries(&self) -> Vec<MovieQuery> {
        self.lock().queries.clone()
    }

    pub fn movie_count(&self) -> usize {
        self.lock().movies.len()
    }

    fn summary(movie: &Movie) -> Movie {
        Movie {
            actors: Vec::new(),
            ..movie.clone()
        }
    }

    fn rejected(code: &str, fields: &[&str]) -> ApiError {
        ApiError::Rejected {
            code: code.to_string(),
            fields: fields.iter().map(|field| field.to_string()).collect(),
        }
    }
}

#[async_trait]
impl MoviesApi for InMemoryMoviesApi {
    async fn list_movies(&self, query: &MovieQuery) -> Result<MoviePage, ApiError> {
        let mut state = self.lock();
        state.queries.push(query.clone());
        if state.fail_lists > 0 {
            state.fail_lists -= 1;
            return Err(ApiError::Status {
                status: 500,
                body: "Internal Server Error".to_string(),
            });
        }

        let contains = |haystack: &str, needle: &str| {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        };
        let mut matches: Vec<&Movie> = state
            .movies
            .iter()
            .filter(|movie| {
                query
                    .filters
                    .title
                    .as_deref()
                    .map_or(true, |title| contains(&movie.title, title))
            })
            .filter(|movie| {
                query.filters.actor.as_deref().map_or(true, |actor| {
                    movie.actors.iter().any(|a| contains(&a.name, actor))
                })
            })
            .collect();

        matches.sort_by(|a, b| {
            let ordering = match query.sort {
                SortKey::Id => a.id.cmp(&b.id),
                SortKey::Title => a.title.cmp(&b.title).then(a.id.cmp(&b.id)),
                SortKey::Year => a.year.cmp(&b.year).then(a.id.cmp(&b.id)),
            };
            match query.order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });

        let total = matches.len() as u64;
        let movies = matches
            .into_iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .map(Self::summary)
            .collect();

        Ok(MoviePage { movies, total })
    }

    async fn get_movie(&self, id: MovieId) -> Result<Movie, ApiError> {
        let state = self.lock();
        if state.fail_details {
            return Err(Self::rejected(NOT_FOUND, &["id"]));
        }
        state
            .movies
            .iter()
            .find(|movie| movie.id == id)
            .cloned()
            .ok_or_else(|| Self::rejected(NOT_FOUND, &["id"]))
    }

    async fn create_movie(&self, movie: &NewMovie) -> Result<Movie, ApiError> {
        {
            let mut state = self.lock();
            state.created_titles.push(movie.title.clone());
            if state.rejected_titles.contains(&movie.title) {
                return Err(Self::rejected(FORMAT_ERROR, &["title"]));
            }
            if state.movies.iter().any(|existing| existing.title == movie.title) {
                return Err(Self::rejected(MOVIE_EXISTS, &["title"]));
            }
            if !VALID_YEARS.contains(&movie.year) {
                return Err(Self::rejected(FORMAT_ERROR, &["year"]));
            }
        }
        Ok(Self::summary(&self.insert(movie.clone())))
    }

    async fn delete_movie(&self, id: MovieId) -> Result<(), ApiError> {
        let mut state = self.lock();
        if state.fail_deletes {
            return Err(ApiError::Status {
                status: 500,
                body: "Internal Server Error".to_string(),
            });
        }
        let index = state
            .movies
            .iter()
            .position(|movie| movie.id == id)
            .ok_or_else(|| Self::rejected(NOT_FOUND, &["id"]))?;
        state.movies.remove(index);
        Ok(())
    }
}
