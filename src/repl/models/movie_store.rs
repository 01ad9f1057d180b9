//! # Movie Store
//!
//! Local mirror of the movies the list should render for the current page.
//! The store holds no pagination or filtering logic: it only reflects the
//! last authoritative fetch and the mutations applied since.

use super::movie::{Movie, MovieId};
use crate::repl::events::ModelEvent;

/// Insertion-ordered collection of movies keyed by id
#[derive(Debug, Clone, Default)]
pub struct MovieStore {
    movies: Vec<Movie>,
}

impl MovieStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn get(&self, id: MovieId) -> Option<&Movie> {
        self.movies.iter().find(|movie| movie.id == id)
    }

    pub fn contains(&self, id: MovieId) -> bool {
        self.get(id).is_some()
    }

    /// Discard the current contents and install a new page
    pub fn replace_all(&mut self, movies: Vec<Movie>) -> ModelEvent {
        self.movies = movies;
        ModelEvent::MoviesReplaced {
            count: self.movies.len(),
        }
    }

    /// Add one movie at the end
    pub fn append(&mut self, movie: Movie) -> ModelEvent {
        let id = movie.id;
        self.movies.push(movie);
        ModelEvent::MovieAppended { id }
    }

    /// Remove the movie with `id`, if present
    pub fn remove(&mut self, id: MovieId) -> Option<ModelEvent> {
        let index = self.movies.iter().position(|movie| movie.id == id)?;
        self.movies.remove(index);
        Some(ModelEvent::MovieRemoved {
            id,
            remaining: self.movies.len(),
        })
    }
}
