//! # MVVM Architecture Implementation
//!
//! This module contains the MVVM implementation for MovieLine.
//! Input lines become commands, commands drive the ViewModel, and the
//! ViewModel tells the renderer which parts of the screen went stale.

pub mod commands;
pub mod controllers;
pub mod events;
pub mod io;
pub mod models;
pub mod services;
pub mod testing;
pub mod utils;
pub mod view_models;
pub mod views;

// Re-export core types
pub use controllers::AppController;
pub use events::*;
pub use view_models::*;
pub use views::*;

// Re-export specific items from commands to avoid conflicts
pub use commands::{Command, CommandContext, CommandEvent, CommandRegistry, ViewModelSnapshot};

// Re-export specific items from models and services to avoid conflicts
pub use models::{Movie, MovieFormat, MovieId, MovieStore, NewMovie};
pub use services::{ApiError, HttpMoviesApi, MoviesApi};
