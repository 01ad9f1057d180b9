//! # Controllers Module
//!
//! The application controller owns the event loop: it reads input lines,
//! runs page loads and hands view events to the renderer.

pub mod app_controller;

pub use app_controller::AppController;
