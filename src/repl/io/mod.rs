//! # I/O Abstraction Layer
//!
//! Provides trait abstractions for the input lines and rendered output of
//! the REPL so the controller can be driven without a terminal.
//!
//! ## Architecture
//!
//! ```text
//! Production:  AppController ──▶ TerminalLineStream   ──▶ tokio::io::stdin()
//!                            ──▶ TerminalRenderStream ──▶ crossterm::execute!()
//!
//! Testing:     AppController ──▶ MockLineStream       ──▶ VecDeque<MockInput>
//!                            ──▶ MockRenderStream     ──▶ Arc<Mutex<Vec<RenderCommand>>>
//! ```

use anyhow::Result;
use async_trait::async_trait;
use std::io::Write;

pub mod mock;
pub mod terminal;

// Re-export terminal implementations for convenience
pub use terminal::{TerminalLineStream, TerminalRenderStream};

// Re-export mock implementations for testing
pub use mock::{MockInput, MockLineStream, MockRenderStream, RenderCommand};

/// Input line stream abstraction
#[async_trait]
pub trait LineStream: Send {
    /// Read the next line; `None` once input is exhausted
    ///
    /// Must be cancel safe: the controller races it against page responses
    /// and filter deadlines.
    async fn next_line(&mut self) -> Result<Option<String>>;

    /// Whether a person is typing, so a prompt is worth printing
    fn is_interactive(&self) -> bool;
}

/// Output render stream abstraction
pub trait RenderStream: Write + Send {
    /// Clear the entire screen
    fn clear_screen(&mut self) -> Result<()>;

    /// Whether ANSI styling should be emitted
    fn supports_color(&self) -> bool;
}
