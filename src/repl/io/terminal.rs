//! # Terminal I/O Implementations
//!
//! Production implementations of the I/O abstractions: lines come from
//! stdin through tokio, output goes through crossterm.

use super::{LineStream, RenderStream};
use anyhow::Result;
use async_trait::async_trait;
use crossterm::terminal::{Clear, ClearType};
use crossterm::{cursor, execute};
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Line stream reading stdin
pub struct TerminalLineStream {
    lines: Lines<BufReader<Stdin>>,
    interactive: bool,
}

impl TerminalLineStream {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
            interactive: atty::is(atty::Stream::Stdin),
        }
    }
}

impl Default for TerminalLineStream {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LineStream for TerminalLineStream {
    async fn next_line(&mut self) -> Result<Option<String>> {
        Ok(self.lines.next_line().await?)
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Terminal-based render stream using crossterm
pub struct TerminalRenderStream<W: Write> {
    writer: W,
    color: bool,
}

impl TerminalRenderStream<io::Stdout> {
    /// Create a new terminal render stream using stdout
    pub fn new() -> Self {
        Self {
            writer: io::stdout(),
            color: atty::is(atty::Stream::Stdout),
        }
    }
}

impl Default for TerminalRenderStream<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderStream<W> {
    /// Create a terminal render stream with custom writer and no styling
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            color: false,
        }
    }
}

impl<W: Write> Write for TerminalRenderStream<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match std::str::from_utf8(buf) {
            Ok(text) => {
                execute!(self.writer, crossterm::style::Print(text))?;
                Ok(buf.len())
            }
            Err(_) => self.writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl<W: Write + Send> RenderStream for TerminalRenderStream<W> {
    fn clear_screen(&mut self) -> Result<()> {
        execute!(self.writer, Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        Ok(())
    }

    fn supports_color(&self) -> bool {
        self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_writer_should_receive_text() {
        let mut stream = TerminalRenderStream::with_writer(Vec::new());
        write!(stream, "Page 1").unwrap();

        assert_eq!(stream.writer, b"Page 1");
        assert!(!stream.supports_color());
    }
}
