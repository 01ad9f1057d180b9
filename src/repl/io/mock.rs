//! # Mock I/O Implementations for Testing
//!
//! Provides mock implementations of LineStream and RenderStream traits
//! for testing without terminal dependencies.

use super::{LineStream, RenderStream};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

/// One scripted input step
#[derive(Debug, Clone, PartialEq)]
pub enum MockInput {
    Line(String),
    /// Stay silent for a while before the next line
    Pause(Duration),
}

/// Mock line stream replaying a script
///
/// Pauses are tracked as a resume instant so a cancelled read resumes the
/// same pause instead of skipping it.
pub struct MockLineStream {
    script: VecDeque<MockInput>,
    resume_at: Option<Instant>,
}

impl MockLineStream {
    pub fn new(script: Vec<MockInput>) -> Self {
        Self {
            script: script.into_iter().collect(),
            resume_at: None,
        }
    }

    /// Script of plain lines without pauses
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(lines.into_iter().map(|l| MockInput::Line(l.into())).collect())
    }
}

#[async_trait]
impl LineStream for MockLineStream {
    async fn next_line(&mut self) -> Result<Option<String>> {
        loop {
            if let Some(at) = self.resume_at {
                tokio::time::sleep_until(at).await;
                self.resume_at = None;
            }
            match self.script.pop_front() {
                Some(MockInput::Line(line)) => return Ok(Some(line)),
                Some(MockInput::Pause(duration)) => {
                    self.resume_at = Some(Instant::now() + duration);
                }
                None => return Ok(None),
            }
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Recorded render command for verification
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    ClearScreen,
    Write(Vec<u8>),
    Flush,
}

/// Type alias for command history
type CommandHistory = Arc<Mutex<Vec<RenderCommand>>>;

/// Mock render stream capturing everything written
///
/// Clones share the same history, so a test can keep one handle while the
/// controller owns another.
#[derive(Clone, Default)]
pub struct MockRenderStream {
    commands: CommandHistory,
}

impl MockRenderStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_commands(&self) -> Vec<RenderCommand> {
        self.lock().clone()
    }

    pub fn has_command(&self, command: &RenderCommand) -> bool {
        self.lock().contains(command)
    }

    /// All written bytes as text
    pub fn get_buffer_string(&self) -> String {
        let bytes: Vec<u8> = self
            .lock()
            .iter()
            .filter_map(|command| match command {
                RenderCommand::Write(bytes) => Some(bytes.as_slice()),
                _ => None,
            })
            .flatten()
            .copied()
            .collect();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<RenderCommand>> {
        self.commands
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, command: RenderCommand) {
        self.lock().push(command);
    }
}

impl Write for MockRenderStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.record(RenderCommand::Write(buf.to_vec()));
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.record(RenderCommand::Flush);
        Ok(())
    }
}

impl RenderStream for MockRenderStream {
    fn clear_screen(&mut self) -> Result<()> {
        self.record(RenderCommand::ClearScreen);
        Ok(())
    }

    fn supports_color(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn line_stream_should_replay_script_then_end() {
        let mut stream = MockLineStream::from_lines(["list", "quit"]);

        assert_eq!(stream.next_line().await.unwrap().as_deref(), Some("list"));
        assert_eq!(stream.next_line().await.unwrap().as_deref(), Some("quit"));
        assert_eq!(stream.next_line().await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_should_delay_next_line() {
        let start = Instant::now();
        let mut stream = MockLineStream::new(vec![
            MockInput::Pause(Duration::from_millis(600)),
            MockInput::Line("next".into()),
        ]);

        let line = stream.next_line().await.unwrap();

        assert_eq!(line.as_deref(), Some("next"));
        assert!(start.elapsed() >= Duration::from_millis(600));
    }

    #[test]
    fn render_stream_clones_should_share_history() {
        let stream = MockRenderStream::new();
        let mut writer = stream.clone();

        write!(writer, "Movies").unwrap();
        writer.clear_screen().unwrap();

        assert_eq!(stream.get_buffer_string(), "Movies");
        assert!(stream.has_command(&RenderCommand::ClearScreen));
    }
}
