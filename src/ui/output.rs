//! Output abstraction layer
//!
//! Commands report progress through `OutputWriter`, so the same command code
//! can print colored lines to a terminal or collect messages in tests.

use colored::Colorize;
use std::sync::Mutex;

/// Severity of a user-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Plain result output
    Normal,
    /// Error message
    Error,
    /// Success message
    Success,
    /// Warning message
    Warning,
    /// Info message (dimmed/secondary)
    Info,
}

/// Trait for output operations
///
/// # Examples
///
/// ```
/// use catalogr::ui::output::{OutputWriter, StdoutWriter};
///
/// let output = StdoutWriter::new(false);
/// output.success("Catalog is up");
/// output.info("42 entries loaded");
/// ```
pub trait OutputWriter: Send + Sync {
    /// Emit a message at the given level
    fn emit(&self, level: MessageLevel, message: &str);

    /// Write a normal message
    fn write(&self, message: &str) {
        self.emit(MessageLevel::Normal, message);
    }

    /// Write an error message
    fn error(&self, message: &str) {
        self.emit(MessageLevel::Error, message);
    }

    /// Write a success message
    fn success(&self, message: &str) {
        self.emit(MessageLevel::Success, message);
    }

    /// Write a warning message
    fn warning(&self, message: &str) {
        self.emit(MessageLevel::Warning, message);
    }

    /// Write an info message
    fn info(&self, message: &str) {
        self.emit(MessageLevel::Info, message);
    }
}

/// CLI implementation - writes to stdout/stderr
///
/// In quiet mode only results and errors are printed.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutWriter {
    quiet: bool,
}

impl StdoutWriter {
    /// Create a new stdout writer
    #[must_use]
    pub const fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl OutputWriter for StdoutWriter {
    fn emit(&self, level: MessageLevel, message: &str) {
        match level {
            MessageLevel::Normal => println!("{message}"),
            MessageLevel::Error => eprintln!("{} {}", "❌".red(), message),
            _ if self.quiet => {}
            MessageLevel::Success => println!("{} {}", "✓".green(), message),
            MessageLevel::Warning => println!("{} {}", "⚠️".yellow(), message),
            MessageLevel::Info => println!("{}", message.dimmed()),
        }
    }
}

/// Collects messages in memory
#[derive(Debug, Default)]
pub struct BufferedWriter {
    messages: Mutex<Vec<(MessageLevel, String)>>,
}

impl BufferedWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages written so far
    #[must_use]
    pub fn messages(&self) -> Vec<(MessageLevel, String)> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }

    /// Only the `Normal` output lines
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|(level, _)| *level == MessageLevel::Normal)
            .map(|(_, message)| message)
            .collect()
    }
}

impl OutputWriter for BufferedWriter {
    fn emit(&self, level: MessageLevel, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push((level, message.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffered_writer_records_levels() {
        let writer = BufferedWriter::new();

        writer.write("entry");
        writer.error("failed");
        writer.info("hint");

        assert_eq!(
            writer.messages(),
            vec![
                (MessageLevel::Normal, "entry".to_string()),
                (MessageLevel::Error, "failed".to_string()),
                (MessageLevel::Info, "hint".to_string()),
            ]
        );
        assert_eq!(writer.lines(), vec!["entry".to_string()]);
    }

    #[test]
    fn test_stdout_writer_creation() {
        let _writer = StdoutWriter::new(true);
        let _writer2 = StdoutWriter::default();
    }
}
