//! User interface layer
//!
//! - **`output`**: `OutputWriter` and its stdout and buffered implementations,
//!   used by the one-shot commands
//! - **`tui`**: the interactive ratatui browser
//!
//! Both share `MessageLevel`, so the status bar and the CLI style messages the
//! same way.
//!
//! ```
//! use catalogr::ui::output::{BufferedWriter, OutputWriter};
//!
//! let output = BufferedWriter::new();
//! output.write("entry-1");
//! output.info("Showing 1-1 of 1");
//! assert_eq!(output.lines(), vec!["entry-1"]);
//! ```

mod error;

pub mod output;
pub mod tui;

pub use error::{Result, UiError};
pub use output::{BufferedWriter, MessageLevel, OutputWriter, StdoutWriter};
