//! Line-oriented output sinks.
//!
//! Operations report through an [`OutputSink`] owned by the caller. The
//! core never queries display state; it only writes lines and asks the
//! sink to become visible or come to the foreground. Which of those two
//! happens on completion is a caller preference, not a sink decision.

use std::io::{self, IsTerminal};
use std::sync::Mutex;

/// Destination for operation output.
///
/// Implementations decide what "visible" and "foreground" mean for their
/// surface; for a plain terminal both are no-ops.
pub trait OutputSink {
    /// Write one line of normal output.
    fn write_line(&self, line: &str);

    /// Write one line of error output.
    fn write_error_line(&self, line: &str);

    /// Make the sink visible without stealing focus.
    fn show(&self) {}

    /// Bring the sink to the foreground.
    fn show_and_activate(&self) {}
}

/// Sink that writes to the terminal's stderr.
///
/// Error lines are colored red when stderr is a terminal. Visibility
/// requests are no-ops: a terminal is always visible.
#[derive(Debug)]
pub struct ConsoleSink {
    use_color: bool,
}

impl ConsoleSink {
    /// Create a console sink, detecting color support from the terminal.
    pub fn new() -> Self {
        ConsoleSink {
            use_color: io::stderr().is_terminal(),
        }
    }

    /// Create a console sink with color explicitly enabled or disabled.
    pub fn with_color(use_color: bool) -> Self {
        ConsoleSink { use_color }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        ConsoleSink::new()
    }
}

impl OutputSink for ConsoleSink {
    fn write_line(&self, line: &str) {
        eprintln!("{}", line);
    }

    fn write_error_line(&self, line: &str) {
        if self.use_color {
            eprintln!("\x1b[31m{}\x1b[0m", line);
        } else {
            eprintln!("{}", line);
        }
    }
}

/// Sink that records everything it is told, for assertions in tests and
/// for callers that post-process output.
#[derive(Debug, Default)]
pub struct BufferSink {
    lines: Mutex<Vec<String>>,
    error_lines: Mutex<Vec<String>>,
    shown: Mutex<u32>,
    activated: Mutex<u32>,
}

impl BufferSink {
    /// Create an empty buffer sink.
    pub fn new() -> Self {
        BufferSink::default()
    }

    /// All normal lines written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("sink lock poisoned").clone()
    }

    /// All error lines written so far.
    pub fn error_lines(&self) -> Vec<String> {
        self.error_lines.lock().expect("sink lock poisoned").clone()
    }

    /// How many times `show` was requested.
    pub fn shown(&self) -> u32 {
        *self.shown.lock().expect("sink lock poisoned")
    }

    /// How many times `show_and_activate` was requested.
    pub fn activated(&self) -> u32 {
        *self.activated.lock().expect("sink lock poisoned")
    }

    /// Whether any recorded line contains the given fragment.
    pub fn contains(&self, fragment: &str) -> bool {
        self.lines().iter().any(|l| l.contains(fragment))
            || self.error_lines().iter().any(|l| l.contains(fragment))
    }
}

impl OutputSink for BufferSink {
    fn write_line(&self, line: &str) {
        self.lines
            .lock()
            .expect("sink lock poisoned")
            .push(line.to_string());
    }

    fn write_error_line(&self, line: &str) {
        self.error_lines
            .lock()
            .expect("sink lock poisoned")
            .push(line.to_string());
    }

    fn show(&self) {
        *self.shown.lock().expect("sink lock poisoned") += 1;
    }

    fn show_and_activate(&self) {
        *self.activated.lock().expect("sink lock poisoned") += 1;
    }
}
