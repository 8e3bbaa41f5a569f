//! The sink collaborator: a single "write line of text" capability.
//!
//! The engine never reads from its sink. Sinks take `&self` and handle
//! their own interior mutability, which keeps render operations free of
//! borrow requirements on the logger.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

/// Destination for fully decorated log lines.
pub trait Sink {
    fn write_line(&self, line: &str);
}

/// Writes each line to stdout. Write failures are swallowed; a logger must
/// not take down its host over a closed pipe.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl Sink for ConsoleSink {
    fn write_line(&self, line: &str) {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        let _ = writeln!(handle, "{line}");
    }
}

/// Captures lines in memory, for hosts that forward output elsewhere and
/// for tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: RefCell<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.lines.borrow_mut().clear();
    }
}

impl Sink for MemorySink {
    fn write_line(&self, line: &str) {
        self.lines.borrow_mut().push(line.to_string());
    }
}

/// Lets a caller keep a handle on a sink it hands to a logger.
impl<S: Sink> Sink for Rc<S> {
    fn write_line(&self, line: &str) {
        (**self).write_line(line);
    }
}
