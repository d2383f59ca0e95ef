//! Line-oriented writer shared by the console-style sinks.

use std::fmt;
use std::io::{self, Write};
use std::sync::Mutex;

/// A writer that emits whole lines, flushing after each one.
pub struct LineOutput {
    inner: Mutex<Box<dyn Write + Send>>,
}

impl LineOutput {
    /// Write to the process stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Write to any destination (a buffer in tests, stderr, a pipe).
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            inner: Mutex::new(Box::new(writer)),
        }
    }

    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut out = self.lock()?;
        writeln!(out, "{}", line)?;
        out.flush()
    }

    pub fn flush(&self) -> io::Result<()> {
        self.lock()?.flush()
    }

    fn lock(&self) -> io::Result<std::sync::MutexGuard<'_, Box<dyn Write + Send>>> {
        self.inner
            .lock()
            .map_err(|_| io::Error::other("output mutex poisoned"))
    }
}

impl fmt::Debug for LineOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineOutput").finish_non_exhaustive()
    }
}
