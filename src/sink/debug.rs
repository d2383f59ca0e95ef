//! Namespace-filtered console sink.
//!
//! Lines are prefixed with the `label:severity` channel name. Filtering by
//! namespace pattern happens in the logger before a record reaches this sink.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::sink::output::LineOutput;
use crate::sink::{Record, Sink};

#[derive(Debug)]
pub struct DebugSink {
    out: LineOutput,
    closed: AtomicBool,
}

impl DebugSink {
    pub fn stdout() -> Self {
        Self::with_output(LineOutput::stdout())
    }

    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self::with_output(LineOutput::new(writer))
    }

    fn with_output(out: LineOutput) -> Self {
        Self {
            out,
            closed: AtomicBool::new(false),
        }
    }

    /// Every line of a multi-line message carries the channel prefix.
    pub fn render(record: &Record) -> String {
        let channel = format!("{}:{}", record.label, record.level);
        record
            .message
            .split('\n')
            .map(|line| format!("{} {}", channel, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Sink for DebugSink {
    fn write(&self, record: &Record) -> io::Result<()> {
        if self.closed.load(Ordering::Acquire) {
            return Ok(());
        }
        self.out.write_line(&Self::render(record))
    }

    fn close(&self) -> io::Result<()> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        self.out.flush()
    }
}
