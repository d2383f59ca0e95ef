//! Multi-transport structured sink.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::ResolvedConfig;
use crate::error::LoggerResult;
use crate::sink::transport::{build_transports, Transport};
use crate::sink::{Record, Sink};

/// Renders `<timestamp> [<label>] <severity>: <message>` and fans it out to every transport.
#[derive(Debug)]
pub struct StructuredSink {
    transports: Vec<Box<dyn Transport>>,
    silent: bool,
    closed: AtomicBool,
}

impl StructuredSink {
    pub fn new(transports: Vec<Box<dyn Transport>>) -> Self {
        Self {
            transports,
            silent: false,
            closed: AtomicBool::new(false),
        }
    }

    /// Build the transports named in the resolved configuration.
    pub fn from_config(config: &ResolvedConfig) -> LoggerResult<Self> {
        let sink = Self::new(build_transports(&config.transports)?).silent(config.silent);
        Ok(sink)
    }

    /// Drop every record instead of writing it.
    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    pub fn render(record: &Record) -> String {
        format!(
            "{} [{}] {}: {}",
            record.timestamp, record.label, record.level, record.message
        )
    }
}

impl Sink for StructuredSink {
    fn write(&self, record: &Record) -> io::Result<()> {
        if self.silent || self.closed.load(Ordering::Acquire) {
            return Ok(());
        }
        let line = Self::render(record);
        let mut first_error = None;
        for transport in &self.transports {
            // One failing transport must not starve the others.
            if let Err(e) = transport.log(record, &line) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn close(&self) -> io::Result<()> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        let mut first_error = None;
        for transport in &self.transports {
            if let Err(e) = transport.close() {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
