//! Sink subsystem.
//!
//! # Data Flow
//! ```text
//! Logger (formatted message + label + severity)
//!     → Record (timestamped)
//!     → Sink::write
//!         structured.rs → "<timestamp> [<label>] <severity>: <message>"
//!                         → transport.rs (console, file, collector, custom)
//!         debug.rs      → "<label>:<severity> <message>" → console
//! ```
//!
//! # Design Decisions
//! - The provider set is closed: `SinkKind` maps a name to a factory
//! - Unknown provider names are rejected before any sink is built
//! - `close` is idempotent; writes after close are dropped

pub mod debug;
pub mod output;
pub mod structured;
pub mod transport;

use std::fmt;
use std::io;
use std::str::FromStr;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::config::ResolvedConfig;
use crate::error::{LoggerError, LoggerResult};
use crate::severity::Severity;

pub use debug::DebugSink;
pub use output::LineOutput;
pub use structured::StructuredSink;
pub use transport::{ConsoleTransport, CollectorTransport, FileTransport, Transport};

/// One formatted message with its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// RFC 3339 UTC timestamp with milliseconds, e.g. `2019-10-01T10:00:00.000Z`.
    pub timestamp: String,
    pub label: String,
    pub level: Severity,
    pub message: String,
}

impl Record {
    /// Create a record stamped with the current time.
    pub fn new(label: impl Into<String>, level: Severity, message: impl Into<String>) -> Self {
        Self::at(
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            label,
            level,
            message,
        )
    }

    /// Create a record with a fixed timestamp.
    pub fn at(
        timestamp: impl Into<String>,
        label: impl Into<String>,
        level: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            label: label.into(),
            level,
            message: message.into(),
        }
    }
}

/// A destination that renders and writes records.
pub trait Sink: Send + Sync + fmt::Debug {
    fn write(&self, record: &Record) -> io::Result<()>;

    /// Flush and release resources. Safe to call more than once.
    fn close(&self) -> io::Result<()>;
}

/// The supported providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinkKind {
    /// Multi-transport sink gated by the severity threshold.
    Structured,
    /// Console sink gated by the namespace pattern.
    Debug,
}

impl SinkKind {
    /// Provider names accepted by `FromStr`, as listed in errors.
    pub const SUPPORTED: [&'static str; 2] = ["structured", "debug"];

    pub fn as_str(self) -> &'static str {
        match self {
            SinkKind::Structured => "structured",
            SinkKind::Debug => "debug",
        }
    }

    /// Build the sink for this provider.
    pub fn build(self, config: &ResolvedConfig) -> LoggerResult<Box<dyn Sink>> {
        Ok(match self {
            SinkKind::Structured => Box::new(StructuredSink::from_config(config)?),
            SinkKind::Debug => Box::new(DebugSink::stdout()),
        })
    }
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SinkKind {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "structured" | "winston" => Ok(SinkKind::Structured),
            "debug" => Ok(SinkKind::Debug),
            other => Err(LoggerError::UnsupportedProvider {
                provider: other.to_string(),
                supported: SinkKind::SUPPORTED.to_vec(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!("structured".parse::<SinkKind>().unwrap(), SinkKind::Structured);
        assert_eq!("winston".parse::<SinkKind>().unwrap(), SinkKind::Structured);
        assert_eq!("debug".parse::<SinkKind>().unwrap(), SinkKind::Debug);
        let err = "Debug".parse::<SinkKind>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "log provider Debug is not supported, use one of [structured, debug]"
        );
    }

    #[test]
    fn test_record_timestamp_shape() {
        let record = Record::new("App", Severity::Info, "m");
        // 2024-05-06T07:08:09.123Z
        assert_eq!(record.timestamp.len(), 24);
        assert!(record.timestamp.ends_with('Z'));
        assert_eq!(&record.timestamp[19..20], ".");
    }

    #[test]
    fn test_record_serializes_for_collector() {
        let record = Record::at("t", "App", Severity::Error, "boom");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"timestamp": "t", "label": "App", "level": "error", "message": "boom"})
        );
    }
}
