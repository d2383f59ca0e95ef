//! Logger facade.
//!
//! # Responsibilities
//! - Bind one label to one resolved configuration and one sink
//! - Expose one call per severity
//! - Format, gate, then hand the record to the sink
//!
//! # Design Decisions
//! - Configuration is resolved once at construction; re-create to change it
//! - Structured sinks are gated by the threshold, debug sinks by the namespace pattern
//! - Sink failures are reported through `tracing` and never reach the caller

use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::{Environment, LoggerConfig, ResolvedConfig};
use crate::error::LoggerResult;
use crate::filter::NamespaceFilter;
use crate::format::{format_args, Arg};
use crate::severity::Severity;
use crate::sink::{Record, Sink, SinkKind};

/// Decides whether a severity is emitted.
#[derive(Debug)]
enum Gate {
    Threshold(Severity),
    Namespaces {
        filter: NamespaceFilter,
        threshold: Severity,
    },
}

impl Gate {
    fn for_config(config: &ResolvedConfig) -> Self {
        match config.kind {
            SinkKind::Structured => Gate::Threshold(config.level),
            SinkKind::Debug => Gate::Namespaces {
                filter: config
                    .namespaces
                    .as_deref()
                    .map(NamespaceFilter::parse)
                    .unwrap_or_else(NamespaceFilter::disabled),
                threshold: config.level,
            },
        }
    }

    fn allows(&self, label: &str, severity: Severity) -> bool {
        match self {
            Gate::Threshold(threshold) => threshold.allows(severity),
            Gate::Namespaces { filter, threshold } => filter.is_enabled(label, severity, *threshold),
        }
    }
}

/// A labeled logger with one method per severity.
///
/// ```no_run
/// use aio_logging::{args, Logger, LoggerConfig};
///
/// let logger = Logger::from_env("App", &LoggerConfig::default())?;
/// logger.info(&args!["started %s on port %d", "api", 8080]);
/// logger.close();
/// # Ok::<(), aio_logging::LoggerError>(())
/// ```
#[derive(Debug)]
pub struct Logger {
    config: ResolvedConfig,
    gate: Gate,
    sink: Box<dyn Sink>,
    closed: AtomicBool,
}

impl Logger {
    /// Resolve `config` against an environment snapshot and build the provider's sink.
    pub fn new(module_name: &str, config: &LoggerConfig, env: &Environment) -> LoggerResult<Self> {
        let resolved = config.resolve(module_name, env)?;
        let sink = resolved.kind.build(&resolved)?;
        Ok(Self::with_sink(resolved, sink))
    }

    /// Like [`Logger::new`], reading the process environment.
    pub fn from_env(module_name: &str, config: &LoggerConfig) -> LoggerResult<Self> {
        Self::new(module_name, config, &Environment::from_process())
    }

    /// Use a caller-provided sink, e.g. a `StructuredSink` with custom transports.
    pub fn with_sink(config: ResolvedConfig, sink: Box<dyn Sink>) -> Self {
        tracing::debug!(
            label = %config.label,
            provider = %config.kind,
            level = %config.level,
            namespaces = ?config.namespaces,
            "Logger created"
        );
        Self {
            gate: Gate::for_config(&config),
            config,
            sink,
            closed: AtomicBool::new(false),
        }
    }

    pub fn label(&self) -> &str {
        &self.config.label
    }

    pub fn level(&self) -> Severity {
        self.config.level
    }

    pub fn kind(&self) -> SinkKind {
        self.config.kind
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// Returns true if a message at `severity` would be written.
    pub fn enabled(&self, severity: Severity) -> bool {
        self.gate.allows(&self.config.label, severity)
    }

    /// Format `args` and write it at `severity`. The first element is the primary message.
    pub fn log_at(&self, severity: Severity, args: &[Arg]) {
        let Some(message) = format_args(args) else {
            return;
        };
        if !self.enabled(severity) {
            return;
        }
        let record = Record::new(self.config.label.as_str(), severity, message);
        if let Err(e) = self.sink.write(&record) {
            tracing::warn!(label = %self.config.label, error = %e, "Failed to write log record");
        }
    }

    pub fn error(&self, args: &[Arg]) {
        self.log_at(Severity::Error, args)
    }

    pub fn warn(&self, args: &[Arg]) {
        self.log_at(Severity::Warn, args)
    }

    pub fn info(&self, args: &[Arg]) {
        self.log_at(Severity::Info, args)
    }

    /// Same as [`Logger::info`].
    pub fn log(&self, args: &[Arg]) {
        self.info(args)
    }

    pub fn verbose(&self, args: &[Arg]) {
        self.log_at(Severity::Verbose, args)
    }

    pub fn debug(&self, args: &[Arg]) {
        self.log_at(Severity::Debug, args)
    }

    pub fn silly(&self, args: &[Arg]) {
        self.log_at(Severity::Silly, args)
    }

    /// Flush and release the sink. Further calls are no-ops.
    pub fn close(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        if let Err(e) = self.sink.close() {
            tracing::warn!(label = %self.config.label, error = %e, "Failed to close log sink");
        }
        tracing::debug!(label = %self.config.label, "Logger closed");
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Default, Clone)]
    struct Capture {
        records: Arc<Mutex<Vec<Record>>>,
        closes: Arc<Mutex<usize>>,
    }

    impl Sink for Capture {
        fn write(&self, record: &Record) -> io::Result<()> {
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }

        fn close(&self) -> io::Result<()> {
            *self.closes.lock().unwrap() += 1;
            Ok(())
        }
    }

    fn logger(config: LoggerConfig, env: Environment) -> (Logger, Capture) {
        let capture = Capture::default();
        let resolved = config.resolve("App", &env).unwrap();
        (Logger::with_sink(resolved, Box::new(capture.clone())), capture)
    }

    fn debug_config() -> LoggerConfig {
        LoggerConfig {
            provider: "debug".into(),
            ..LoggerConfig::default()
        }
    }

    fn emit_all(logger: &Logger) {
        logger.error(&args!["message"]);
        logger.warn(&args!["message"]);
        logger.info(&args!["message"]);
        logger.verbose(&args!["message"]);
        logger.debug(&args!["message"]);
        logger.silly(&args!["message"]);
    }

    fn levels(capture: &Capture) -> Vec<Severity> {
        capture.records.lock().unwrap().iter().map(|r| r.level).collect()
    }

    #[test]
    fn test_structured_threshold() {
        let (logger, capture) = logger(LoggerConfig::default(), Environment::default());
        emit_all(&logger);
        assert_eq!(levels(&capture), vec![Severity::Error, Severity::Warn, Severity::Info]);
    }

    #[test]
    fn test_structured_ignores_namespaces() {
        let env = Environment::default().with_namespaces("App:silly");
        let (logger, capture) = logger(LoggerConfig::default(), env);
        logger.silly(&args!["message"]);
        assert!(capture.records.lock().unwrap().is_empty());
    }

    #[test]
    fn test_debug_wildcard_emits_everything() {
        let env = Environment::default().with_namespaces("*");
        let (logger, capture) = logger(debug_config(), env);
        emit_all(&logger);
        assert_eq!(levels(&capture), Severity::ALL.to_vec());
    }

    #[test]
    fn test_debug_label_with_env_level() {
        let env = Environment::default().with_namespaces("App").with_log_level("debug");
        let (logger, capture) = logger(debug_config(), env);
        logger.verbose(&args!["message"]);
        logger.debug(&args!["message"]);
        logger.silly(&args!["message"]);
        assert_eq!(levels(&capture), vec![Severity::Verbose, Severity::Debug]);
    }

    #[test]
    fn test_debug_channel_only() {
        let env = Environment::default().with_namespaces("App:warn").with_log_level("silly");
        let (logger, capture) = logger(debug_config(), env);
        emit_all(&logger);
        assert_eq!(levels(&capture), vec![Severity::Warn]);
    }

    #[test]
    fn test_debug_without_pattern_is_disabled() {
        let (logger, capture) = logger(debug_config(), Environment::default());
        emit_all(&logger);
        assert!(capture.records.lock().unwrap().is_empty());
        assert!(!logger.enabled(Severity::Error));
    }

    #[test]
    fn test_empty_message_skipped() {
        let (logger, capture) = logger(LoggerConfig::default(), Environment::default());
        logger.error(&args![""]);
        logger.error(&[]);
        assert!(capture.records.lock().unwrap().is_empty());
    }

    #[test]
    fn test_formats_before_writing() {
        let (logger, capture) = logger(LoggerConfig::default(), Environment::default());
        logger.log(&args!["message %s %s %d", "hello", "world", 123]);
        let records = capture.records.lock().unwrap();
        assert_eq!(records[0].message, "message hello world 123");
        assert_eq!(records[0].level, Severity::Info);
        assert_eq!(records[0].label, "App");
    }

    #[test]
    fn test_close_idempotent_and_on_drop() {
        let (logger, capture) = logger(LoggerConfig::default(), Environment::default());
        logger.close();
        logger.close();
        drop(logger);
        assert_eq!(*capture.closes.lock().unwrap(), 1);
    }

    #[test]
    fn test_unsupported_provider_fails_fast() {
        let config = LoggerConfig {
            provider: "bunyan".into(),
            ..LoggerConfig::default()
        };
        let err = Logger::new("App", &config, &Environment::default()).unwrap_err();
        assert!(err.to_string().contains("log provider bunyan is not supported"));
    }
}
