//! Leveled logging facade with pluggable providers.
//!
//! A [`Logger`] binds a module label to a severity threshold and a provider:
//! a structured multi-transport sink, or a console sink filtered by a
//! `DEBUG`-style namespace pattern. Every call accepts printf-style
//! placeholders followed by any number of trailing values.

pub mod config;
pub mod error;
pub mod filter;
pub mod format;
pub mod logger;
pub mod severity;
pub mod sink;

pub use config::{Environment, LoggerConfig, ResolvedConfig, TransportConfig};
pub use error::{LoggerError, LoggerResult};
pub use filter::NamespaceFilter;
pub use format::{format, format_args, Arg};
pub use logger::Logger;
pub use severity::Severity;
pub use sink::{Record, Sink, SinkKind};
