//! Error definitions.

use thiserror::Error;

/// Errors raised while configuring or operating a logger.
#[derive(Debug, Error)]
pub enum LoggerError {
    /// The requested provider has no sink implementation.
    #[error("log provider {provider} is not supported, use one of [{}]", .supported.join(", "))]
    UnsupportedProvider {
        provider: String,
        supported: Vec<&'static str>,
    },

    /// A level name did not match any severity.
    #[error("invalid log level '{0}', use one of [error, warn, info, verbose, debug, silly]")]
    InvalidLevel(String),

    /// A transport entry could not be turned into a transport.
    #[error("invalid transport: {0}")]
    InvalidTransport(String),

    /// Reading a config file or opening a sink destination failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A config file is not valid TOML for `LoggerConfig`.
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for logger operations.
pub type LoggerResult<T> = Result<T, LoggerError>;
