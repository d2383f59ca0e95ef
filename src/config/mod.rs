//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! LoggerConfig (code or TOML file via loader.rs)
//!     + Environment snapshot (env.rs: DEBUG, AIO_LOG_LEVEL, __OW_ACTION_NAME)
//!     → LoggerConfig::resolve (defaults, level override, label, provider check)
//!     → ResolvedConfig (immutable, owned by one Logger)
//! ```
//!
//! # Design Decisions
//! - The environment is read once per logger, never inside a logging call
//! - Unknown providers and level names fail before anything is constructed
//! - All fields have defaults to allow minimal configs

pub mod env;
pub mod loader;
pub mod schema;

pub use env::Environment;
pub use loader::{load_config, parse_config};
pub use schema::{CollectorConfig, LoggerConfig, ResolvedConfig, TransportConfig};
