//! Configuration schema definitions.
//!
//! All types derive Serde traits so a logger can be configured from a TOML
//! file as well as in code. Every field has a default, an empty config is valid.

use serde::{Deserialize, Serialize};

use crate::config::env::Environment;
use crate::error::LoggerResult;
use crate::severity::Severity;
use crate::sink::SinkKind;

/// Label used when no module name is given.
pub const DEFAULT_LABEL: &str = "AIO";

/// Provider used when none is configured.
pub const DEFAULT_PROVIDER: &str = "structured";

/// Logger configuration as written by the caller.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggerConfig {
    /// Minimum severity (default: info). `AIO_LOG_LEVEL` takes precedence.
    pub level: Option<Severity>,

    /// Provider name: `structured` (alias `winston`) or `debug`.
    pub provider: String,

    /// Destinations for the structured provider.
    pub transports: TransportConfig,

    /// Drop every message (structured provider only).
    pub silent: bool,

    /// Append the current action name to the label. Defaults to on when an
    /// action name is present.
    pub log_source_action: Option<bool>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: None,
            provider: DEFAULT_PROVIDER.to_string(),
            transports: TransportConfig::default(),
            silent: false,
            log_source_action: None,
        }
    }
}

/// Where the structured provider writes.
///
/// In TOML: `transports = "console"`, `transports = "./app.log"`,
/// `transports = { collector = { host = "...", path = "/logs" } }` or an array of these.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum TransportConfig {
    /// `console`, or a file path (any value containing a `.`).
    Named(String),

    /// Remote log collector reached over HTTP(S).
    Collector { collector: CollectorConfig },

    /// Several transports at once.
    List(Vec<TransportConfig>),
}

impl Default for TransportConfig {
    fn default() -> Self {
        TransportConfig::Named("console".to_string())
    }
}

/// Remote log collector endpoint.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CollectorConfig {
    /// Collector host, optionally with a port.
    pub host: String,

    /// Request path (default: "/").
    #[serde(default = "default_collector_path")]
    pub path: String,

    /// Use HTTPS (default: true).
    #[serde(default = "default_ssl")]
    pub ssl: bool,
}

fn default_collector_path() -> String {
    "/".to_string()
}

fn default_ssl() -> bool {
    true
}

/// Configuration after defaults and the environment snapshot were applied.
///
/// Owned by exactly one logger and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub label: String,
    pub level: Severity,
    pub kind: SinkKind,
    /// Active namespace pattern, only consulted by the debug provider.
    pub namespaces: Option<String>,
    pub transports: TransportConfig,
    pub silent: bool,
    pub log_source_action: bool,
}

impl LoggerConfig {
    /// Apply defaults and the environment snapshot.
    ///
    /// Fails on an unknown provider or level name; nothing is constructed in that case.
    pub fn resolve(&self, module_name: &str, env: &Environment) -> LoggerResult<ResolvedConfig> {
        let kind: SinkKind = self.provider.parse()?;

        let level = match env.log_level.as_deref() {
            Some(raw) => raw.parse()?,
            None => self.level.unwrap_or_default(),
        };

        let log_source_action = env.action_name.is_some() && self.log_source_action != Some(false);
        let label = generate_label(module_name, env.action_name.as_deref(), log_source_action);

        Ok(ResolvedConfig {
            label,
            level,
            kind,
            namespaces: env.namespaces.clone(),
            transports: self.transports.clone(),
            silent: self.silent,
            log_source_action,
        })
    }
}

fn generate_label(module_name: &str, action_name: Option<&str>, log_source_action: bool) -> String {
    let base = if module_name.is_empty() { DEFAULT_LABEL } else { module_name };
    match action_name {
        Some(action) if log_source_action => format!("{} {}", base, action),
        _ => base.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoggerError;

    #[test]
    fn test_defaults() {
        let resolved = LoggerConfig::default()
            .resolve("App", &Environment::default())
            .unwrap();
        assert_eq!(resolved.kind, SinkKind::Structured);
        assert_eq!(resolved.level, Severity::Info);
        assert_eq!(resolved.label, "App");
        assert!(!resolved.log_source_action);
        assert!(!resolved.silent);
        assert_eq!(resolved.transports, TransportConfig::Named("console".into()));
    }

    #[test]
    fn test_action_name_enriches_label() {
        let env = Environment::default().with_action_name("fake-action");
        let resolved = LoggerConfig::default().resolve("", &env).unwrap();
        assert_eq!(resolved.label, "AIO fake-action");
        assert!(resolved.log_source_action);
    }

    #[test]
    fn test_action_name_opt_out() {
        let env = Environment::default().with_action_name("fake-action");
        let config = LoggerConfig {
            log_source_action: Some(false),
            ..LoggerConfig::default()
        };
        let resolved = config.resolve("App", &env).unwrap();
        assert_eq!(resolved.label, "App");
        assert!(!resolved.log_source_action);
    }

    #[test]
    fn test_env_level_overrides_config() {
        let env = Environment::default().with_log_level("debug");
        let config = LoggerConfig {
            level: Some(Severity::Error),
            ..LoggerConfig::default()
        };
        assert_eq!(config.resolve("App", &env).unwrap().level, Severity::Debug);
        assert_eq!(
            config.resolve("App", &Environment::default()).unwrap().level,
            Severity::Error
        );
    }

    #[test]
    fn test_bad_provider() {
        let config = LoggerConfig {
            provider: "__a_surely_not_supported_provider1234".into(),
            ..LoggerConfig::default()
        };
        let err = config.resolve("App", &Environment::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "log provider __a_surely_not_supported_provider1234 is not supported, use one of [structured, debug]"
        );
    }

    #[test]
    fn test_bad_env_level() {
        let env = Environment::default().with_log_level("loud");
        let err = LoggerConfig::default().resolve("App", &env).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidLevel(level) if level == "loud"));
    }

    #[test]
    fn test_namespaces_copied_from_env() {
        let env = Environment::default().with_namespaces("App:warn");
        let config = LoggerConfig {
            provider: "debug".into(),
            ..LoggerConfig::default()
        };
        let resolved = config.resolve("App", &env).unwrap();
        assert_eq!(resolved.kind, SinkKind::Debug);
        assert_eq!(resolved.namespaces.as_deref(), Some("App:warn"));
    }
}
