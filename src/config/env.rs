//! Environment snapshot.
//!
//! The process environment is read once, when a logger is built. Tests pass
//! synthetic snapshots instead of mutating the real environment.

/// Active namespace pattern.
pub const NAMESPACES_VAR: &str = "DEBUG";

/// Global minimum severity override.
pub const LOG_LEVEL_VAR: &str = "AIO_LOG_LEVEL";

/// Name of the action currently running, used to enrich labels.
pub const ACTION_NAME_VAR: &str = "__OW_ACTION_NAME";

/// Values taken from the environment. Empty values are treated as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    pub namespaces: Option<String>,
    pub log_level: Option<String>,
    pub action_name: Option<String>,
}

impl Environment {
    /// Snapshot the current process environment.
    pub fn from_process() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a snapshot from any key/value lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        Self {
            namespaces: get(NAMESPACES_VAR),
            log_level: get(LOG_LEVEL_VAR),
            action_name: get(ACTION_NAME_VAR),
        }
    }

    pub fn with_namespaces(mut self, pattern: impl Into<String>) -> Self {
        self.namespaces = Some(pattern.into());
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    pub fn with_action_name(mut self, action: impl Into<String>) -> Self {
        self.action_name = Some(action.into());
        self
    }
}
