//! Severity levels.
//!
//! Six levels ordered from most to least severe:
//! `error > warn > info > verbose > debug > silly`.
//! A threshold admits every level whose rank is lower than or equal to its own.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::LoggerError;

/// Logging severity, ordered by rank (`Error` = 0).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Severity {
    Error = 0,
    Warn = 1,
    #[default]
    Info = 2,
    Verbose = 3,
    Debug = 4,
    Silly = 5,
}

impl Severity {
    /// All severities, most severe first.
    pub const ALL: [Severity; 6] = [
        Severity::Error,
        Severity::Warn,
        Severity::Info,
        Severity::Verbose,
        Severity::Debug,
        Severity::Silly,
    ];

    /// Numeric rank, 0 being the most severe.
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Lowercase name as it appears in rendered lines and namespace channels.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warn => "warn",
            Severity::Info => "info",
            Severity::Verbose => "verbose",
            Severity::Debug => "debug",
            Severity::Silly => "silly",
        }
    }

    /// Returns true if a message at `requested` passes this threshold.
    pub fn allows(self, requested: Severity) -> bool {
        requested.rank() <= self.rank()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Severity::ALL
            .into_iter()
            .find(|level| level.as_str() == name)
            .ok_or_else(|| LoggerError::InvalidLevel(s.to_string()))
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_matches_rank_order() {
        for threshold in Severity::ALL {
            for requested in Severity::ALL {
                assert_eq!(
                    threshold.allows(requested),
                    requested.rank() <= threshold.rank(),
                    "threshold {} / requested {}",
                    threshold,
                    requested
                );
            }
        }
    }

    #[test]
    fn test_info_threshold() {
        let allowed: Vec<_> = Severity::ALL
            .into_iter()
            .filter(|s| Severity::Info.allows(*s))
            .collect();
        assert_eq!(allowed, vec![Severity::Error, Severity::Warn, Severity::Info]);
    }

    #[test]
    fn test_parse() {
        assert_eq!("warn".parse::<Severity>().unwrap(), Severity::Warn);
        assert_eq!(" SILLY ".parse::<Severity>().unwrap(), Severity::Silly);
        assert!(matches!(
            "trace".parse::<Severity>(),
            Err(LoggerError::InvalidLevel(name)) if name == "trace"
        ));
    }

    #[test]
    fn test_ordering() {
        assert!(Severity::Error < Severity::Warn);
        assert!(Severity::Debug < Severity::Silly);
        assert_eq!(Severity::default(), Severity::Info);
    }
}
