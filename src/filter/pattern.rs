//! Namespace pattern parsing and evaluation.
//!
//! # Responsibilities
//! - Parse a `DEBUG`-style expression into include and exclude clauses
//! - Decide whether `label` at `severity` is emitted under a threshold
//!
//! # Design Decisions
//! - Matching is case-sensitive; only a trailing `*` is a wildcard
//! - A clause containing `:` names a severity channel (`App:warn`) and
//!   overrides the configured threshold
//! - A bare or prefix clause (`App`, `App*`) only switches the label on;
//!   the threshold still applies
//! - A lone `*` enables everything at every severity

use std::fmt;

use crate::severity::Severity;

/// Exact or prefix comparison against a name.
#[derive(Debug, Clone, PartialEq, Eq)]
enum NameMatcher {
    Any,
    Exact(String),
    Prefix(String),
}

impl NameMatcher {
    fn parse(text: &str) -> Self {
        if text == "*" {
            NameMatcher::Any
        } else if let Some(prefix) = text.strip_suffix('*') {
            NameMatcher::Prefix(prefix.to_string())
        } else {
            NameMatcher::Exact(text.to_string())
        }
    }

    fn matches(&self, name: &str) -> bool {
        match self {
            NameMatcher::Any => true,
            NameMatcher::Exact(expected) => name == expected,
            NameMatcher::Prefix(prefix) => name.starts_with(prefix.as_str()),
        }
    }
}

/// One comma or whitespace separated entry of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Clause {
    matcher: NameMatcher,
    /// True when the clause names `label:severity` channels.
    channel: bool,
}

impl Clause {
    fn parse(text: &str) -> Self {
        Self {
            matcher: NameMatcher::parse(text),
            channel: text.contains(':'),
        }
    }

    fn is_wildcard(&self) -> bool {
        self.matcher == NameMatcher::Any
    }

    /// Grants the channel regardless of threshold.
    fn grants_channel(&self, channel: &str) -> bool {
        (self.channel || self.is_wildcard()) && self.matcher.matches(channel)
    }

    /// Switches the label on, subject to the threshold.
    fn matches_label(&self, label: &str) -> bool {
        self.matcher.matches(label)
    }
}

/// A parsed namespace pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceFilter {
    source: String,
    includes: Vec<Clause>,
    excludes: Vec<Clause>,
}

impl NamespaceFilter {
    /// Parse a pattern such as `"App,Worker*,Db:warn,-Worker:silly"`.
    pub fn parse(pattern: &str) -> Self {
        let mut filter = Self {
            source: pattern.to_string(),
            ..Self::default()
        };
        for text in pattern
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
        {
            match text.strip_prefix('-') {
                Some(negated) if !negated.is_empty() => filter.excludes.push(Clause::parse(negated)),
                Some(_) => {}
                None => filter.includes.push(Clause::parse(text)),
            }
        }
        filter
    }

    /// A filter that enables nothing.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// The pattern text this filter was parsed from.
    pub fn pattern(&self) -> &str {
        &self.source
    }

    /// True if the pattern has no include clause at all.
    pub fn is_empty(&self) -> bool {
        self.includes.is_empty()
    }

    /// Returns true if a message for `label` at `severity` should be emitted.
    pub fn is_enabled(&self, label: &str, severity: Severity, threshold: Severity) -> bool {
        let channel = format!("{}:{}", label, severity);

        if self
            .excludes
            .iter()
            .any(|c| c.matches_label(label) || c.matcher.matches(&channel))
        {
            return false;
        }

        if self.includes.iter().any(|c| c.grants_channel(&channel)) {
            return true;
        }

        self.includes.iter().any(|c| c.matches_label(label)) && threshold.allows(severity)
    }
}

impl fmt::Display for NamespaceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// One-shot evaluation of an optional pattern. `None` or an empty pattern disables everything.
pub fn is_enabled(pattern: Option<&str>, label: &str, severity: Severity, threshold: Severity) -> bool {
    match pattern {
        Some(p) => NamespaceFilter::parse(p).is_enabled(label, severity, threshold),
        None => false,
    }
}
