//! Namespace filtering subsystem.
//!
//! # Data Flow
//! ```text
//! DEBUG-style pattern (environment snapshot)
//!     → pattern.rs (parse into include/exclude clauses, once per logger)
//!     → is_enabled(label, severity, threshold) per call
//!         exclusion        → suppress
//!         label:severity   → emit, threshold ignored
//!         *                → emit
//!         label / prefix*  → emit iff severity passes the threshold
//!         otherwise        → suppress
//! ```

pub mod pattern;

pub use pattern::{is_enabled, NamespaceFilter};
