//! Message formatting subsystem.
//!
//! # Data Flow
//! ```text
//! logging call (primary, rest...)
//!     → engine.rs (count placeholders once on the primary string)
//!     → engine.rs (substitute %s %d %i %f %j %o %O from the leading args)
//!     → inspect.rs (render non-string values)
//!     → remaining args appended, space separated
//!     → finished line, or None when there is nothing to emit
//! ```
//!
//! # Design Decisions
//! - Follows console-style multi-argument logging: extra args are never swallowed
//! - Substituted text is not rescanned for placeholders
//! - Formatting never fails; unserializable values get a marker

pub mod args;
pub mod engine;
pub mod inspect;

pub use args::{Arg, UNSERIALIZABLE};
pub use engine::{count_placeholders, format, format_args, Placeholder};
pub use inspect::inspect;
