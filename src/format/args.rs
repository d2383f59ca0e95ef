//! Variadic log arguments.

use std::fmt::Debug;

use serde::Serialize;
use serde_json::Value;

/// A single argument of a logging call.
///
/// Scalars are kept apart from structured values so that the format engine can
/// coerce them (`%d`, `%f`) and render them without quoting. Structured values
/// only ever hold JSON arrays or objects; scalar JSON values are folded into the
/// matching scalar variant on conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    Undefined,
    /// A JSON array or object.
    Json(Value),
    /// A value that only exists as pre-rendered text and cannot be serialized.
    Opaque(String),
    /// A value whose serialization failed.
    Unserializable,
}

impl Arg {
    /// Convert any serializable value.
    ///
    /// Values serde_json refuses (maps with non-string keys, failing `Serialize`
    /// impls) become [`Arg::Unserializable`].
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(v) => Arg::from(v),
            Err(e) => {
                tracing::trace!(error = %e, "argument is not serializable");
                Arg::Unserializable
            }
        }
    }

    /// Capture the `Debug` rendering of an arbitrary value.
    pub fn debug<T: Debug + ?Sized>(value: &T) -> Self {
        Arg::Opaque(format!("{:?}", value))
    }

    /// Falsy in the JavaScript sense: empty text, zero, NaN, false, null, undefined.
    pub fn is_falsy(&self) -> bool {
        match self {
            Arg::Text(s) => s.is_empty(),
            Arg::Int(i) => *i == 0,
            Arg::Float(f) => *f == 0.0 || f.is_nan(),
            Arg::Bool(b) => !b,
            Arg::Null | Arg::Undefined => true,
            Arg::Json(_) | Arg::Opaque(_) | Arg::Unserializable => false,
        }
    }
}

/// Marker substituted for `%j` when a value has no JSON form.
pub const UNSERIALIZABLE: &str = "[unserializable]";

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Text(s.to_string())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Text(s)
    }
}

impl From<&String> for Arg {
    fn from(s: &String) -> Self {
        Arg::Text(s.clone())
    }
}

impl From<char> for Arg {
    fn from(c: char) -> Self {
        Arg::Text(c.to_string())
    }
}

impl From<bool> for Arg {
    fn from(b: bool) -> Self {
        Arg::Bool(b)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Arg {
            fn from(n: $t) -> Self {
                Arg::Int(i64::from(n))
            }
        })*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Arg {
    fn from(n: u64) -> Self {
        i64::try_from(n).map(Arg::Int).unwrap_or(Arg::Float(n as f64))
    }
}

impl From<usize> for Arg {
    fn from(n: usize) -> Self {
        i64::try_from(n).map(Arg::Int).unwrap_or(Arg::Float(n as f64))
    }
}

impl From<f32> for Arg {
    fn from(n: f32) -> Self {
        Arg::Float(f64::from(n))
    }
}

impl From<f64> for Arg {
    fn from(n: f64) -> Self {
        Arg::Float(n)
    }
}

impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Arg::Null)
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Arg::Null,
            Value::Bool(b) => Arg::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Arg::Int(i),
                None => Arg::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Arg::Text(s),
            other => Arg::Json(other),
        }
    }
}

/// Build a `Vec<Arg>` from heterogeneous expressions.
///
/// ```
/// use aio_logging::{args, Arg};
///
/// let v = args!["%s has %d items", "cart", 3];
/// assert_eq!(v[2], Arg::Int(3));
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Arg>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Arg::from($arg)),+]
    };
}
