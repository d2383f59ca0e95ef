//! Placeholder substitution and argument joining.

use super::args::{Arg, UNSERIALIZABLE};
use super::inspect::{inspect, number_to_string, DEFAULT_DEPTH};

/// Depth used by `%o`.
const DETAILED_DEPTH: usize = 4;

/// A recognized two-character placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// `%s`
    Str,
    /// `%d`
    Number,
    /// `%i`
    Integer,
    /// `%f`
    Float,
    /// `%j`
    Json,
    /// `%o`
    Detailed,
    /// `%O`
    Object,
}

impl Placeholder {
    fn from_char(c: char) -> Option<Self> {
        match c {
            's' => Some(Placeholder::Str),
            'd' => Some(Placeholder::Number),
            'i' => Some(Placeholder::Integer),
            'f' => Some(Placeholder::Float),
            'j' => Some(Placeholder::Json),
            'o' => Some(Placeholder::Detailed),
            'O' => Some(Placeholder::Object),
            _ => None,
        }
    }

    /// The literal token, used when no argument is left to consume.
    pub fn token(self) -> &'static str {
        match self {
            Placeholder::Str => "%s",
            Placeholder::Number => "%d",
            Placeholder::Integer => "%i",
            Placeholder::Float => "%f",
            Placeholder::Json => "%j",
            Placeholder::Detailed => "%o",
            Placeholder::Object => "%O",
        }
    }

    fn render(self, arg: &Arg) -> String {
        match self {
            Placeholder::Str => string_form(arg),
            Placeholder::Number => integer_form(arg, false),
            Placeholder::Integer => integer_form(arg, true),
            Placeholder::Float => float_form(arg),
            Placeholder::Json => json_form(arg),
            Placeholder::Detailed => inspect(arg, DETAILED_DEPTH),
            Placeholder::Object => inspect(arg, DEFAULT_DEPTH),
        }
    }
}

#[derive(Debug, PartialEq)]
enum Segment<'a> {
    Literal(&'a str),
    Percent,
    Placeholder(Placeholder),
}

/// Split a template into literals and placeholders, left to right.
///
/// `%%` is an escaped percent sign and does not count as a placeholder.
fn scan(template: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut chars = template.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c != '%' {
            continue;
        }
        let Some(&(_, next)) = chars.peek() else {
            break;
        };
        let segment = if next == '%' {
            Segment::Percent
        } else if let Some(p) = Placeholder::from_char(next) {
            Segment::Placeholder(p)
        } else {
            continue;
        };
        if literal_start < i {
            segments.push(Segment::Literal(&template[literal_start..i]));
        }
        segments.push(segment);
        chars.next();
        literal_start = i + 2;
    }
    if literal_start < template.len() {
        segments.push(Segment::Literal(&template[literal_start..]));
    }
    segments
}

/// Number of placeholders in `template`, duplicates counted separately.
pub fn count_placeholders(template: &str) -> usize {
    scan(template)
        .iter()
        .filter(|s| matches!(s, Segment::Placeholder(_)))
        .count()
}

/// Format a primary message and its trailing arguments into one line.
///
/// Returns `None` when the primary value is falsy, whatever follows it; the
/// caller must then skip emission.
pub fn format(primary: &Arg, rest: &[Arg]) -> Option<String> {
    if primary.is_falsy() {
        return None;
    }
    if rest.is_empty() {
        return Some(render(primary));
    }

    let Arg::Text(template) = primary else {
        return Some(join(std::iter::once(primary).chain(rest)));
    };

    let count = count_placeholders(template);
    if count == 0 {
        return Some(join(std::iter::once(primary).chain(rest)));
    }

    // Placeholders are counted once on the template; substituted text is never rescanned.
    let (consumed, extra) = rest.split_at(count.min(rest.len()));
    let mut line = substitute(template, consumed);
    for arg in extra {
        line.push(' ');
        line.push_str(&render(arg));
    }
    Some(line)
}

/// Format a whole argument list, the first element being the primary message.
pub fn format_args(args: &[Arg]) -> Option<String> {
    let (primary, rest) = args.split_first()?;
    format(primary, rest)
}

fn substitute(template: &str, args: &[Arg]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    for segment in scan(template) {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Percent => out.push('%'),
            Segment::Placeholder(p) => match args.next() {
                Some(arg) => out.push_str(&p.render(arg)),
                None => out.push_str(p.token()),
            },
        }
    }
    out
}

fn join<'a>(args: impl Iterator<Item = &'a Arg>) -> String {
    args.map(render).collect::<Vec<_>>().join(" ")
}

/// Strings as they are, everything else inspected.
fn render(arg: &Arg) -> String {
    match arg {
        Arg::Text(s) => s.clone(),
        other => inspect(other, DEFAULT_DEPTH),
    }
}

fn string_form(arg: &Arg) -> String {
    match arg {
        Arg::Text(s) => s.clone(),
        Arg::Json(_) => inspect(arg, 0),
        other => inspect(other, DEFAULT_DEPTH),
    }
}

fn integer_form(arg: &Arg, parse_prefix: bool) -> String {
    match arg {
        Arg::Int(i) => i.to_string(),
        Arg::Text(s) if parse_prefix => number_to_string(leading_number(s, false).trunc()),
        other => number_to_string(to_number(other).trunc()),
    }
}

fn float_form(arg: &Arg) -> String {
    match arg {
        Arg::Text(s) => number_to_string(leading_number(s, true)),
        other => number_to_string(to_number(other)),
    }
}

fn json_form(arg: &Arg) -> String {
    let encoded = match arg {
        Arg::Text(s) => serde_json::to_string(s),
        Arg::Int(i) => Ok(i.to_string()),
        Arg::Float(f) if f.is_finite() => Ok(number_to_string(*f)),
        Arg::Float(_) | Arg::Null => Ok("null".to_string()),
        Arg::Bool(b) => Ok(b.to_string()),
        Arg::Undefined => Ok("undefined".to_string()),
        Arg::Json(value) => serde_json::to_string(value),
        Arg::Opaque(_) | Arg::Unserializable => return UNSERIALIZABLE.to_string(),
    };
    encoded.unwrap_or_else(|_| UNSERIALIZABLE.to_string())
}

/// Numeric coercion of a whole value; NaN when the value has no numeric form.
fn to_number(arg: &Arg) -> f64 {
    match arg {
        Arg::Int(i) => *i as f64,
        Arg::Float(f) => *f,
        Arg::Bool(b) => f64::from(u8::from(*b)),
        Arg::Null => 0.0,
        Arg::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse().unwrap_or(f64::NAN)
            }
        }
        Arg::Undefined | Arg::Json(_) | Arg::Opaque(_) | Arg::Unserializable => f64::NAN,
    }
}

/// Parse the longest numeric prefix of `s`, ignoring leading whitespace.
fn leading_number(s: &str, allow_fraction: bool) -> f64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut has_digits = end > digits_start;
    if allow_fraction {
        if end < bytes.len() && bytes[end] == b'.' {
            let frac_start = end + 1;
            let mut frac_end = frac_start;
            while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
                frac_end += 1;
            }
            if has_digits || frac_end > frac_start {
                has_digits = true;
                end = frac_end;
            }
        }
        if has_digits && end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
            let mut exp_end = end + 1;
            if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
                exp_end += 1;
            }
            let exp_digits = exp_end;
            while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
                exp_end += 1;
            }
            if exp_end > exp_digits {
                end = exp_end;
            }
        }
    }
    if !has_digits {
        return f64::NAN;
    }
    s[..end].parse().unwrap_or(f64::NAN)
}
