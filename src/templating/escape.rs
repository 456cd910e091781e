//! Value escaping strategies for context items.
//!
//! Context items are either used verbatim or embedded into templates that
//! are themselves JSON documents, where each value lands inside an existing
//! pair of quotes. [`JsonString`] produces the escaped interior of a JSON
//! string literal for that case.

use std::fmt::Write as _;

/// Transforms a context value before it is stored in the item map.
pub trait Escaper {
    /// Escapes a single value.
    fn escape(&self, value: &str) -> String;
}

/// Leaves values untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Escaper for Identity {
    fn escape(&self, value: &str) -> String {
        value.to_string()
    }
}

/// Escapes values as the interior of a JSON string literal.
///
/// The value is serialized as a JSON string and exactly the surrounding
/// quote characters are dropped, e.g. `C:\dcos "x"` becomes
/// `C:\\dcos \"x\"`. The result is pure ASCII: every non-ASCII character
/// is written as `\uXXXX` (UTF-16 code units, lowercase hex), so `é` becomes
/// `\u00e9`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonString;

impl Escaper for JsonString {
    fn escape(&self, value: &str) -> String {
        // Serializing a str into a String cannot fail.
        let quoted = serde_json::to_string(value).unwrap_or_default();
        let interior = quoted.strip_prefix('"').and_then(|s| s.strip_suffix('"')).unwrap_or(quoted.as_str());
        ascii_only(interior)
    }
}

fn ascii_only(escaped: &str) -> String {
    if escaped.is_ascii() {
        return escaped.to_string();
    }

    let mut out = String::with_capacity(escaped.len() + 8);
    let mut units = [0u16; 2];
    for c in escaped.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            for unit in c.encode_utf16(&mut units) {
                let _ = write!(out, "\\u{unit:04x}");
            }
        }
    }
    out
}

/// Returns the escaper for a retrieval: [`JsonString`] when `json_ready`,
/// [`Identity`] otherwise.
#[must_use]
pub fn escaper_for(json_ready: bool) -> &'static dyn Escaper {
    if json_ready {
        &JsonString
    } else {
        &Identity
    }
}
