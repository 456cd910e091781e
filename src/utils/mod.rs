//! Cross-platform utilities and helpers
//!
//! - [`platform`] - detection command, config locations, path expansion
//! - [`value_to_string`] - textual form of loosely-typed configuration values

pub mod platform;

pub use platform::{command_exists, detect_ip_command, is_windows, resolve_path};

use serde_json::Value;

/// Textual form of a configuration value.
///
/// Strings are returned verbatim (no quotes); every other value uses its
/// JSON text, so `2181` stays `2181`, `true` stays `true` and `null` becomes
/// `null`.
///
/// # Examples
///
/// ```
/// use panda_ctx::utils::value_to_string;
/// use serde_json::json;
///
/// assert_eq!(value_to_string(&json!("10.0.0.1")), "10.0.0.1");
/// assert_eq!(value_to_string(&json!(2181)), "2181");
/// assert_eq!(value_to_string(&json!(["a", 1])), r#"["a",1]"#);
/// ```
#[must_use]
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
