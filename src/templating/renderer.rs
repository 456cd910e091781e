//! Template rendering with Tera.
//!
//! Package resources are Tera templates whose variables are the context
//! items, each available as a top-level variable (`{{ master_location }}`).
//! Templates may ignore items they don't know about; referencing an item
//! that does not exist is an error.

use std::error::Error as _;
use tera::{Context as TeraContext, Tera};
use tracing::debug;

use super::context::ContextItems;
use crate::core::ContextError;

/// Builds a Tera context exposing every item as a top-level variable.
#[must_use]
pub fn to_tera_context(items: &ContextItems) -> TeraContext {
    let mut context = TeraContext::new();
    for (key, value) in items {
        context.insert(key.as_str(), value);
    }
    context
}

/// Renders `template_content` with the given context items.
///
/// Autoescaping is off: JSON targets should be fed items retrieved with
/// `json_ready` instead.
pub fn render_template(template_content: &str, items: &ContextItems) -> Result<String, ContextError> {
    debug!("Rendering template with {} context items", items.len());

    // A fresh instance per render keeps no state between packages.
    let mut tera = Tera::default();
    tera.render_str(template_content, &to_tera_context(items)).map_err(|e| {
        ContextError::RenderError {
            reason: flatten_tera_error(&e),
        }
    })
}

fn flatten_tera_error(error: &tera::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    // Tera names inline templates "__tera_one_off", which means nothing to users.
    message.replace("'__tera_one_off'", "template")
}
