#![deny(missing_docs)]

//! # Naming Utilities
//!
//! Helpers for deriving type names from operation ids, locations, property keys
//! and status codes.

use heck::ToUpperCamelCase;
use regex::Regex;
use std::sync::OnceLock;

/// Name used when a schema offers no reference, hint, or title.
pub const FALLBACK_NAME: &str = "NO_NAME";

fn non_alphanumeric() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-zA-Z0-9]+").expect("static regex"))
}

/// Converts an identifier (`applyPromo`, `apply_promo`, `apply-promo`) to `ApplyPromo`.
pub fn camel(s: &str) -> String {
    s.to_upper_camel_case()
}

/// Removes every character that is not an ASCII letter or digit.
pub fn clear_string(s: &str) -> String {
    non_alphanumeric().replace_all(s, "").into_owned()
}

/// Reason phrase of a status code with separators removed.
///
/// `200` -> `OK`, `400` -> `BadRequest`, `500` -> `InternalServerError`.
/// Codes without a canonical reason become `Status<code>`.
pub fn status_text(code: u16) -> String {
    http::StatusCode::from_u16(code)
        .ok()
        .and_then(|status| status.canonical_reason())
        .map(clear_string)
        .unwrap_or_else(|| format!("Status{}", code))
}

/// `<OperationId><Location>Parameter`
pub fn location_parameter_name(operation: &str, location: &str) -> String {
    format!("{}{}Parameter", camel(operation), camel(location))
}

/// `<OperationId>Parameters`
pub fn parameters_name(operation: &str) -> String {
    format!("{}Parameters", camel(operation))
}

/// `<OperationId>Request`
pub fn request_hint(operation: &str) -> String {
    format!("{}Request", camel(operation))
}

/// `<OperationId>Response`
pub fn response_hint(operation: &str) -> String {
    format!("{}Response", camel(operation))
}

/// `<OperationId><StatusText>Response`
pub fn status_response_name(operation: &str, code: u16) -> String {
    format!("{}{}Response", camel(operation), status_text(code))
}

/// `<Parent><Property>`
pub fn nested_name(parent: &str, property: &str) -> String {
    format!("{}{}", parent, camel(property))
}
