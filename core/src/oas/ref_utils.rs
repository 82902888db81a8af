#![deny(missing_docs)]

//! # Reference Utilities
//!
//! Helpers for reading `$ref` targets. External documents are never fetched:
//! only local `#/components/{section}/{name}` pointers resolve.

use crate::oas::shims::{
    ShimComponents, ShimParameter, ShimRequestBody, ShimResponse, ShimSchema,
};
use percent_encoding::percent_decode_str;
use std::collections::BTreeMap;
use utoipa::openapi::RefOr;

/// Longest chain of component aliases (`A: {$ref: B}`) followed before giving up.
const MAX_ALIAS_DEPTH: usize = 16;

/// Returns the final path segment of a reference, decoded.
///
/// `#/components/schemas/PromoResult` -> `PromoResult`
pub fn ref_name(ref_location: &str) -> String {
    let segment = ref_location.rsplit('/').next().unwrap_or_default();
    let segment = segment.trim_start_matches('#');
    decode_pointer_segment(segment)
}

/// Extracts a component name from a `$ref` if it points to `#/components/{section}/{name}`.
///
/// Returns `None` if the reference is not local to the current document.
pub(crate) fn extract_component_name(ref_str: &str, section: &str) -> Option<String> {
    let pointer = ref_str.strip_prefix("#/")?;
    let segments: Vec<&str> = pointer.split('/').collect();

    if segments.len() != 3 {
        return None;
    }
    if segments[0] != "components" || segments[1] != section {
        return None;
    }

    let name = decode_pointer_segment(segments[2]);
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Decodes a JSON Pointer segment (handles `~1` and `~0`).
pub(crate) fn decode_pointer_segment(segment: &str) -> String {
    let decoded = segment.replace("~1", "/").replace("~0", "~");
    percent_decode_str(&decoded).decode_utf8_lossy().into_owned()
}

/// Follows `RefOr` links through one component section until an inline value is found.
fn follow<'a, T>(
    start: &'a RefOr<T>,
    section: &str,
    table: &'a BTreeMap<String, RefOr<T>>,
) -> Option<&'a T> {
    let mut current = start;
    for _ in 0..MAX_ALIAS_DEPTH {
        match current {
            RefOr::T(value) => return Some(value),
            RefOr::Ref(r) => {
                let name = extract_component_name(&r.ref_location, section)?;
                current = table.get(&name)?;
            }
        }
    }
    None
}

impl ShimComponents {
    /// Resolves a schema `$ref` to its inline definition.
    pub fn resolve_schema_ref(&self, ref_location: &str) -> Option<&ShimSchema> {
        let name = extract_component_name(ref_location, "schemas")?;
        follow(self.schemas.get(&name)?, "schemas", &self.schemas)
    }

    /// Resolves a possibly-referenced parameter.
    pub fn resolve_parameter<'a>(
        &'a self,
        param: &'a RefOr<ShimParameter>,
    ) -> Option<&'a ShimParameter> {
        follow(param, "parameters", &self.parameters)
    }

    /// Resolves a possibly-referenced request body.
    pub fn resolve_request_body<'a>(
        &'a self,
        body: &'a RefOr<ShimRequestBody>,
    ) -> Option<&'a ShimRequestBody> {
        follow(body, "requestBodies", &self.request_bodies)
    }

    /// Resolves a possibly-referenced response.
    pub fn resolve_response<'a>(
        &'a self,
        response: &'a RefOr<ShimResponse>,
    ) -> Option<&'a ShimResponse> {
        follow(response, "responses", &self.responses)
    }
}
