#![deny(missing_docs)]

//! # Response Resolution
//!
//! Registers a `<OperationId><StatusText>Response` type for every allowed status
//! code that carries a JSON schema. Codes outside the allowlist are ignored.

use crate::error::AppResult;
use crate::oas::models::{Diagnostic, Field, FieldSource, GeneratedType};
use crate::oas::naming::{response_hint, status_response_name};
use crate::oas::resolver::body::{json_media, BODY_FIELD};
use crate::oas::resolver::types::SchemaResolver;
use crate::oas::shims::ShimResponse;
use std::collections::BTreeMap;
use utoipa::openapi::RefOr;

/// Resolves the responses of one operation, visiting `status_codes` in order.
///
/// Each body is resolved with the hint `<OperationId>Response`; the status type
/// wraps the result in a single `body` field. Returns the registered names.
pub fn resolve_responses(
    resolver: &mut SchemaResolver<'_>,
    operation_id: &str,
    responses: &BTreeMap<String, RefOr<ShimResponse>>,
    status_codes: &[u16],
) -> AppResult<Vec<String>> {
    let components = resolver.components();
    let mut names = Vec::new();

    for code in status_codes {
        let Some(entry) = responses.get(&code.to_string()) else {
            continue;
        };

        let Some(response) = components.resolve_response(entry) else {
            if let RefOr::Ref(r) = entry {
                resolver.diagnose(Diagnostic::UnresolvedReference {
                    context: status_response_name(operation_id, *code),
                    reference: r.ref_location.clone(),
                });
            }
            continue;
        };

        let Some(schema) = json_media(&response.content).and_then(|m| m.schema.as_ref()) else {
            tracing::debug!(operation_id, status = code, "response has no JSON schema, skipped");
            continue;
        };

        let resolved = resolver.resolve(schema, &response_hint(operation_id), FieldSource::Response)?;
        let wrapper = GeneratedType::new(
            status_response_name(operation_id, *code),
            vec![Field::new(BODY_FIELD, resolved.kind, FieldSource::Response)],
        );
        names.push(resolver.register(wrapper)?);
    }

    if tracing::enabled!(tracing::Level::DEBUG) {
        let ignored: Vec<&String> = responses
            .keys()
            .filter(|k| !status_codes.iter().any(|c| c.to_string() == **k))
            .collect();
        if !ignored.is_empty() {
            tracing::debug!(operation_id, ?ignored, "status codes outside the allowlist ignored");
        }
    }

    Ok(names)
}
