#![deny(missing_docs)]

//! # Body Resolution
//!
//! Request body handling. Only `application/json` content is consulted; any
//! other media type is skipped without error.

use crate::error::AppResult;
use crate::oas::models::{Diagnostic, Field, FieldSource, GeneratedType, TypeKind};
use crate::oas::naming::request_hint;
use crate::oas::resolver::types::SchemaResolver;
use crate::oas::shims::{ShimMediaType, ShimRequestBody};
use std::collections::BTreeMap;
use utoipa::openapi::RefOr;

/// The only media type the generator reads.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Name of the single field carried by wrapper types.
pub const BODY_FIELD: &str = "body";

/// Returns the JSON media entry of a content map when it carries a schema.
pub(crate) fn json_media(content: &BTreeMap<String, ShimMediaType>) -> Option<&ShimMediaType> {
    content
        .get(JSON_MEDIA_TYPE)
        .filter(|media| media.schema.is_some())
}

/// Resolves an operation's request body with the hint `<OperationId>Request`.
///
/// An object schema is registered by the resolver under its canonical name.
/// Any other shape is wrapped in a type of that name with a single `body` field.
/// Returns the name of the request type, or `None` when nothing was generated.
pub fn resolve_request_body(
    resolver: &mut SchemaResolver<'_>,
    operation_id: &str,
    body: &RefOr<ShimRequestBody>,
) -> AppResult<Option<String>> {
    let components = resolver.components();
    let Some(body) = components.resolve_request_body(body) else {
        if let RefOr::Ref(r) = body {
            resolver.diagnose(Diagnostic::UnresolvedReference {
                context: request_hint(operation_id),
                reference: r.ref_location.clone(),
            });
        }
        return Ok(None);
    };

    let Some(schema) = json_media(&body.content).and_then(|m| m.schema.as_ref()) else {
        tracing::debug!(
            operation_id,
            media_types = ?body.content.keys().collect::<Vec<_>>(),
            "request body has no JSON schema, skipped"
        );
        return Ok(None);
    };

    let resolved = resolver.resolve(schema, &request_hint(operation_id), FieldSource::Body)?;
    match resolved.kind {
        TypeKind::Named(name) => Ok(Some(name)),
        kind => {
            let wrapper = GeneratedType::new(
                resolved.name,
                vec![Field::new(BODY_FIELD, kind, FieldSource::Body)],
            );
            Ok(Some(resolver.register(wrapper)?))
        }
    }
}
