#![deny(missing_docs)]

//! # Parameter Grouping
//!
//! Partitions an operation's parameters by location and registers one type per
//! populated location plus an aggregate `<OperationId>Parameters` type.

use crate::error::AppResult;
use crate::oas::models::{Diagnostic, Field, FieldSource, GeneratedType, TypeKind};
use crate::oas::naming::{location_parameter_name, parameters_name};
use crate::oas::resolver::types::SchemaResolver;
use crate::oas::shims::{ParameterLocation, ShimComponents, ShimParameter};
use utoipa::openapi::RefOr;

/// Merges path-level and operation-level parameters and resolves `$ref`s.
///
/// Path-level parameters come first; an operation-level parameter with the same
/// name and location replaces its path-level counterpart in place. References
/// that do not resolve are skipped and reported.
pub fn collect_parameters<'a>(
    components: &'a ShimComponents,
    path_level: &'a [RefOr<ShimParameter>],
    operation_level: &'a [RefOr<ShimParameter>],
    operation_id: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<&'a ShimParameter> {
    let mut merged: Vec<&'a ShimParameter> = Vec::new();

    for (index, param) in path_level.iter().chain(operation_level).enumerate() {
        let Some(resolved) = components.resolve_parameter(param) else {
            if let RefOr::Ref(r) = param {
                diagnostics.push(Diagnostic::UnresolvedReference {
                    context: operation_id.to_string(),
                    reference: r.ref_location.clone(),
                });
            }
            continue;
        };

        let from_operation = index >= path_level.len();
        let existing = merged
            .iter()
            .position(|p| p.name == resolved.name && p.location == resolved.location);
        match existing {
            Some(pos) if from_operation => merged[pos] = resolved,
            Some(_) => {}
            None => merged.push(resolved),
        }
    }

    merged
}

/// Registers `<Op><Location>Parameter` for every non-empty location, then `<Op>Parameters`.
///
/// Locations are visited in the order path, query, header, cookie; parameters
/// keep their source order. Parameters without a schema are left out of their
/// location type. The aggregate has one field per non-empty location and is
/// registered even when every location is empty. Returns the name the
/// aggregate was registered under.
pub fn group_parameters(
    resolver: &mut SchemaResolver<'_>,
    operation_id: &str,
    params: &[&ShimParameter],
) -> AppResult<String> {
    let mut aggregate = Vec::new();

    for location in ParameterLocation::ALL {
        let bucket: Vec<&ShimParameter> = params
            .iter()
            .copied()
            .filter(|p| p.location == location)
            .collect();
        if bucket.is_empty() {
            continue;
        }

        let source = FieldSource::from(location);
        let mut fields = Vec::with_capacity(bucket.len());
        for param in bucket {
            let Some(schema) = &param.schema else {
                tracing::debug!(operation_id, parameter = %param.name, "parameter without schema skipped");
                continue;
            };
            let resolved = resolver.resolve(schema, &param.name, source)?;
            fields.push(Field::new(param.name.clone(), resolved.kind, source));
        }

        let name = location_parameter_name(operation_id, location.as_str());
        let registered = resolver.register(GeneratedType::new(name, fields))?;
        aggregate.push(Field::new(
            location.as_str(),
            TypeKind::Named(registered),
            source,
        ));
    }

    resolver.register(GeneratedType::new(parameters_name(operation_id), aggregate))
}
