#![deny(missing_docs)]

//! # Routes Module
//!
//! Walks the `paths` of a document in sorted order and hands every present
//! operation (GET, POST, PUT, PATCH, DELETE) to the `OperationProcessor`.

pub mod builder;

use crate::error::AppResult;
use crate::oas::config::{FailurePolicy, GeneratorConfig};
use crate::oas::models::{GenerationReport, OperationFailure};
use crate::oas::routes::builder::OperationProcessor;
use crate::oas::shims::ShimOpenApi;

/// Generates the ordered type list for a loaded document.
///
/// Under `FailurePolicy::Abort` the first fatal error ends the run. Under
/// `FailurePolicy::Continue` an operation-scoped failure skips that operation
/// and is recorded in `GenerationReport::failures`; any other error still ends
/// the run.
pub fn generate(document: &ShimOpenApi, config: &GeneratorConfig) -> AppResult<GenerationReport> {
    let mut processor = OperationProcessor::new(&document.components, config);
    let mut failures = Vec::new();

    tracing::info!(paths = document.paths.items.len(), "generating types");

    for (path, item) in &document.paths.items {
        for (method, operation) in item.operations() {
            if let Err(error) = processor.process(path, method, &item.parameters, operation) {
                match config.failure_policy {
                    FailurePolicy::Continue if error.is_operation_scoped() => {
                        tracing::warn!(%method, path = path.as_str(), %error, "operation skipped");
                        failures.push(OperationFailure {
                            path: path.clone(),
                            method: method.to_string(),
                            error,
                        });
                    }
                    _ => return Err(error),
                }
            }
        }
    }

    let (types, diagnostics) = processor.finish();
    tracing::info!(
        types = types.len(),
        diagnostics = diagnostics.len(),
        failures = failures.len(),
        "generation finished"
    );

    Ok(GenerationReport {
        types,
        diagnostics,
        failures,
    })
}
