#![deny(missing_docs)]

//! # OAS Typegen Core
//!
//! Derives named type declarations from the operations of an OpenAPI 3.x
//! document: grouped parameters, request bodies and status-code responses.

/// Shared error types.
pub mod error;

/// OpenAPI (OAS) loading and type generation.
pub mod oas;

/// Rendering of generated types.
pub mod emitter;

use std::path::Path;

pub use emitter::{emit_all, render_rust, JsonEmitter, RustEmitter, TypeEmitter};
pub use error::{AppError, AppResult};
pub use oas::{
    generate, load_document, load_document_file, CollisionPolicy, Diagnostic, FailurePolicy,
    Field, FieldSource, GeneratedType, GenerationReport, GeneratorConfig, NestedObjects,
    OperationFailure, ShimOpenApi, TypeKind, DEFAULT_STATUS_CODES,
};

/// Loads a document from a string and generates its types.
pub fn generate_from_str(content: &str, config: &GeneratorConfig) -> AppResult<GenerationReport> {
    let document = load_document(content)?;
    generate(&document, config)
}

/// Loads a document from disk and generates its types.
pub fn generate_from_file(path: &Path, config: &GeneratorConfig) -> AppResult<GenerationReport> {
    let document = load_document_file(path)?;
    generate(&document, config)
}
