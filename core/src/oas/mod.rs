#![deny(missing_docs)]

//! # OpenAPI Generation Module
//!
//! - **shims**: Deserialization layer for the document.
//! - **document**: Loading and structural validation.
//! - **resolver**: Schema, parameter, body and response resolution.
//! - **routes**: Walk over `paths` and per-operation processing.
//! - **registry**: Ordered output with name-collision handling.
//! - **models**: Generated types and diagnostics.

pub mod config;
pub mod document;
pub mod models;
pub mod naming;
pub mod ref_utils;
pub mod registry;
pub mod resolver;
pub mod routes;
pub mod shims;

pub use config::{
    CollisionPolicy, FailurePolicy, GeneratorConfig, NestedObjects, DEFAULT_STATUS_CODES,
};
pub use document::{load_document, load_document_file};
pub use models::{
    Diagnostic, Field, FieldSource, GeneratedType, GenerationReport, OperationFailure, TypeKind,
};
pub use routes::generate;
pub use shims::ShimOpenApi;
