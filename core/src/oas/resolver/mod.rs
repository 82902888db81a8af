#![deny(missing_docs)]

//! # Resolver Module
//!
//! Logic for turning OpenAPI schemas, parameters, request bodies and responses
//! into generated types.
//!
//! Handles:
//! - Name precedence and recursive type-kind mapping (`types`).
//! - Location buckets and the parameters aggregate (`params`).
//! - JSON request bodies (`body`).
//! - JSON responses for an allowlist of status codes (`responses`).

pub mod body;
pub mod params;
pub mod responses;
pub mod types;

pub use body::{resolve_request_body, BODY_FIELD, JSON_MEDIA_TYPE};
pub use params::{collect_parameters, group_parameters};
pub use responses::resolve_responses;
pub use types::{canonical_name, ResolvedSchema, SchemaResolver};
