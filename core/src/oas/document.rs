#![deny(missing_docs)]

//! # Document Loading
//!
//! Reads an OpenAPI document (YAML or JSON) into the shim model and applies the
//! structural checks the generator relies on.

use crate::error::{AppError, AppResult};
use crate::oas::shims::ShimOpenApi;
use std::fs;
use std::path::Path;

/// Parses and validates an OpenAPI document from a string.
///
/// JSON is detected by a leading `{`; anything else is read as YAML.
pub fn load_document(content: &str) -> AppResult<ShimOpenApi> {
    let document: ShimOpenApi = if content.trim_start().starts_with('{') {
        serde_json::from_str(content)
            .map_err(|e| AppError::Load(format!("Failed to parse OpenAPI JSON: {}", e)))?
    } else {
        serde_yaml::from_str(content)
            .map_err(|e| AppError::Load(format!("Failed to parse OpenAPI YAML: {}", e)))?
    };

    validate_structure(&document)?;
    Ok(document)
}

/// Reads, parses and validates an OpenAPI document from disk.
pub fn load_document_file(path: &Path) -> AppResult<ShimOpenApi> {
    let content = fs::read_to_string(path).map_err(|e| {
        AppError::Load(format!("Failed to read OpenAPI file {:?}: {}", path, e))
    })?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "loaded document");
    load_document(&content)
}

/// Structural validation: an OAS 3.x version marker and well-formed path keys.
pub fn validate_structure(document: &ShimOpenApi) -> AppResult<()> {
    if let Some(swagger) = &document.swagger {
        return Err(AppError::Load(format!(
            "Swagger {} documents are not supported; convert to OpenAPI 3.x",
            swagger
        )));
    }

    match document.openapi.as_deref() {
        Some(version) if version.starts_with("3.") => {}
        Some(version) => {
            return Err(AppError::Load(format!(
                "Unsupported OpenAPI version '{}'",
                version
            )))
        }
        None => return Err(AppError::Load("Missing 'openapi' version field".into())),
    }

    if let Some(bad) = document.paths.items.keys().find(|p| !p.starts_with('/')) {
        return Err(AppError::Load(format!(
            "Path '{}' must start with '/'",
            bad
        )));
    }

    Ok(())
}
