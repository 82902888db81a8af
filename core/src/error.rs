//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// Only identifier problems and document loading abort a generation run.
/// Schema-shape ambiguities never surface here; they become diagnostics.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The document could not be parsed or failed structural validation.
    #[from(ignore)]
    #[display("Load Error: {_0}")]
    Load(String),

    /// An operation has no `operationId`.
    #[from(ignore)]
    #[display("must have operationId in {method} {path}")]
    MissingOperationId {
        /// Path template of the offending operation.
        path: String,
        /// HTTP method of the offending operation.
        method: String,
    },

    /// Two operations share one `operationId`.
    #[from(ignore)]
    #[display("duplicate operationId '{operation_id}' in {second_path} (first used in {first_path})")]
    DuplicateOperationId {
        /// The repeated identifier.
        operation_id: String,
        /// Path where the identifier was first registered.
        first_path: String,
        /// Path where the identifier was seen again.
        second_path: String,
    },

    /// Two different definitions were produced under one type name.
    #[from(ignore)]
    #[display("conflicting definitions for type '{_0}'")]
    ConflictingTypeName(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

impl AppError {
    /// Whether this error is tied to a single operation, as opposed to the whole run.
    pub fn is_operation_scoped(&self) -> bool {
        matches!(
            self,
            AppError::MissingOperationId { .. }
                | AppError::DuplicateOperationId { .. }
                | AppError::ConflictingTypeName(_)
        )
    }
}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_conversion() {
        let io_err = Error::new(ErrorKind::NotFound, "missing");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
        assert!(!app_err.is_operation_scoped());
    }

    #[test]
    fn test_string_conversion() {
        let app_err: AppError = String::from("something wrong").into();
        match app_err {
            AppError::General(s) => assert_eq!(s, "something wrong"),
            _ => panic!("String should convert to AppError::General"),
        }
    }

    #[test]
    fn test_missing_operation_id_names_path() {
        let err = AppError::MissingOperationId {
            path: "/promos".into(),
            method: "POST".into(),
        };
        assert_eq!(err.to_string(), "must have operationId in POST /promos");
        assert!(err.is_operation_scoped());
    }

    #[test]
    fn test_duplicate_operation_id_names_both_paths() {
        let err = AppError::DuplicateOperationId {
            operation_id: "getUser".into(),
            first_path: "/a".into(),
            second_path: "/b".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/a"));
        assert!(msg.contains("/b"));
        assert!(msg.contains("getUser"));
    }
}
