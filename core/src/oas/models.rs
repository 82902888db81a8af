#![deny(missing_docs)]

//! # Generation Models
//!
//! Output structures handed from the generator to a `TypeEmitter`.

use crate::error::AppError;
use crate::oas::shims::ParameterLocation;
use serde::Serialize;
use std::fmt;

/// The shape of a single field value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum TypeKind {
    /// `string`
    String,
    /// `integer`, always 32-bit signed.
    Int32,
    /// `number`, always 64-bit floating point.
    Float64,
    /// `boolean`
    Boolean,
    /// `array` of the inner kind.
    Sequence(Box<TypeKind>),
    /// A generated or referenced type, by canonical name.
    Named(String),
    /// The schema declared no kind, or one the generator does not know.
    Unspecified,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::String => f.write_str("string"),
            TypeKind::Int32 => f.write_str("int32"),
            TypeKind::Float64 => f.write_str("float64"),
            TypeKind::Boolean => f.write_str("boolean"),
            TypeKind::Sequence(inner) => write!(f, "[]{}", inner),
            TypeKind::Named(name) => f.write_str(name),
            TypeKind::Unspecified => f.write_str("unspecified"),
        }
    }
}

/// Where a field's value travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSource {
    /// Path segment.
    Path,
    /// Query string.
    Query,
    /// Request header.
    Header,
    /// Cookie.
    Cookie,
    /// Request body.
    Body,
    /// Response body.
    Response,
}

impl From<ParameterLocation> for FieldSource {
    fn from(location: ParameterLocation) -> Self {
        match location {
            ParameterLocation::Path => FieldSource::Path,
            ParameterLocation::Query => FieldSource::Query,
            ParameterLocation::Header => FieldSource::Header,
            ParameterLocation::Cookie => FieldSource::Cookie,
        }
    }
}

impl fmt::Display for FieldSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FieldSource::Path => "path",
            FieldSource::Query => "query",
            FieldSource::Header => "header",
            FieldSource::Cookie => "cookie",
            FieldSource::Body => "body",
            FieldSource::Response => "response",
        };
        f.write_str(s)
    }
}

/// One member of a generated type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Field {
    /// Wire name (property key, parameter name, or bucket name).
    pub name: String,
    /// Value shape.
    pub kind: TypeKind,
    /// Source-location tag.
    pub source: FieldSource,
}

impl Field {
    /// Creates a field.
    pub fn new(name: impl Into<String>, kind: TypeKind, source: FieldSource) -> Self {
        Self {
            name: name.into(),
            kind,
            source,
        }
    }
}

/// A named type declaration: the unit handed to emitters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedType {
    /// Canonical name.
    pub name: String,
    /// Fields in declaration order.
    pub fields: Vec<Field>,
}

impl GeneratedType {
    /// Creates a type declaration.
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Looks up a field by wire name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A non-fatal degradation observed while generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "diagnostic", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A schema had no kind, or an unknown one; the value became `Unspecified`.
    UnspecifiedKind {
        /// Name the schema was being resolved under.
        context: String,
        /// The declared kind, if one was present.
        declared: Option<String>,
    },
    /// An array schema had no `items`.
    MissingItems {
        /// Name the array was being resolved under.
        context: String,
    },
    /// A `$ref` did not point at a local component.
    UnresolvedReference {
        /// Name the reference was being resolved under.
        context: String,
        /// The reference target.
        reference: String,
    },
    /// Two different definitions were produced under one name.
    NameCollision {
        /// The contested name.
        name: String,
        /// Name the later definition ended up under, if it was kept.
        renamed_to: Option<String>,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnspecifiedKind { context, declared } => match declared {
                Some(kind) => write!(f, "{}: unrecognized type '{}', left unspecified", context, kind),
                None => write!(f, "{}: no type declared, left unspecified", context),
            },
            Diagnostic::MissingItems { context } => {
                write!(f, "{}: array without items, element left unspecified", context)
            }
            Diagnostic::UnresolvedReference { context, reference } => {
                write!(f, "{}: could not resolve '{}'", context, reference)
            }
            Diagnostic::NameCollision { name, renamed_to } => match renamed_to {
                Some(new_name) => write!(
                    f,
                    "{}: conflicting definition emitted as '{}'",
                    name, new_name
                ),
                None => write!(f, "{}: conflicting definition dropped", name),
            },
        }
    }
}

/// A fatal error attributed to one operation when the run keeps going.
#[derive(Debug)]
pub struct OperationFailure {
    /// Path template of the operation.
    pub path: String,
    /// HTTP method of the operation.
    pub method: String,
    /// What went wrong.
    pub error: AppError,
}

/// Result of a generation run.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Types in emission order.
    pub types: Vec<GeneratedType>,
    /// Non-fatal degradations, in the order they were observed.
    pub diagnostics: Vec<Diagnostic>,
    /// Operations skipped under `FailurePolicy::Continue`.
    pub failures: Vec<OperationFailure>,
}

impl GenerationReport {
    /// Looks up an emitted type by name.
    pub fn get(&self, name: &str) -> Option<&GeneratedType> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Emitted type names, in order.
    pub fn type_names(&self) -> Vec<&str> {
        self.types.iter().map(|t| t.name.as_str()).collect()
    }

    /// True when no operation failed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}
