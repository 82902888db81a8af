#![deny(missing_docs)]

//! # Document Shims
//!
//! Intermediate deserialization layer for the parts of an OpenAPI document the
//! generator reads. Unknown keys are ignored.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use utoipa::openapi::RefOr;

/// Root of an OpenAPI document.
#[derive(Clone, Default, Deserialize)]
pub struct ShimOpenApi {
    /// OpenAPI version (e.g. "3.0.3").
    pub openapi: Option<String>,

    /// Swagger version (e.g. "2.0"). Only read to reject legacy documents.
    pub swagger: Option<String>,

    /// The Paths Object.
    #[serde(default)]
    pub paths: ShimPaths,

    /// Reusable components.
    #[serde(default)]
    pub components: ShimComponents,
}

/// Represents the Paths Object. Specification extensions (`x-...`) are dropped.
#[derive(Clone, Default)]
pub struct ShimPaths {
    /// Path items keyed by path template, sorted.
    pub items: BTreeMap<String, ShimPathItem>,
}

impl ShimPaths {
    /// Returns true when no concrete path items are present.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'de> Deserialize<'de> for ShimPaths {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        let mut items = BTreeMap::new();

        for (key, value) in raw {
            if key.starts_with("x-") {
                continue;
            }
            let path_item = serde_json::from_value::<ShimPathItem>(value).map_err(|e| {
                DeError::custom(format!("Failed to parse path item '{}': {}", key, e))
            })?;
            items.insert(key, path_item);
        }

        Ok(Self { items })
    }
}

/// The HTTP methods the generator visits, in visiting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
}

impl HttpMethod {
    /// Every visited method, in walk order.
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
    ];

    /// Upper-case method token.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Path Item.
#[derive(Clone, Default, Deserialize)]
pub struct ShimPathItem {
    /// Parameters shared by every operation under this path.
    #[serde(default)]
    pub parameters: Vec<RefOr<ShimParameter>>,
    /// GET operation.
    pub get: Option<ShimOperation>,
    /// POST operation.
    pub post: Option<ShimOperation>,
    /// PUT operation.
    pub put: Option<ShimOperation>,
    /// PATCH operation.
    pub patch: Option<ShimOperation>,
    /// DELETE operation.
    pub delete: Option<ShimOperation>,
}

impl ShimPathItem {
    /// Returns the operation registered for `method`, if any.
    pub fn operation(&self, method: HttpMethod) -> Option<&ShimOperation> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
        }
    }

    /// Present operations in walk order.
    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &ShimOperation)> {
        HttpMethod::ALL
            .into_iter()
            .filter_map(move |m| self.operation(m).map(|op| (m, op)))
    }
}

/// An Operation Object.
#[derive(Clone, Default, Deserialize)]
pub struct ShimOperation {
    /// Unique identifier; seeds every derived type name.
    #[serde(rename = "operationId")]
    pub operation_id: Option<String>,
    /// Operation parameters in source order.
    #[serde(default)]
    pub parameters: Vec<RefOr<ShimParameter>>,
    /// Request body.
    #[serde(rename = "requestBody")]
    pub request_body: Option<RefOr<ShimRequestBody>>,
    /// Responses keyed by status code.
    #[serde(default)]
    pub responses: BTreeMap<String, RefOr<ShimResponse>>,
}

/// Transport position of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    /// Path segment.
    Path,
    /// Query string.
    Query,
    /// Request header.
    Header,
    /// Cookie.
    Cookie,
}

impl ParameterLocation {
    /// Bucket order used when grouping parameters.
    pub const ALL: [ParameterLocation; 4] = [
        ParameterLocation::Path,
        ParameterLocation::Query,
        ParameterLocation::Header,
        ParameterLocation::Cookie,
    ];

    /// Lower-case location name as written in documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Cookie => "cookie",
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Parameter Object.
#[derive(Clone, Deserialize)]
pub struct ShimParameter {
    /// Name of the parameter.
    pub name: String,
    /// Location of the parameter.
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// Schema definition.
    pub schema: Option<RefOr<ShimSchema>>,
}

/// A Request Body Object.
#[derive(Clone, Default, Deserialize)]
pub struct ShimRequestBody {
    /// Media types keyed by content type.
    #[serde(default)]
    pub content: BTreeMap<String, ShimMediaType>,
}

/// A Response Object.
#[derive(Clone, Default, Deserialize)]
pub struct ShimResponse {
    /// Media types keyed by content type.
    #[serde(default)]
    pub content: BTreeMap<String, ShimMediaType>,
}

/// A Media Type Object.
#[derive(Clone, Default, Deserialize)]
pub struct ShimMediaType {
    /// Schema of the payload.
    pub schema: Option<RefOr<ShimSchema>>,
}

/// The `type` keyword: a single name, or an OAS 3.1 list of names.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ShimSchemaType {
    /// `type: string`
    Single(String),
    /// `type: [string, "null"]`
    Multiple(Vec<String>),
}

impl ShimSchemaType {
    /// The first declared type name that is not `null`.
    pub fn primary(&self) -> Option<&str> {
        match self {
            ShimSchemaType::Single(s) => Some(s.as_str()),
            ShimSchemaType::Multiple(list) => list
                .iter()
                .map(String::as_str)
                .find(|t| !t.eq_ignore_ascii_case("null")),
        }
    }
}

/// An inline Schema Object.
#[derive(Clone, Default, Deserialize)]
pub struct ShimSchema {
    /// Declared kind.
    #[serde(rename = "type")]
    pub schema_type: Option<ShimSchemaType>,
    /// Optional title.
    pub title: Option<String>,
    /// Item schema for arrays.
    pub items: Option<Box<RefOr<ShimSchema>>>,
    /// Properties for objects, sorted by key.
    #[serde(default)]
    pub properties: BTreeMap<String, RefOr<ShimSchema>>,
}

/// Reusable components consulted while resolving `$ref`s.
#[derive(Clone, Default, Deserialize)]
pub struct ShimComponents {
    /// `#/components/schemas`
    #[serde(default)]
    pub schemas: BTreeMap<String, RefOr<ShimSchema>>,
    /// `#/components/parameters`
    #[serde(default)]
    pub parameters: BTreeMap<String, RefOr<ShimParameter>>,
    /// `#/components/requestBodies`
    #[serde(rename = "requestBodies", default)]
    pub request_bodies: BTreeMap<String, RefOr<ShimRequestBody>>,
    /// `#/components/responses`
    #[serde(default)]
    pub responses: BTreeMap<String, RefOr<ShimResponse>>,
}
