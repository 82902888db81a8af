#![deny(missing_docs)]

//! # Schema Resolution
//!
//! Turns a schema node into a canonical name and a `TypeKind`, registering a
//! `GeneratedType` for every object it meets along the way.
//!
//! Name precedence: `$ref` target name, then the caller's hint, then the
//! schema's `title`, then `NO_NAME`.

use crate::error::AppResult;
use crate::oas::config::{GeneratorConfig, NestedObjects};
use crate::oas::models::{Diagnostic, Field, FieldSource, GeneratedType, TypeKind};
use crate::oas::naming::{nested_name, FALLBACK_NAME};
use crate::oas::ref_utils::ref_name;
use crate::oas::registry::TypeRegistry;
use crate::oas::shims::{ShimComponents, ShimSchema};
use std::collections::HashSet;
use utoipa::openapi::RefOr;

/// A resolved schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSchema {
    /// Canonical name.
    pub name: String,
    /// Value shape. Objects resolve to `Named`.
    pub kind: TypeKind,
}

/// The declared kind of an inline schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeclaredKind {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
    Unspecified,
}

fn declared_kind(schema: &ShimSchema) -> DeclaredKind {
    let Some(name) = schema.schema_type.as_ref().and_then(|t| t.primary()) else {
        return DeclaredKind::Unspecified;
    };
    match name.to_ascii_lowercase().as_str() {
        "string" => DeclaredKind::String,
        "integer" => DeclaredKind::Integer,
        "number" => DeclaredKind::Number,
        "boolean" => DeclaredKind::Boolean,
        "array" => DeclaredKind::Array,
        "object" => DeclaredKind::Object,
        _ => DeclaredKind::Unspecified,
    }
}

/// Picks the canonical name for a schema node.
///
/// A reference always wins; an inline node takes the hint, then its title,
/// then the fallback.
pub fn canonical_name(schema: &RefOr<ShimSchema>, hint: &str) -> String {
    match schema {
        RefOr::Ref(r) => ref_name(&r.ref_location),
        RefOr::T(inline) => inline_name(inline, hint),
    }
}

fn inline_name(schema: &ShimSchema, hint: &str) -> String {
    if !hint.is_empty() {
        return hint.to_string();
    }
    match schema.title.as_deref() {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => FALLBACK_NAME.to_string(),
    }
}

/// Resolves schemas for one operation against one run's registry.
pub struct SchemaResolver<'a> {
    components: &'a ShimComponents,
    config: &'a GeneratorConfig,
    registry: &'a mut TypeRegistry,
    in_progress: HashSet<String>,
}

impl<'a> SchemaResolver<'a> {
    /// Creates a resolver writing into `registry`.
    pub fn new(
        components: &'a ShimComponents,
        config: &'a GeneratorConfig,
        registry: &'a mut TypeRegistry,
    ) -> Self {
        Self {
            components,
            config,
            registry,
            in_progress: HashSet::new(),
        }
    }

    /// Components the resolver looks references up in.
    pub fn components(&self) -> &'a ShimComponents {
        self.components
    }

    /// Registers a type directly, returning the name it is known under.
    pub fn register(&mut self, ty: GeneratedType) -> AppResult<String> {
        self.registry.register(ty)
    }

    /// Records a diagnostic in the run's registry.
    pub fn diagnose(&mut self, diagnostic: Diagnostic) {
        self.registry.diagnose(diagnostic);
    }

    /// Resolves `schema` under `hint`. `source` tags the fields of any types registered.
    pub fn resolve(
        &mut self,
        schema: &RefOr<ShimSchema>,
        hint: &str,
        source: FieldSource,
    ) -> AppResult<ResolvedSchema> {
        let name = canonical_name(schema, hint);
        match schema {
            RefOr::Ref(r) => self.resolve_reference(&r.ref_location, name, source),
            RefOr::T(inline) => self.resolve_inline(inline, name, source),
        }
    }

    /// An object component is registered the first time its reference is met,
    /// through the registry's collision policy, and every later use of the same
    /// reference points at whatever name that produced.
    fn resolve_reference(
        &mut self,
        reference: &str,
        name: String,
        source: FieldSource,
    ) -> AppResult<ResolvedSchema> {
        let components = self.components;

        let Some(target) = components.resolve_schema_ref(reference) else {
            self.diagnose(Diagnostic::UnresolvedReference {
                context: name.clone(),
                reference: reference.to_string(),
            });
            return Ok(ResolvedSchema {
                kind: TypeKind::Named(name.clone()),
                name,
            });
        };

        if declared_kind(target) == DeclaredKind::Object {
            if let Some(registered) = self.registry.reference(&name) {
                return Ok(ResolvedSchema {
                    kind: TypeKind::Named(registered.to_string()),
                    name,
                });
            }
            if self.in_progress.contains(&name) {
                return Ok(ResolvedSchema {
                    kind: TypeKind::Named(name.clone()),
                    name,
                });
            }
            self.in_progress.insert(name.clone());
            let result = self.register_object(target, &name, source);
            self.in_progress.remove(&name);
            let resolved = result?;
            if let TypeKind::Named(registered) = &resolved.kind {
                self.registry.record_reference(name, registered.clone());
            }
            return Ok(resolved);
        }

        self.resolve_inline(target, name, source)
    }

    fn resolve_inline(
        &mut self,
        schema: &ShimSchema,
        name: String,
        source: FieldSource,
    ) -> AppResult<ResolvedSchema> {
        let kind = match declared_kind(schema) {
            DeclaredKind::String => TypeKind::String,
            DeclaredKind::Integer => TypeKind::Int32,
            DeclaredKind::Number => TypeKind::Float64,
            DeclaredKind::Boolean => TypeKind::Boolean,
            DeclaredKind::Array => self.resolve_array(schema, &name, source)?,
            DeclaredKind::Object => return self.register_object(schema, &name, source),
            DeclaredKind::Unspecified => {
                self.diagnose(Diagnostic::UnspecifiedKind {
                    context: name.clone(),
                    declared: schema
                        .schema_type
                        .as_ref()
                        .and_then(|t| t.primary())
                        .map(str::to_string),
                });
                TypeKind::Unspecified
            }
        };
        Ok(ResolvedSchema { name, kind })
    }

    fn resolve_array(
        &mut self,
        schema: &ShimSchema,
        name: &str,
        source: FieldSource,
    ) -> AppResult<TypeKind> {
        let Some(items) = schema.items.as_deref() else {
            self.diagnose(Diagnostic::MissingItems {
                context: name.to_string(),
            });
            return Ok(TypeKind::Sequence(Box::new(TypeKind::Unspecified)));
        };
        let item = self.resolve(items, &format!("{}Item", name), source)?;
        Ok(TypeKind::Sequence(Box::new(item.kind)))
    }

    fn register_object(
        &mut self,
        schema: &ShimSchema,
        name: &str,
        source: FieldSource,
    ) -> AppResult<ResolvedSchema> {
        let fields = self.object_fields(schema, name, source)?;
        let registered = self.registry.register(GeneratedType::new(name, fields))?;
        Ok(ResolvedSchema {
            name: name.to_string(),
            kind: TypeKind::Named(registered),
        })
    }

    /// One field per property, in key order.
    ///
    /// Every property is resolved with the hint `<parent><Key>`, so an inline
    /// object property becomes the auxiliary type of that name. Under
    /// `NestedObjects::Flatten` such properties are lifted in as `key.inner`.
    fn object_fields(
        &mut self,
        schema: &ShimSchema,
        parent: &str,
        source: FieldSource,
    ) -> AppResult<Vec<Field>> {
        let mut fields = Vec::with_capacity(schema.properties.len());

        for (key, property) in &schema.properties {
            let hint = nested_name(parent, key);

            if let RefOr::T(inline) = property {
                if self.config.nested_objects == NestedObjects::Flatten
                    && declared_kind(inline) == DeclaredKind::Object
                {
                    for inner in self.object_fields(inline, &hint, source)? {
                        fields.push(Field::new(
                            format!("{}.{}", key, inner.name),
                            inner.kind,
                            inner.source,
                        ));
                    }
                    continue;
                }
            }

            let resolved = self.resolve(property, &hint, source)?;
            fields.push(Field::new(key.clone(), resolved.kind, source));
        }

        Ok(fields)
    }
}
