#![deny(missing_docs)]

//! # Type Registry
//!
//! Collects generated types in emission order for one run, together with the
//! diagnostics raised while producing them.
//!
//! Registering a name twice with the same fields is a no-op. A different
//! definition under an existing name is handled by the configured
//! `CollisionPolicy`.
//!
//! Component references are tracked separately: a `$ref` reuses only the type
//! registered for that same reference, never an inline type that happens to
//! share its name.

use crate::error::{AppError, AppResult};
use crate::oas::config::CollisionPolicy;
use crate::oas::models::{Diagnostic, Field, GeneratedType};
use indexmap::IndexMap;

/// Restore point taken before processing an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    types: usize,
    diagnostics: usize,
    references: usize,
}

/// Ordered store of generated types for one run.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: IndexMap<String, GeneratedType>,
    diagnostics: Vec<Diagnostic>,
    /// Reference name -> name its component was registered under.
    references: IndexMap<String, String>,
    policy: CollisionPolicy,
}

impl TypeRegistry {
    /// Creates an empty registry.
    pub fn new(policy: CollisionPolicy) -> Self {
        Self {
            types: IndexMap::new(),
            diagnostics: Vec::new(),
            references: IndexMap::new(),
            policy,
        }
    }

    /// Whether a type is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Looks up a registered type.
    pub fn get(&self, name: &str) -> Option<&GeneratedType> {
        self.types.get(name)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// True when nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Name the component behind reference `name` was registered under, if any.
    pub fn reference(&self, name: &str) -> Option<&str> {
        self.references.get(name).map(String::as_str)
    }

    /// Remembers that the component behind reference `name` is known as `registered`.
    pub fn record_reference(&mut self, name: impl Into<String>, registered: impl Into<String>) {
        self.references.insert(name.into(), registered.into());
    }

    /// Records a non-fatal diagnostic.
    pub fn diagnose(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(%diagnostic, "degraded schema");
        self.diagnostics.push(diagnostic);
    }

    /// Registers a type and returns the name it is known under.
    ///
    /// The returned name differs from `ty.name` only under `CollisionPolicy::Rename`.
    pub fn register(&mut self, ty: GeneratedType) -> AppResult<String> {
        let Some(existing) = self.types.get(&ty.name) else {
            tracing::debug!(name = %ty.name, fields = ty.fields.len(), "registered type");
            let name = ty.name.clone();
            self.types.insert(name.clone(), ty);
            return Ok(name);
        };

        if existing.fields == ty.fields {
            return Ok(ty.name);
        }

        match self.policy {
            CollisionPolicy::Reject => Err(AppError::ConflictingTypeName(ty.name)),
            CollisionPolicy::KeepFirst => {
                let name = ty.name;
                self.diagnose(Diagnostic::NameCollision {
                    name: name.clone(),
                    renamed_to: None,
                });
                Ok(name)
            }
            CollisionPolicy::Rename => {
                let renamed = self.free_name(&ty.name, &ty.fields);
                if !self.types.contains_key(&renamed) {
                    self.diagnose(Diagnostic::NameCollision {
                        name: ty.name.clone(),
                        renamed_to: Some(renamed.clone()),
                    });
                    self.types
                        .insert(renamed.clone(), GeneratedType::new(renamed.clone(), ty.fields));
                }
                Ok(renamed)
            }
        }
    }

    /// First `<base>N` (N >= 2) that is unused or already holds `fields`.
    fn free_name(&self, base: &str, fields: &[Field]) -> String {
        let mut n = 2usize;
        loop {
            let candidate = format!("{}{}", base, n);
            match self.types.get(&candidate) {
                None => return candidate,
                Some(existing) if existing.fields == fields => return candidate,
                Some(_) => n += 1,
            }
        }
    }

    /// Marks the current state so that a failed operation can be undone.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            types: self.types.len(),
            diagnostics: self.diagnostics.len(),
            references: self.references.len(),
        }
    }

    /// Drops everything registered after `checkpoint`.
    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        self.types.truncate(checkpoint.types);
        self.diagnostics.truncate(checkpoint.diagnostics);
        self.references.truncate(checkpoint.references);
    }

    /// Consumes the registry, yielding types in emission order and diagnostics.
    pub fn into_parts(self) -> (Vec<GeneratedType>, Vec<Diagnostic>) {
        (self.types.into_values().collect(), self.diagnostics)
    }
}
