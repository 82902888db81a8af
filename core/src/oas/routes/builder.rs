#![deny(missing_docs)]

//! # Operation Processor
//!
//! Generates every type belonging to one operation: parameters, then the
//! request body, then responses.

use crate::error::{AppError, AppResult};
use crate::oas::config::GeneratorConfig;
use crate::oas::models::{Diagnostic, GeneratedType};
use crate::oas::registry::TypeRegistry;
use crate::oas::resolver::{
    collect_parameters, group_parameters, resolve_request_body, resolve_responses,
    SchemaResolver,
};
use crate::oas::shims::{HttpMethod, ShimComponents, ShimOperation, ShimParameter};
use std::collections::HashMap;
use utoipa::openapi::RefOr;

/// Per-run state shared by all operations of a document.
pub struct OperationProcessor<'a> {
    components: &'a ShimComponents,
    config: &'a GeneratorConfig,
    registry: TypeRegistry,
    /// operationId -> `METHOD path` of its first use.
    operation_ids: HashMap<String, String>,
}

impl<'a> OperationProcessor<'a> {
    /// Creates the state for a fresh run.
    pub fn new(components: &'a ShimComponents, config: &'a GeneratorConfig) -> Self {
        Self {
            components,
            config,
            registry: TypeRegistry::new(config.collision_policy),
            operation_ids: HashMap::new(),
        }
    }

    /// Generates the types of one operation.
    ///
    /// The identifier is checked before anything is generated. If generation
    /// fails part-way, every type and diagnostic produced for this operation is
    /// discarded before the error is returned.
    pub fn process(
        &mut self,
        path: &str,
        method: HttpMethod,
        path_parameters: &[RefOr<ShimParameter>],
        operation: &ShimOperation,
    ) -> AppResult<()> {
        let operation_id = self.claim_operation_id(path, method, operation)?;
        tracing::debug!(%method, path, %operation_id, "generating operation");

        let checkpoint = self.registry.checkpoint();
        let result = self.generate(&operation_id, path_parameters, operation);
        if result.is_err() {
            self.registry.rollback(checkpoint);
        }
        result
    }

    fn claim_operation_id(
        &mut self,
        path: &str,
        method: HttpMethod,
        operation: &ShimOperation,
    ) -> AppResult<String> {
        let operation_id = operation
            .operation_id
            .as_deref()
            .map(str::trim)
            .unwrap_or_default();

        if operation_id.is_empty() {
            return Err(AppError::MissingOperationId {
                path: path.to_string(),
                method: method.to_string(),
            });
        }

        let location = format!("{} {}", method, path);
        if let Some(first) = self.operation_ids.get(operation_id) {
            return Err(AppError::DuplicateOperationId {
                operation_id: operation_id.to_string(),
                first_path: first.clone(),
                second_path: location,
            });
        }

        self.operation_ids.insert(operation_id.to_string(), location);
        Ok(operation_id.to_string())
    }

    fn generate(
        &mut self,
        operation_id: &str,
        path_parameters: &[RefOr<ShimParameter>],
        operation: &ShimOperation,
    ) -> AppResult<()> {
        let components = self.components;
        let mut unresolved = Vec::new();
        let params = collect_parameters(
            components,
            path_parameters,
            &operation.parameters,
            operation_id,
            &mut unresolved,
        );

        let mut resolver = SchemaResolver::new(components, self.config, &mut self.registry);
        for diagnostic in unresolved {
            resolver.diagnose(diagnostic);
        }

        let parameters = group_parameters(&mut resolver, operation_id, &params)?;

        let request = match &operation.request_body {
            Some(body) => resolve_request_body(&mut resolver, operation_id, body)?,
            None => None,
        };

        let responses = resolve_responses(
            &mut resolver,
            operation_id,
            &operation.responses,
            &self.config.status_codes,
        )?;

        tracing::debug!(
            operation_id,
            %parameters,
            ?request,
            ?responses,
            "operation generated"
        );
        Ok(())
    }

    /// Number of types registered so far.
    pub fn type_count(&self) -> usize {
        self.registry.len()
    }

    /// Ends the run, yielding types in emission order and diagnostics.
    pub fn finish(self) -> (Vec<GeneratedType>, Vec<Diagnostic>) {
        self.registry.into_parts()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::config::CollisionPolicy;

    fn operation(yaml: &str) -> ShimOperation {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_missing_operation_id_rejected() {
        let components = ShimComponents::default();
        let config = GeneratorConfig::default();
        let mut processor = OperationProcessor::new(&components, &config);

        for yaml in ["responses: {}", "operationId: ''", "operationId: '  '"] {
            let err = processor
                .process("/promos", HttpMethod::Post, &[], &operation(yaml))
                .unwrap_err();
            assert!(matches!(
                err,
                AppError::MissingOperationId { ref path, ref method } if path == "/promos" && method == "POST"
            ));
        }
        assert_eq!(processor.type_count(), 0);
    }

    #[test]
    fn test_duplicate_operation_id_names_both_locations() {
        let components = ShimComponents::default();
        let config = GeneratorConfig::default();
        let mut processor = OperationProcessor::new(&components, &config);
        let op = operation("operationId: getUser");

        processor.process("/users/{id}", HttpMethod::Get, &[], &op).unwrap();
        let err = processor
            .process("/people/{id}", HttpMethod::Get, &[], &op)
            .unwrap_err();
        match err {
            AppError::DuplicateOperationId {
                operation_id,
                first_path,
                second_path,
            } => {
                assert_eq!(operation_id, "getUser");
                assert_eq!(first_path, "GET /users/{id}");
                assert_eq!(second_path, "GET /people/{id}");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_emission_order_parameters_body_responses() {
        let components = ShimComponents::default();
        let config = GeneratorConfig::default();
        let mut processor = OperationProcessor::new(&components, &config);
        let op = operation(
            r#"
operationId: applyPromo
parameters:
  - { name: code, in: query, schema: { type: string } }
requestBody:
  content:
    application/json:
      schema: { type: object, properties: { amount: { type: number } } }
responses:
  '200':
    content:
      application/json:
        schema: { type: object, properties: { total: { type: number } } }
"#,
        );
        processor.process("/promos", HttpMethod::Post, &[], &op).unwrap();
        let (types, _) = processor.finish();
        let names: Vec<&str> = types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "ApplyPromoQueryParameter",
                "ApplyPromoParameters",
                "ApplyPromoRequest",
                "ApplyPromoResponse",
                "ApplyPromoOKResponse",
            ]
        );
    }

    #[test]
    fn test_failed_operation_rolled_back() {
        let components = ShimComponents::default();
        let config = GeneratorConfig::default().with_collision_policy(CollisionPolicy::Reject);
        let mut processor = OperationProcessor::new(&components, &config);

        let first = operation(
            r#"
operationId: first
requestBody:
  content:
    application/json:
      schema: { type: object, title: Shared, properties: { a: { type: string } } }
"#,
        );
        processor.process("/a", HttpMethod::Post, &[], &first).unwrap();
        let before = processor.type_count();

        // `first_` camel-cases to `First`: its aggregate collides with the empty one above.
        let second = operation(
            r#"
operationId: first_
parameters:
  - { name: q, in: query, schema: { type: string } }
requestBody:
  content:
    application/json:
      schema: { type: object, properties: { b: { type: string } } }
"#,
        );
        let err = processor
            .process("/b", HttpMethod::Post, &[], &second)
            .unwrap_err();
        assert!(matches!(err, AppError::ConflictingTypeName(ref n) if n == "FirstParameters"));
        assert_eq!(processor.type_count(), before);
    }
}
