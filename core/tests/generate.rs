use oas_typegen_core::{
    generate_from_str, render_rust, AppError, CollisionPolicy, Diagnostic, FailurePolicy, Field,
    FieldSource, GeneratedType, GeneratorConfig, NestedObjects, TypeKind,
};
use pretty_assertions::assert_eq;

const SHOP: &str = r#"
openapi: 3.0.3
info: { title: Shop, version: "1" }
paths:
  /promos/{id}:
    delete:
      operationId: removePromo
      parameters:
        - { name: id, in: path, required: true, schema: { type: integer } }
      responses:
        '404':
          description: not found
          content:
            application/json:
              schema:
                type: object
                properties:
                  message: { type: string }
  /promos:
    post:
      operationId: applyPromo
      parameters:
        - { name: code, in: query, schema: { type: string } }
      requestBody:
        content:
          application/json:
            schema:
              type: object
              properties:
                tags:
                  type: array
                  items: { type: string }
      responses:
        '200':
          description: applied
          content:
            application/json:
              schema: { $ref: '#/components/schemas/PromoResult' }
        '404':
          description: unknown code
components:
  schemas:
    PromoResult:
      type: object
      title: Ignored
      properties:
        discount: { type: number }
        applied: { type: boolean }
"#;

fn named(name: &str) -> TypeKind {
    TypeKind::Named(name.to_string())
}

#[test]
fn test_shop_document_emission_order() {
    let report = generate_from_str(SHOP, &GeneratorConfig::default()).unwrap();
    assert_eq!(
        report.type_names(),
        vec![
            "ApplyPromoQueryParameter",
            "ApplyPromoParameters",
            "ApplyPromoRequest",
            "PromoResult",
            "ApplyPromoOKResponse",
            "RemovePromoPathParameter",
            "RemovePromoParameters",
        ]
    );
    assert!(report.diagnostics.is_empty());
    assert!(report.is_complete());
}

#[test]
fn test_query_parameter_grouping() {
    let report = generate_from_str(SHOP, &GeneratorConfig::default()).unwrap();

    assert_eq!(
        report.get("ApplyPromoQueryParameter"),
        Some(&GeneratedType::new(
            "ApplyPromoQueryParameter",
            vec![Field::new("code", TypeKind::String, FieldSource::Query)],
        ))
    );
    assert_eq!(
        report.get("ApplyPromoParameters"),
        Some(&GeneratedType::new(
            "ApplyPromoParameters",
            vec![Field::new("query", named("ApplyPromoQueryParameter"), FieldSource::Query)],
        ))
    );
}

#[test]
fn test_referenced_response_keeps_reference_name() {
    let report = generate_from_str(SHOP, &GeneratorConfig::default()).unwrap();

    assert!(report.get("ApplyPromoResponse").is_none());
    assert!(report.get("Ignored").is_none());
    assert_eq!(
        report.get("PromoResult"),
        Some(&GeneratedType::new(
            "PromoResult",
            vec![
                Field::new("applied", TypeKind::Boolean, FieldSource::Response),
                Field::new("discount", TypeKind::Float64, FieldSource::Response),
            ],
        ))
    );
    assert_eq!(
        report.get("ApplyPromoOKResponse").unwrap().field("body").unwrap().kind,
        named("PromoResult")
    );
}

#[test]
fn test_array_property_is_sequence_of_items() {
    let report = generate_from_str(SHOP, &GeneratorConfig::default()).unwrap();
    let tags = report.get("ApplyPromoRequest").unwrap().field("tags").unwrap();
    assert_eq!(tags.kind, TypeKind::Sequence(Box::new(TypeKind::String)));
    assert_eq!(tags.kind.to_string(), "[]string");
}

#[test]
fn test_status_outside_allowlist_emits_nothing() {
    let report = generate_from_str(SHOP, &GeneratorConfig::default()).unwrap();
    assert!(report.get("RemovePromoNotFoundResponse").is_none());
    assert!(report.get("RemovePromoResponse").is_none());
    assert!(report.get("ApplyPromoNotFoundResponse").is_none());
}

#[test]
fn test_configured_status_codes() {
    let config = GeneratorConfig::default().with_status_codes([404]);
    let report = generate_from_str(SHOP, &config).unwrap();

    assert!(report.get("ApplyPromoOKResponse").is_none());
    assert_eq!(
        report.get("RemovePromoResponse"),
        Some(&GeneratedType::new(
            "RemovePromoResponse",
            vec![Field::new("message", TypeKind::String, FieldSource::Response)],
        ))
    );
    assert_eq!(
        report.get("RemovePromoNotFoundResponse").unwrap().fields,
        vec![Field::new("body", named("RemovePromoResponse"), FieldSource::Response)]
    );
}

#[test]
fn test_empty_locations_never_emitted() {
    let doc = r#"
openapi: 3.0.3
paths:
  /me:
    get:
      operationId: whoAmI
      parameters:
        - { name: X-Tenant, in: header, schema: { type: string } }
"#;
    let report = generate_from_str(doc, &GeneratorConfig::default()).unwrap();
    assert_eq!(
        report.type_names(),
        vec!["WhoAmIHeaderParameter", "WhoAmIParameters"]
    );
    assert_eq!(
        report.get("WhoAmIParameters").unwrap().fields,
        vec![Field::new("header", named("WhoAmIHeaderParameter"), FieldSource::Header)]
    );
}

#[test]
fn test_missing_operation_id_aborts() {
    let doc = r#"
openapi: 3.0.3
paths:
  /a:
    get:
      operationId: first
  /b:
    post:
      responses: {}
  /c:
    get:
      operationId: third
"#;
    let err = generate_from_str(doc, &GeneratorConfig::default()).unwrap_err();
    assert!(matches!(err, AppError::MissingOperationId { ref path, .. } if path == "/b"));
    assert_eq!(err.to_string(), "must have operationId in POST /b");
}

#[test]
fn test_missing_operation_id_continue_keeps_other_operations() {
    let doc = r#"
openapi: 3.0.3
paths:
  /a:
    get:
      operationId: first
  /b:
    post:
      responses: {}
  /c:
    get:
      operationId: third
"#;
    let config = GeneratorConfig::default().with_failure_policy(FailurePolicy::Continue);
    let report = generate_from_str(doc, &config).unwrap();
    assert_eq!(report.type_names(), vec!["FirstParameters", "ThirdParameters"]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].path, "/b");
    assert_eq!(report.failures[0].method, "POST");
    assert!(!report.is_complete());
}

#[test]
fn test_shared_reference_emitted_once() {
    let doc = r#"
openapi: 3.0.3
paths:
  /users:
    post:
      operationId: createUser
      requestBody:
        content:
          application/json:
            schema: { $ref: '#/components/schemas/User' }
      responses:
        '200':
          content:
            application/json:
              schema: { $ref: '#/components/schemas/User' }
    get:
      operationId: listUsers
      responses:
        '200':
          content:
            application/json:
              schema:
                type: array
                items: { $ref: '#/components/schemas/User' }
components:
  schemas:
    User:
      type: object
      properties:
        name: { type: string }
"#;
    let report = generate_from_str(doc, &GeneratorConfig::default()).unwrap();
    let users: Vec<&str> = report
        .type_names()
        .into_iter()
        .filter(|n| *n == "User")
        .collect();
    assert_eq!(users, vec!["User"]);
    assert!(report.get("CreateUserRequest").is_none());
    assert_eq!(
        report.get("ListUsersOKResponse").unwrap().fields[0].kind,
        TypeKind::Sequence(Box::new(named("User")))
    );
    assert_eq!(
        report.get("CreateUserOKResponse").unwrap().fields[0].kind,
        named("User")
    );
}

#[test]
fn test_nested_objects_auxiliary_and_flatten() {
    let doc = r#"
openapi: 3.0.3
paths:
  /orders:
    post:
      operationId: placeOrder
      requestBody:
        content:
          application/json:
            schema:
              type: object
              properties:
                address:
                  type: object
                  properties:
                    street: { type: string }
"#;
    let report = generate_from_str(doc, &GeneratorConfig::default()).unwrap();
    assert_eq!(
        report.get("PlaceOrderRequestAddress").unwrap().fields,
        vec![Field::new("street", TypeKind::String, FieldSource::Body)]
    );
    assert_eq!(
        report.get("PlaceOrderRequest").unwrap().fields,
        vec![Field::new("address", named("PlaceOrderRequestAddress"), FieldSource::Body)]
    );

    let config = GeneratorConfig::default().with_nested_objects(NestedObjects::Flatten);
    let report = generate_from_str(doc, &config).unwrap();
    assert!(report.get("PlaceOrderRequestAddress").is_none());
    assert_eq!(
        report.get("PlaceOrderRequest").unwrap().fields,
        vec![Field::new("address.street", TypeKind::String, FieldSource::Body)]
    );
}

#[test]
fn test_unknown_kinds_degrade_with_diagnostics() {
    let doc = r#"
openapi: 3.0.3
paths:
  /files:
    get:
      operationId: listFiles
      parameters:
        - { name: since, in: query, schema: { type: date } }
        - { name: ids, in: query, schema: { type: array } }
"#;
    let report = generate_from_str(doc, &GeneratorConfig::default()).unwrap();
    let query = report.get("ListFilesQueryParameter").unwrap();
    assert_eq!(query.field("since").unwrap().kind, TypeKind::Unspecified);
    assert_eq!(
        query.field("ids").unwrap().kind,
        TypeKind::Sequence(Box::new(TypeKind::Unspecified))
    );
    assert!(report
        .diagnostics
        .iter()
        .any(|d| matches!(d, Diagnostic::UnspecifiedKind { declared: Some(k), .. } if k == "date")));
    assert!(report
        .diagnostics
        .iter()
        .any(|d| matches!(d, Diagnostic::MissingItems { .. })));
}

#[test]
fn test_collision_policies() {
    let doc = r#"
openapi: 3.0.3
paths:
  /a:
    post:
      operationId: a
      requestBody:
        content:
          application/json:
            schema: { type: object, title: Shared, properties: { x: { type: string } } }
      responses:
        '200':
          content:
            application/json:
              schema: { type: object, properties: { x: { type: string } } }
  /b:
    post:
      operationId: b
      responses:
        '200':
          content:
            application/json:
              schema: { type: object, properties: { y: { type: integer } } }
"#;
    let report = generate_from_str(doc, &GeneratorConfig::default()).unwrap();
    assert!(report.get("Shared").is_none());
    assert!(report.get("ARequest").is_some());
    assert!(report.diagnostics.is_empty());

    // `a_` shares the `A` prefix: the empty aggregates are identical and collapse silently.
    let doc = doc.replace("operationId: b", "operationId: a_");
    let report = generate_from_str(&doc, &GeneratorConfig::default()).unwrap();
    assert_eq!(
        report.type_names().iter().filter(|n| **n == "AParameters").count(),
        1
    );
    assert!(!report.diagnostics.iter().any(|d| matches!(
        d,
        Diagnostic::NameCollision { name, .. } if name == "AParameters"
    )));
    assert!(report.get("AResponse").is_some());
    assert!(report.get("AResponse2").is_some());
    assert!(report.diagnostics.iter().any(|d| matches!(
        d,
        Diagnostic::NameCollision { name, renamed_to: Some(r) } if name == "AResponse" && r == "AResponse2"
    )));

    let config = GeneratorConfig::default().with_collision_policy(CollisionPolicy::Reject);
    let err = generate_from_str(&doc, &config).unwrap_err();
    assert!(matches!(err, AppError::ConflictingTypeName(_)));
}

#[test]
fn test_generation_is_deterministic() {
    let config = GeneratorConfig::default();
    let first = generate_from_str(SHOP, &config).unwrap();
    let second = generate_from_str(SHOP, &config).unwrap();
    assert_eq!(first.types, second.types);
    assert_eq!(first.diagnostics, second.diagnostics);
    assert_eq!(
        render_rust(&first.types).unwrap(),
        render_rust(&second.types).unwrap()
    );
}

#[test]
fn test_json_document_accepted() {
    let doc = r#"{
  "openapi": "3.1.0",
  "paths": {
    "/ping": { "get": { "operationId": "ping", "parameters": [
      { "name": "verbose", "in": "query", "schema": { "type": ["boolean", "null"] } }
    ] } }
  }
}"#;
    let report = generate_from_str(doc, &GeneratorConfig::default()).unwrap();
    assert_eq!(
        report.get("PingQueryParameter").unwrap().fields,
        vec![Field::new("verbose", TypeKind::Boolean, FieldSource::Query)]
    );
}

const INLINE_NAMESAKE: &str = r#"
openapi: 3.0.3
paths:
  /orders:
    post:
      operationId: makeOrder
      requestBody:
        content:
          application/json:
            schema:
              type: object
              properties:
                item:
                  type: object
                  properties:
                    inline_only: { type: string }
  /stock:
    get:
      operationId: getItem
      responses:
        '200':
          content:
            application/json:
              schema: { $ref: '#/components/schemas/MakeOrderRequestItem' }
        '400':
          content:
            application/json:
              schema: { $ref: '#/components/schemas/MakeOrderRequestItem' }
components:
  schemas:
    MakeOrderRequestItem:
      type: object
      properties:
        sku: { type: string }
        qty: { type: integer }
"#;

#[test]
fn test_reference_never_binds_to_inline_namesake() {
    let report = generate_from_str(INLINE_NAMESAKE, &GeneratorConfig::default()).unwrap();

    assert_eq!(
        report.get("MakeOrderRequestItem").unwrap().fields,
        vec![Field::new("inline_only", TypeKind::String, FieldSource::Body)]
    );
    assert_eq!(
        report.get("MakeOrderRequestItem2").unwrap().fields,
        vec![
            Field::new("qty", TypeKind::Int32, FieldSource::Response),
            Field::new("sku", TypeKind::String, FieldSource::Response),
        ]
    );
    for wrapper in ["GetItemOKResponse", "GetItemBadRequestResponse"] {
        assert_eq!(
            report.get(wrapper).unwrap().fields,
            vec![Field::new("body", named("MakeOrderRequestItem2"), FieldSource::Response)]
        );
    }
    assert_eq!(
        report.diagnostics,
        vec![Diagnostic::NameCollision {
            name: "MakeOrderRequestItem".into(),
            renamed_to: Some("MakeOrderRequestItem2".into()),
        }]
    );

    let config = GeneratorConfig::default().with_collision_policy(CollisionPolicy::Reject);
    let err = generate_from_str(INLINE_NAMESAKE, &config).unwrap_err();
    assert!(matches!(err, AppError::ConflictingTypeName(ref n) if n == "MakeOrderRequestItem"));
}
