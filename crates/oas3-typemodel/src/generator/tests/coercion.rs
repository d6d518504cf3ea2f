use serde_json::{Value, json};

use super::support::{build, build_err, property};
use crate::generator::{
  coercion::DefaultCoercer,
  errors::{ModelError, ModelResult},
  metrics::GenerationWarning,
  model::{FieldConstraints, Literal, PrimitiveType, PropertyKind, TypeRef},
  resolver::{ResolvedGraph, ResolvedProperty},
};

fn coerce_with_warnings(type_ref: TypeRef, value: Value) -> (ModelResult<Option<Literal>>, Vec<GenerationWarning>) {
  let graph = ResolvedGraph::default();
  let property = ResolvedProperty {
    key: "value".into(),
    type_ref,
    kind: PropertyKind::Field(FieldConstraints::default()),
    nullable: false,
    default: Some(value),
    description: None,
    inlines: Vec::new(),
  };
  let mut warnings = Vec::new();
  let result = DefaultCoercer::new(&graph).coerce("Sample", &property, &mut warnings);
  (result, warnings)
}

fn coerce(primitive: PrimitiveType, value: Value) -> ModelResult<Option<Literal>> {
  coerce_with_warnings(TypeRef::Primitive(primitive), value).0
}

fn rendered(primitive: PrimitiveType, value: Value) -> String {
  coerce(primitive, value)
    .expect("default should coerce")
    .expect("default should produce a literal")
    .to_string()
}

#[test]
fn test_numeric_defaults_keep_their_text() {
  assert_eq!(rendered(PrimitiveType::Int32, json!(42)), "42");
  assert_eq!(rendered(PrimitiveType::Int64, json!(42)), "42L");
  assert_eq!(rendered(PrimitiveType::Float, json!(1.5)), "1.5f");
  assert_eq!(rendered(PrimitiveType::Double, json!(2)), "2.0");
  assert_eq!(rendered(PrimitiveType::Decimal, json!(1.5)), "java.math.BigDecimal(\"1.5\")");
  assert_eq!(rendered(PrimitiveType::Decimal, json!("1.50")), "java.math.BigDecimal(\"1.50\")");
  assert_eq!(rendered(PrimitiveType::Int32, json!("7")), "7");
}

#[test]
fn test_int32_out_of_range_is_incompatible() {
  let err = coerce(PrimitiveType::Int32, json!(3_000_000_000_u64)).expect_err("does not fit in int32");
  assert_eq!(
    err,
    ModelError::IncompatibleDefault {
      schema: "Sample".into(),
      property: "value".into(),
      expected: "int32".into(),
      value: "3000000000".into(),
    }
  );
  assert_eq!(rendered(PrimitiveType::Int64, json!(3_000_000_000_u64)), "3000000000L");
}

#[test]
fn test_textual_defaults() {
  assert_eq!(rendered(PrimitiveType::String, json!("a$b")), "\"a\\$b\"");
  assert_eq!(rendered(PrimitiveType::String, json!(5)), "\"5\"");
  assert_eq!(rendered(PrimitiveType::Uri, json!("https://example.com")), "java.net.URI(\"https://example.com\")");
  assert_eq!(
    rendered(PrimitiveType::Uuid, json!("123e4567-e89b-12d3-a456-426614174000")),
    "java.util.UUID.fromString(\"123e4567-e89b-12d3-a456-426614174000\")"
  );
  assert!(coerce(PrimitiveType::Uuid, json!("not-a-uuid")).is_err());
  assert!(coerce(PrimitiveType::Uri, json!(1)).is_err());
}

#[test]
fn test_uuid_defaults_are_canonicalized() {
  let canonical = "java.util.UUID.fromString(\"123e4567-e89b-12d3-a456-426614174000\")";
  assert_eq!(
    rendered(PrimitiveType::Uuid, json!("123E4567-E89B-12D3-A456-426614174000")),
    canonical
  );
  assert_eq!(
    rendered(PrimitiveType::Uuid, json!("123e4567e89b12d3a456426614174000")),
    canonical
  );
  assert_eq!(
    rendered(PrimitiveType::Uuid, json!("urn:uuid:123e4567-e89b-12d3-a456-426614174000")),
    canonical
  );
  assert!(coerce(PrimitiveType::Uuid, json!("123e4567-e89b-12d3-a456")).is_err());
}

#[test]
fn test_temporal_defaults_are_validated() {
  assert_eq!(
    rendered(PrimitiveType::Date, json!("2024-01-31")),
    "java.time.LocalDate.parse(\"2024-01-31\")"
  );
  assert_eq!(
    rendered(PrimitiveType::DateTime, json!("2024-01-31T10:15:00Z")),
    "java.time.OffsetDateTime.parse(\"2024-01-31T10:15:00Z\")"
  );

  let err = coerce(PrimitiveType::Date, json!("2024-13-01")).expect_err("month 13 is not a date");
  assert!(matches!(err, ModelError::IncompatibleDefault { expected, .. } if expected == "date"));
  assert!(coerce(PrimitiveType::DateTime, json!("2024-01-31")).is_err());
}

#[test]
fn test_boolean_defaults() {
  assert_eq!(coerce(PrimitiveType::Boolean, json!(true)), Ok(Some(Literal::Boolean(true))));
  assert_eq!(coerce(PrimitiveType::Boolean, json!("false")), Ok(Some(Literal::Boolean(false))));
  assert!(coerce(PrimitiveType::Boolean, json!("yes")).is_err());
  assert!(coerce(PrimitiveType::Boolean, json!(1)).is_err());
}

#[test]
fn test_untyped_defaults_follow_the_value() {
  assert_eq!(coerce(PrimitiveType::Untyped, json!(7)), Ok(Some(Literal::Long(7))));
  assert_eq!(coerce(PrimitiveType::Untyped, json!(0.5)), Ok(Some(Literal::Decimal("0.5".into()))));
  assert_eq!(coerce(PrimitiveType::Untyped, json!("x")), Ok(Some(Literal::String("x".into()))));
  assert!(coerce(PrimitiveType::Untyped, json!({"a": 1})).is_err());
}

#[test]
fn test_null_default_is_absent() {
  assert_eq!(coerce(PrimitiveType::Int32, Value::Null), Ok(None));
}

#[test]
fn test_collection_defaults() {
  let list = TypeRef::array_of(TypeRef::Primitive(PrimitiveType::String));
  let (result, warnings) = coerce_with_warnings(list.clone(), json!([]));
  assert_eq!(result, Ok(Some(Literal::EmptyList)));
  assert!(warnings.is_empty());

  let (result, warnings) = coerce_with_warnings(list, json!(["a"]));
  assert_eq!(result, Ok(None));
  assert_eq!(warnings.len(), 1);

  let map = TypeRef::map_of(TypeRef::Primitive(PrimitiveType::Int32));
  assert_eq!(coerce_with_warnings(map, json!({})).0, Ok(Some(Literal::EmptyMap)));
}

#[test]
fn test_binary_default_is_ignored() {
  let (result, warnings) = coerce_with_warnings(TypeRef::Primitive(PrimitiveType::Binary), json!("AAAA"));
  assert_eq!(result, Ok(None));
  assert_eq!(
    warnings,
    [GenerationWarning::IgnoredDefault {
      schema_name: "Sample".into(),
      property: "value".into(),
      reason: "binary defaults are not supported".into(),
    }]
  );
}

#[test]
fn test_enum_defaults_resolve_to_members() {
  let model = build(json!({
    "Status": {"type": "string", "enum": ["active", "on-hold"]},
    "Account": {
      "type": "object",
      "properties": {
        "fallback": {"allOf": [{"$ref": "#/components/schemas/Status"}], "default": "active"},
        "state": {"type": "string", "enum": ["new", "done"], "default": "new"}
      }
    }
  }));

  let default_of = |key: &str| {
    property(&model, "Account", key)
      .default_literal
      .as_ref()
      .map(ToString::to_string)
  };
  assert_eq!(default_of("fallback").as_deref(), Some("Status.ACTIVE"));
  assert_eq!(default_of("state").as_deref(), Some("AccountState.NEW"));
  assert!(property(&model, "Account", "state").has_default);
}

#[test]
fn test_unknown_enum_default_fails() {
  let err = build_err(json!({
    "Status": {"type": "string", "enum": ["active", "inactive"]},
    "Account": {
      "type": "object",
      "properties": {"status": {"allOf": [{"$ref": "#/components/schemas/Status"}], "default": "gone"}}
    }
  }));

  assert_eq!(
    err,
    ModelError::UnknownEnumDefault {
      schema: "Account".into(),
      property: "status".into(),
      enum_type: "Status".into(),
      value: "gone".into(),
    }
  );
}
