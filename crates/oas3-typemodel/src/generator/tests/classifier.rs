use serde_json::json;

use super::support::{build, build_with, document, pet_hierarchy, property, resolve, schema};
use crate::generator::{
  classifier::{PropertyClassifier, Role},
  config::ModelConfig,
  discriminator::DiscriminatorAnalyzer,
  metrics::GenerationWarning,
  model::{DefaultValue, Literal, PrimitiveType, PropertyKind, PropertyModifier, TypeModel, TypeRef, Wrapping},
  validation::ValidationAnnotation,
};

fn rendered_default(model: &TypeModel, name: &str, key: &str) -> Option<String> {
  property(model, name, key)
    .default_literal
    .as_ref()
    .map(ToString::to_string)
}

#[test]
fn test_roles() {
  let document = document(json!({
    "Animal": {
      "type": "object",
      "discriminator": {"propertyName": "kind"},
      "properties": {"kind": {"type": "string"}}
    },
    "Mammal": {
      "allOf": [
        {"$ref": "#/components/schemas/Animal"},
        {"discriminator": {"propertyName": "kind"}, "properties": {"fur": {"type": "boolean"}}}
      ]
    },
    "Dog": {"allOf": [{"$ref": "#/components/schemas/Mammal"}]},
    "Plain": {"type": "object", "properties": {"x": {"type": "string"}}}
  }));
  let graph = resolve(&document).expect("should resolve");
  let hierarchy = DiscriminatorAnalyzer::new(&graph).analyze().expect("should analyze");
  let classifier = PropertyClassifier::new(&graph, &hierarchy, ModelConfig::default());

  assert_eq!(classifier.role("Animal"), Role::Super);
  assert_eq!(classifier.role("Mammal"), Role::Intermediate);
  assert_eq!(classifier.role("Dog"), Role::Sub);
  assert_eq!(classifier.role("Plain"), Role::Single);
}

#[test]
fn test_pet_hierarchy_properties() {
  let model = build(pet_hierarchy(json!({
    "dog": "#/components/schemas/Dog",
    "cat": "#/components/schemas/Cat"
  })));

  let pet_type = property(&model, "Pet", "petType");
  assert_eq!(pet_type.modifier, PropertyModifier::Abstract);
  assert!(pet_type.is_polymorphic_discriminator);
  assert!(!pet_type.has_default);
  assert!(pet_type.annotations.is_empty());

  let pet_name = property(&model, "Pet", "name");
  assert_eq!(pet_name.modifier, PropertyModifier::Open);
  assert!(pet_name.mandatory);
  assert!(pet_name.annotations.is_empty());

  let keys: Vec<&str> = schema(&model, "Dog")
    .properties
    .iter()
    .map(|property| property.oas_key.as_str())
    .collect();
  assert_eq!(keys, ["petType", "name", "bark"]);

  let dog_type = property(&model, "Dog", "petType");
  assert_eq!(dog_type.modifier, PropertyModifier::Override);
  assert!(dog_type.is_inherited);
  assert!(dog_type.has_default);
  assert_eq!(rendered_default(&model, "Dog", "petType").as_deref(), Some("\"dog\""));
  assert_eq!(dog_type.annotations, [ValidationAnnotation::NotNull]);

  let dog_name = property(&model, "Dog", "name");
  assert_eq!(dog_name.modifier, PropertyModifier::Override);
  assert!(!dog_name.is_polymorphic_discriminator);
  assert_eq!(dog_name.annotations, [ValidationAnnotation::NotNull]);

  let bark = property(&model, "Dog", "bark");
  assert_eq!(bark.modifier, PropertyModifier::None);
  assert!(!bark.is_inherited);
  assert!(!bark.mandatory);
  assert_eq!(bark.default_literal, Some(DefaultValue::Null));
  assert_eq!(rendered_default(&model, "Dog", "bark").as_deref(), Some("null"));

  let lives = property(&model, "Cat", "lives");
  assert!(lives.has_default);
  assert!(lives.mandatory);
  assert_eq!(lives.default_literal, Some(DefaultValue::Literal(Literal::Int(9))));
  assert_eq!(lives.annotations, [ValidationAnnotation::NotNull]);
}

fn keys(model: &TypeModel, name: &str) -> Vec<String> {
  schema(model, name)
    .properties
    .iter()
    .map(|property| property.oas_key.clone())
    .collect()
}

#[test]
fn test_subtype_properties_follow_all_of_branch_order() {
  let mut schemas = pet_hierarchy(json!({"dog": "Dog"}));
  schemas["Dog"] = json!({
    "allOf": [
      {"type": "object", "properties": {"bark": {"type": "boolean"}}},
      {"$ref": "#/components/schemas/Pet"}
    ]
  });
  schemas["Base"] = json!({"type": "object", "properties": {"id": {"type": "string"}}});
  schemas["Plain"] = json!({
    "allOf": [
      {"type": "object", "properties": {"bark": {"type": "boolean"}}},
      {"$ref": "#/components/schemas/Base"}
    ]
  });
  let model = build(schemas);

  assert_eq!(keys(&model, "Dog"), ["bark", "petType", "name"]);
  assert_eq!(keys(&model, "Plain"), ["bark", "id"]);
  assert!(property(&model, "Dog", "name").is_inherited);
  assert!(!property(&model, "Dog", "bark").is_inherited);
}

#[test]
fn test_union_member_gets_supertype_properties_first() {
  let model = build(json!({
    "Vehicle": {
      "type": "object",
      "required": ["kind"],
      "discriminator": {"propertyName": "kind"},
      "properties": {"kind": {"type": "string"}, "maker": {"type": "string"}},
      "oneOf": [{"$ref": "#/components/schemas/Car"}]
    },
    "Car": {"type": "object", "properties": {"wheels": {"type": "integer"}}}
  }));

  assert_eq!(keys(&model, "Car"), ["kind", "maker", "wheels"]);
  assert_eq!(property(&model, "Car", "maker").modifier, PropertyModifier::Override);
}

#[test]
fn test_single_object_has_no_modifiers() {
  let model = build(json!({
    "User": {
      "type": "object",
      "required": ["id"],
      "properties": {"id": {"type": "string", "format": "uuid"}, "nick": {"type": "string"}}
    }
  }));

  let id = property(&model, "User", "id");
  assert_eq!(id.modifier, PropertyModifier::None);
  assert!(id.is_required);
  assert!(id.mandatory);
  assert_eq!(id.default_literal, None);
  assert_eq!(id.wrapping, Wrapping::Plain);

  let nick = property(&model, "User", "nick");
  assert!(!nick.is_required);
  assert!(!nick.mandatory);
  assert!(nick.annotations.is_empty());
}

#[test]
fn test_required_nullable_is_not_mandatory() {
  let model = build(json!({
    "Note": {
      "type": "object",
      "required": ["text"],
      "properties": {"text": {"type": "string", "nullable": true}}
    }
  }));

  let text = property(&model, "Note", "text");
  assert!(text.is_required);
  assert!(text.is_nullable);
  assert!(!text.mandatory);
  assert!(text.annotations.is_empty());
}

#[test]
fn test_merge_patch_wrapping_and_defaults() {
  let config = ModelConfig::builder().merge_patch(true).build();
  let (model, _) = build_with(
    json!({
      "Patch": {
        "type": "object",
        "required": ["name"],
        "properties": {
          "name": {"type": "string"},
          "nickname": {"type": "string", "nullable": true},
          "count": {"type": "integer", "default": 3}
        }
      }
    }),
    config,
  );

  let name = property(&model, "Patch", "name");
  assert_eq!(name.wrapping, Wrapping::Plain);
  assert_eq!(name.default_literal, None);
  assert!(name.mandatory);

  let nickname = property(&model, "Patch", "nickname");
  assert_eq!(nickname.wrapping, Wrapping::TriState);
  assert_eq!(nickname.default_literal, Some(DefaultValue::Undefined));
  assert_eq!(
    rendered_default(&model, "Patch", "nickname").as_deref(),
    Some("JsonNullable.undefined()")
  );
  assert!(!nickname.mandatory);

  let count = property(&model, "Patch", "count");
  assert_eq!(count.wrapping, Wrapping::TriState);
  assert_eq!(rendered_default(&model, "Patch", "count").as_deref(), Some("JsonNullable.of(3)"));
  assert!(count.mandatory);
}

#[test]
fn test_merge_patch_never_wraps_discriminator() {
  let config = ModelConfig::builder().merge_patch(true).build();
  let (model, _) = build_with(
    json!({
      "Shape": {
        "type": "object",
        "oneOf": [{"$ref": "#/components/schemas/Square"}],
        "discriminator": {"propertyName": "kind"}
      },
      "Square": {"type": "object", "properties": {"kind": {"type": "string"}, "side": {"type": "number"}}}
    }),
    config,
  );

  let kind = property(&model, "Square", "kind");
  assert!(!kind.is_required);
  assert!(kind.is_polymorphic_discriminator);
  assert_eq!(kind.wrapping, Wrapping::Plain);
  assert_eq!(property(&model, "Square", "side").wrapping, Wrapping::TriState);
}

#[test]
fn test_validation_annotations() {
  let model = build(json!({
    "User": {"type": "object", "properties": {"id": {"type": "string"}}},
    "Account": {
      "type": "object",
      "required": ["email", "tags"],
      "properties": {
        "email": {"type": "string", "pattern": "^[a-z]+$", "minLength": 3, "maxLength": 50},
        "tags": {"type": "array", "items": {"type": "string"}, "minItems": 1, "maxItems": 3},
        "balance": {"type": "number", "minimum": 0, "exclusiveMinimum": true, "maximum": 100},
        "owner": {"$ref": "#/components/schemas/User"},
        "users": {"type": "array", "items": {"$ref": "#/components/schemas/User"}}
      }
    }
  }));

  assert_eq!(
    property(&model, "Account", "email").annotations,
    [
      ValidationAnnotation::NotNull,
      ValidationAnnotation::Pattern {
        regexp: "^[a-z]+$".into()
      },
      ValidationAnnotation::Size {
        min: Some(3),
        max: Some(50)
      },
    ]
  );
  assert_eq!(
    property(&model, "Account", "tags").annotations,
    [
      ValidationAnnotation::NotNull,
      ValidationAnnotation::Size {
        min: Some(1),
        max: Some(3)
      },
    ]
  );
  assert_eq!(
    property(&model, "Account", "balance").annotations,
    [
      ValidationAnnotation::DecimalMin {
        value: "0".into(),
        inclusive: false
      },
      ValidationAnnotation::DecimalMax {
        value: "100".into(),
        inclusive: true
      },
    ]
  );
  assert_eq!(property(&model, "Account", "owner").annotations, [ValidationAnnotation::Valid]);
  assert_eq!(property(&model, "Account", "users").annotations, [ValidationAnnotation::Valid]);
}

#[test]
fn test_additional_properties_are_captured() {
  let model = build(json!({
    "Bag": {
      "type": "object",
      "properties": {"id": {"type": "string"}},
      "additionalProperties": {"type": "integer"}
    },
    "Closed": {
      "type": "object",
      "properties": {"id": {"type": "string"}},
      "additionalProperties": false
    }
  }));

  let bag = schema(&model, "Bag");
  let capture = bag.properties.last().expect("Bag has properties");
  assert!(capture.is_additional_properties_capture());
  assert_eq!(capture.oas_key, "properties");
  assert_eq!(capture.kind, PropertyKind::AdditionalPropertiesCapture);
  assert_eq!(capture.type_ref, TypeRef::map_of(TypeRef::Primitive(PrimitiveType::Int32)));
  assert_eq!(capture.default_literal, Some(DefaultValue::Literal(Literal::EmptyMap)));
  assert_eq!(capture.modifier, PropertyModifier::None);
  assert!(capture.annotations.is_empty());

  let closed = schema(&model, "Closed");
  assert!(closed.additional_properties().is_none());
}

#[test]
fn test_declared_properties_key_is_not_shadowed_by_capture() {
  let model = build(json!({
    "Form": {
      "type": "object",
      "properties": {"properties": {"type": "string"}},
      "additionalProperties": {"type": "boolean"}
    }
  }));

  let form = schema(&model, "Form");
  assert_eq!(form.properties.len(), 2);

  let declared = form.property("properties").expect("declared property");
  assert!(!declared.is_additional_properties_capture());
  assert_eq!(declared.type_ref, TypeRef::Primitive(PrimitiveType::String));

  let capture = form.additional_properties().expect("capture");
  assert_eq!(capture.type_ref, TypeRef::map_of(TypeRef::Primitive(PrimitiveType::Boolean)));
}

#[test]
fn test_unsupported_default_is_ignored_with_warning() {
  let (model, stats) = build_with(
    json!({
      "Address": {"type": "object", "properties": {"street": {"type": "string"}}},
      "User": {
        "type": "object",
        "properties": {
          "address": {"allOf": [{"$ref": "#/components/schemas/Address"}], "default": {"street": "Main"}}
        }
      }
    }),
    ModelConfig::default(),
  );

  let address = property(&model, "User", "address");
  assert!(!address.has_default);
  assert_eq!(address.default_literal, Some(DefaultValue::Null));
  assert_eq!(address.kind, PropertyKind::ObjectRefField { target: "Address".into() });
  assert!(matches!(
    stats.warnings.as_slice(),
    [GenerationWarning::IgnoredDefault { schema_name, property, .. }] if schema_name == "User" && property == "address"
  ));
}
