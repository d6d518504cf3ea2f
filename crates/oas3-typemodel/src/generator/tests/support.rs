use serde_json::{Value, json};

use crate::{
  document::OpenApiDocument,
  generator::{
    builder::TypeModelBuilder,
    config::ModelConfig,
    errors::ModelError,
    metrics::GenerationStats,
    model::{PropertyDescriptor, SchemaDescriptor, TypeModel},
    resolver::{ResolvedGraph, SchemaResolver},
  },
  utils::spec::document_from_value,
};

/// Wraps component schemas in a minimal OpenAPI 3.0 document.
pub(super) fn document(schemas: Value) -> OpenApiDocument {
  document_from_value(json!({
    "openapi": "3.0.3",
    "info": {"title": "Test", "version": "1.0.0"},
    "paths": {},
    "components": {"schemas": schemas}
  }))
  .expect("failed to parse test document")
}

pub(super) fn resolve(document: &OpenApiDocument) -> Result<ResolvedGraph, ModelError> {
  SchemaResolver::new(document).resolve(document.schema_names())
}

pub(super) fn build_with(schemas: Value, config: ModelConfig) -> (TypeModel, GenerationStats) {
  let document = document(schemas);
  TypeModelBuilder::new(&document, config)
    .build()
    .expect("failed to build type model")
}

pub(super) fn build(schemas: Value) -> TypeModel {
  build_with(schemas, ModelConfig::default()).0
}

pub(super) fn build_err_with(schemas: Value, config: ModelConfig) -> ModelError {
  let document = document(schemas);
  TypeModelBuilder::new(&document, config)
    .build()
    .expect_err("expected the build to fail")
}

pub(super) fn build_err(schemas: Value) -> ModelError {
  build_err_with(schemas, ModelConfig::default())
}

pub(super) fn schema<'a>(model: &'a TypeModel, name: &str) -> &'a SchemaDescriptor {
  model
    .get(name)
    .unwrap_or_else(|| panic!("schema {name} missing from model"))
}

pub(super) fn property<'a>(model: &'a TypeModel, name: &str, key: &str) -> &'a PropertyDescriptor {
  schema(model, name)
    .property(key)
    .unwrap_or_else(|| panic!("property {name}.{key} missing from model"))
}

pub(super) fn pet_hierarchy(mapping: Value) -> Value {
  json!({
    "Pet": {
      "type": "object",
      "required": ["petType", "name"],
      "discriminator": {"propertyName": "petType", "mapping": mapping},
      "properties": {
        "petType": {"type": "string"},
        "name": {"type": "string"}
      }
    },
    "Dog": {
      "allOf": [
        {"$ref": "#/components/schemas/Pet"},
        {"type": "object", "properties": {"bark": {"type": "boolean"}}}
      ]
    },
    "Cat": {
      "allOf": [
        {"$ref": "#/components/schemas/Pet"},
        {"type": "object", "properties": {"lives": {"type": "integer", "default": 9}}}
      ]
    }
  })
}
