//! Serde view of the parts of an OpenAPI 3 document the type model consumes.
//!
//! The `oas3` crate stores object properties in a `BTreeMap`, which loses the
//! declaration order that drives constructor parameter order downstream. The
//! schema graph is therefore read a second time into these types, backed by
//! [`IndexMap`] and `serde_json`'s `preserve_order` feature.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Number, Value};

/// Parsed OpenAPI document, reduced to metadata and component schemas.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OpenApiDocument {
  #[serde(default)]
  pub openapi: String,
  #[serde(default)]
  pub info: DocumentInfo,
  #[serde(default)]
  pub components: Components,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DocumentInfo {
  #[serde(default)]
  pub title: String,
  #[serde(default)]
  pub version: String,
  pub description: Option<String>,
}

impl From<oas3::spec::Info> for DocumentInfo {
  fn from(info: oas3::spec::Info) -> Self {
    Self {
      title: info.title,
      version: info.version,
      description: info.description,
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Components {
  #[serde(default)]
  pub schemas: IndexMap<String, SchemaOrRef>,
}

impl OpenApiDocument {
  /// Looks up a component schema by its name under `#/components/schemas`.
  pub fn schema(&self, name: &str) -> Option<&SchemaOrRef> {
    self.components.schemas.get(name)
  }

  /// Component schema names in declaration order.
  pub fn schema_names(&self) -> impl Iterator<Item = &String> {
    self.components.schemas.keys()
  }
}

/// A schema node or a `$ref` pointing at one.
///
/// `Ref` is tried first, so any object carrying `$ref` is a reference and its
/// sibling keywords are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SchemaOrRef {
  Ref {
    #[serde(rename = "$ref")]
    ref_path: String,
  },
  Schema(Box<RawSchema>),
}

impl SchemaOrRef {
  pub fn as_schema(&self) -> Option<&RawSchema> {
    match self {
      Self::Schema(schema) => Some(schema),
      Self::Ref { .. } => None,
    }
  }

  pub fn ref_path(&self) -> Option<&str> {
    match self {
      Self::Ref { ref_path } => Some(ref_path),
      Self::Schema(_) => None,
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSchema {
  #[serde(rename = "type")]
  pub schema_type: Option<TypeSet>,
  pub format: Option<String>,
  pub title: Option<String>,
  pub description: Option<String>,
  #[serde(default)]
  pub properties: IndexMap<String, SchemaOrRef>,
  #[serde(default)]
  pub required: Vec<String>,
  #[serde(default)]
  pub all_of: Vec<SchemaOrRef>,
  #[serde(default)]
  pub one_of: Vec<SchemaOrRef>,
  #[serde(default)]
  pub any_of: Vec<SchemaOrRef>,
  pub discriminator: Option<Discriminator>,
  pub additional_properties: Option<AdditionalProperties>,
  pub items: Option<Box<SchemaOrRef>>,
  pub nullable: Option<bool>,
  pub default: Option<Value>,
  #[serde(rename = "enum", default)]
  pub enum_values: Vec<Value>,
  pub pattern: Option<String>,
  pub min_length: Option<u64>,
  pub max_length: Option<u64>,
  pub minimum: Option<Number>,
  pub maximum: Option<Number>,
  pub exclusive_minimum: Option<ExclusiveBound>,
  pub exclusive_maximum: Option<ExclusiveBound>,
  pub min_items: Option<u64>,
  pub max_items: Option<u64>,
  pub unique_items: Option<bool>,
}

/// `type` is a single name in 3.0 and may be a list (`[string, "null"]`) in 3.1.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TypeSet {
  Single(SchemaType),
  Multiple(Vec<SchemaType>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SchemaType {
  String,
  Integer,
  Number,
  Boolean,
  Object,
  Array,
  Null,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discriminator {
  pub property_name: String,
  #[serde(default)]
  pub mapping: IndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
  Flag(bool),
  Schema(Box<SchemaOrRef>),
}

/// `exclusiveMinimum`/`exclusiveMaximum`: a flag modifying `minimum`/`maximum`
/// in 3.0, the bound itself in 3.1.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ExclusiveBound {
  Flag(bool),
  Value(Number),
}
