use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use serde_json::{Number, Value};

use super::{DefaultValue, PrimitiveType, TypeRef};
use crate::generator::validation::ValidationAnnotation;

/// Property key under which an object's `additionalProperties` are captured.
///
/// A declared property may use the same key; `SchemaDescriptor::property`
/// only finds declared properties.
pub const ADDITIONAL_PROPERTIES_KEY: &str = "properties";

/// Normalized view of one schema node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaDescriptor {
  pub name: String,
  pub pointer: String,
  #[serde(flatten)]
  pub kind: SchemaKind,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub properties: Vec<PropertyDescriptor>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub supertype: Option<String>,
  #[serde(skip_serializing_if = "BTreeSet::is_empty")]
  pub subtypes: BTreeSet<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  /// Synthesized from an inline schema rather than declared as a component.
  pub inline: bool,
}

impl SchemaDescriptor {
  /// Declared property with the given key; never the additional-properties capture.
  #[must_use]
  pub fn property(&self, oas_key: &str) -> Option<&PropertyDescriptor> {
    self
      .properties
      .iter()
      .find(|property| property.oas_key == oas_key && !property.is_additional_properties_capture())
  }

  #[must_use]
  pub fn additional_properties(&self) -> Option<&PropertyDescriptor> {
    self
      .properties
      .iter()
      .find(|property| property.is_additional_properties_capture())
  }

  #[must_use]
  pub fn discriminator(&self) -> Option<&DiscriminatorDescriptor> {
    match &self.kind {
      SchemaKind::ObjectPolymorphicSuper(discriminator) => Some(discriminator),
      _ => None,
    }
  }

  #[must_use]
  pub const fn is_object(&self) -> bool {
    matches!(
      self.kind,
      SchemaKind::ObjectSingle | SchemaKind::ObjectPolymorphicSuper(_) | SchemaKind::ObjectPolymorphicSub
    )
  }

  #[must_use]
  pub const fn is_polymorphic_super(&self) -> bool {
    matches!(self.kind, SchemaKind::ObjectPolymorphicSuper(_))
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemaKind {
  Primitive { primitive: PrimitiveType },
  Enum(EnumDescriptor),
  ObjectSingle,
  ObjectPolymorphicSuper(DiscriminatorDescriptor),
  ObjectPolymorphicSub,
  ArrayOf { items: TypeRef },
  MapOf { values: TypeRef },
}

impl SchemaKind {
  #[must_use]
  pub const fn label(&self) -> &'static str {
    match self {
      Self::Primitive { .. } => "primitive",
      Self::Enum(_) => "enum",
      Self::ObjectSingle => "object",
      Self::ObjectPolymorphicSuper(_) => "polymorphic super",
      Self::ObjectPolymorphicSub => "polymorphic sub",
      Self::ArrayOf { .. } => "array",
      Self::MapOf { .. } => "map",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumDescriptor {
  pub base: PrimitiveType,
  pub members: Vec<EnumMember>,
}

impl EnumDescriptor {
  /// Finds the member whose declared value equals `value` (case-sensitive).
  #[must_use]
  pub fn member(&self, value: &Value) -> Option<&EnumMember> {
    self.members.iter().find(|member| &member.value == value)
  }

  #[must_use]
  pub fn member_for_str(&self, value: &str) -> Option<&EnumMember> {
    self.members.iter().find(|member| member.value.as_str() == Some(value))
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumMember {
  pub value: Value,
  pub constant: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscriminatorDescriptor {
  pub property: String,
  /// Enum the discriminator property resolves to, if any.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub enum_type: Option<String>,
  /// Discriminator keys per direct subtype.
  pub subtype_keys: BTreeMap<String, Vec<DiscriminatorKey>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiscriminatorKey {
  EnumKey { value: String, constant: String },
  StringKey { value: String },
}

impl DiscriminatorKey {
  #[must_use]
  pub fn value(&self) -> &str {
    match self {
      Self::EnumKey { value, .. } | Self::StringKey { value } => value,
    }
  }
}

/// One field within an object descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyDescriptor {
  pub oas_key: String,
  pub kind: PropertyKind,
  pub type_ref: TypeRef,
  pub is_required: bool,
  pub is_nullable: bool,
  pub has_default: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub default_literal: Option<DefaultValue>,
  pub is_polymorphic_discriminator: bool,
  pub is_inherited: bool,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub discriminator_mappings: Vec<DiscriminatorKey>,
  pub modifier: PropertyModifier,
  pub wrapping: Wrapping,
  /// Whether the emitted type is non-nullable under the configured mode.
  pub mandatory: bool,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub annotations: Vec<ValidationAnnotation>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
}

impl PropertyDescriptor {
  #[must_use]
  pub const fn is_additional_properties_capture(&self) -> bool {
    matches!(self.kind, PropertyKind::AdditionalPropertiesCapture)
  }
}

/// Closed set of property shapes; emitters match on it exhaustively.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum PropertyKind {
  /// Scalar or enum value.
  Field(FieldConstraints),
  ObjectRefField { target: String },
  ObjectInlinedField { target: String },
  CollectionValidation(CollectionConstraints),
  MapField,
  AdditionalPropertiesCapture,
}

impl PropertyKind {
  #[must_use]
  pub const fn label(&self) -> &'static str {
    match self {
      Self::Field(_) => "field",
      Self::ObjectRefField { .. } => "object ref",
      Self::ObjectInlinedField { .. } => "object inlined",
      Self::CollectionValidation(_) => "collection",
      Self::MapField => "map",
      Self::AdditionalPropertiesCapture => "additional properties",
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldConstraints {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub pattern: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub min_length: Option<u64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub max_length: Option<u64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub minimum: Option<NumericBound>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub maximum: Option<NumericBound>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericBound {
  pub value: Number,
  pub exclusive: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CollectionConstraints {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub min_items: Option<u64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub max_items: Option<u64>,
  pub unique_items: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PropertyModifier {
  #[default]
  None,
  Abstract,
  Open,
  Override,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Wrapping {
  #[default]
  Plain,
  /// `JsonNullable<T>`: absent, explicit null, or a value.
  TriState,
}
