use std::fmt;

use serde::Serialize;

use crate::document::SchemaType;

/// Scalar types the JVM emitters map to built-in classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PrimitiveType {
  String,
  Email,
  Uri,
  Uuid,
  Date,
  DateTime,
  ByteArray,
  Binary,
  Int32,
  Int64,
  Float,
  Double,
  Decimal,
  Boolean,
  Untyped,
}

impl PrimitiveType {
  #[must_use]
  pub fn from_schema(schema_type: SchemaType, format: Option<&str>) -> Self {
    match schema_type {
      SchemaType::String => match format {
        Some("date") => Self::Date,
        Some("date-time") => Self::DateTime,
        Some("uuid") => Self::Uuid,
        Some("uri" | "url") => Self::Uri,
        Some("email") => Self::Email,
        Some("byte") => Self::ByteArray,
        Some("binary") => Self::Binary,
        _ => Self::String,
      },
      SchemaType::Integer => match format {
        Some("int64") => Self::Int64,
        _ => Self::Int32,
      },
      SchemaType::Number => match format {
        Some("float") => Self::Float,
        Some("double") => Self::Double,
        _ => Self::Decimal,
      },
      SchemaType::Boolean => Self::Boolean,
      SchemaType::Object | SchemaType::Array | SchemaType::Null => Self::Untyped,
    }
  }

  #[must_use]
  pub const fn is_numeric(self) -> bool {
    matches!(
      self,
      Self::Int32 | Self::Int64 | Self::Float | Self::Double | Self::Decimal
    )
  }

  /// Types whose values are free text, where `pattern` and length limits apply.
  #[must_use]
  pub const fn is_textual(self) -> bool {
    matches!(self, Self::String | Self::Email | Self::Uri)
  }
}

/// Reference to the type of a value: a scalar, a named schema in the
/// registry, or a collection of either.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "of", rename_all = "snake_case")]
pub enum TypeRef {
  Primitive(PrimitiveType),
  Named(String),
  Array(Box<TypeRef>),
  Map(Box<TypeRef>),
}

impl TypeRef {
  #[must_use]
  pub const fn untyped() -> Self {
    Self::Primitive(PrimitiveType::Untyped)
  }

  #[must_use]
  pub fn array_of(items: TypeRef) -> Self {
    Self::Array(Box::new(items))
  }

  #[must_use]
  pub fn map_of(values: TypeRef) -> Self {
    Self::Map(Box::new(values))
  }

  #[must_use]
  pub fn named(&self) -> Option<&str> {
    match self {
      Self::Named(name) => Some(name),
      _ => None,
    }
  }

  /// Innermost element type, looking through arrays and maps.
  #[must_use]
  pub fn element(&self) -> &TypeRef {
    match self {
      Self::Array(inner) | Self::Map(inner) => inner.element(),
      other => other,
    }
  }
}

impl fmt::Display for TypeRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Primitive(primitive) => write!(f, "{primitive}"),
      Self::Named(name) => f.write_str(name),
      Self::Array(items) => write!(f, "array<{items}>"),
      Self::Map(values) => write!(f, "map<string, {values}>"),
    }
  }
}
