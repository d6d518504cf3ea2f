use chrono::{DateTime, NaiveDate};
use serde_json::Value;
use uuid::Uuid;

use crate::generator::{
  errors::{ModelError, ModelResult},
  metrics::GenerationWarning,
  model::{Literal, PrimitiveType, TypeRef},
  resolver::{ResolvedGraph, ResolvedProperty},
};

/// Turns a declared `default` into a literal for the property's resolved type.
pub(crate) struct DefaultCoercer<'g> {
  graph: &'g ResolvedGraph,
}

impl<'g> DefaultCoercer<'g> {
  pub(crate) fn new(graph: &'g ResolvedGraph) -> Self {
    Self { graph }
  }

  /// Coerces the default of `property` declared on `schema`.
  ///
  /// Returns `Ok(None)` when there is no default, or when it is one the model
  /// cannot express (object and non-empty array defaults, binary strings);
  /// the latter also records an `IgnoredDefault` warning.
  ///
  /// # Errors
  ///
  /// `UnknownEnumDefault` when an enum default names no member, and
  /// `IncompatibleDefault` when a scalar default does not fit its type.
  pub(crate) fn coerce(
    &self,
    schema: &str,
    property: &ResolvedProperty,
    warnings: &mut Vec<GenerationWarning>,
  ) -> ModelResult<Option<Literal>> {
    let Some(value) = property.default.as_ref().filter(|value| !value.is_null()) else {
      return Ok(None);
    };

    let mut ignore = |reason: &str| -> ModelResult<Option<Literal>> {
      warnings.push(GenerationWarning::IgnoredDefault {
        schema_name: schema.to_string(),
        property: property.key.clone(),
        reason: reason.to_string(),
      });
      Ok(None)
    };

    match &property.type_ref {
      TypeRef::Named(_) => match self.graph.enum_of(&property.type_ref) {
        Some((enum_type, descriptor)) => match descriptor.member(value) {
          Some(member) => Ok(Some(Literal::EnumMember {
            type_name: enum_type.to_string(),
            constant: member.constant.clone(),
          })),
          None => Err(ModelError::UnknownEnumDefault {
            schema: schema.to_string(),
            property: property.key.clone(),
            enum_type: enum_type.to_string(),
            value: value_text(value),
          }),
        },
        None => ignore("object defaults are not supported"),
      },
      TypeRef::Array(_) => match value {
        Value::Array(items) if items.is_empty() => Ok(Some(Literal::EmptyList)),
        _ => ignore("only an empty array default is supported"),
      },
      TypeRef::Map(_) => match value {
        Value::Object(entries) if entries.is_empty() => Ok(Some(Literal::EmptyMap)),
        _ => ignore("only an empty object default is supported"),
      },
      TypeRef::Primitive(PrimitiveType::ByteArray | PrimitiveType::Binary) => {
        ignore("binary defaults are not supported")
      }
      TypeRef::Primitive(primitive) => match coerce_primitive(*primitive, value) {
        Some(literal) => Ok(Some(literal)),
        None => Err(ModelError::IncompatibleDefault {
          schema: schema.to_string(),
          property: property.key.clone(),
          expected: primitive.to_string(),
          value: value_text(value),
        }),
      },
    }
  }
}

fn coerce_primitive(primitive: PrimitiveType, value: &Value) -> Option<Literal> {
  match primitive {
    PrimitiveType::String | PrimitiveType::Email => match value {
      Value::String(text) => Some(Literal::String(text.clone())),
      Value::Number(_) | Value::Bool(_) => Some(Literal::String(value.to_string())),
      _ => None,
    },
    PrimitiveType::Uri => value.as_str().map(|text| Literal::Uri(text.to_string())),
    PrimitiveType::Uuid => value
      .as_str()
      .and_then(|text| Uuid::try_parse(text.trim()).ok())
      .map(|uuid| Literal::Uuid(uuid.hyphenated().to_string())),
    PrimitiveType::Date => value
      .as_str()
      .filter(|text| NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok())
      .map(|text| Literal::Date(text.to_string())),
    PrimitiveType::DateTime => value
      .as_str()
      .filter(|text| DateTime::parse_from_rfc3339(text).is_ok())
      .map(|text| Literal::DateTime(text.to_string())),
    PrimitiveType::Int32 => integer(value)
      .filter(|number| i32::try_from(*number).is_ok())
      .map(Literal::Int),
    PrimitiveType::Int64 => integer(value).map(Literal::Long),
    PrimitiveType::Float => numeric_text(value).map(Literal::Float),
    PrimitiveType::Double => numeric_text(value).map(Literal::Double),
    PrimitiveType::Decimal => numeric_text(value).map(Literal::Decimal),
    PrimitiveType::Boolean => match value {
      Value::Bool(flag) => Some(Literal::Boolean(*flag)),
      Value::String(text) => text.parse().ok().map(Literal::Boolean),
      _ => None,
    },
    PrimitiveType::Untyped => match value {
      Value::String(text) => Some(Literal::String(text.clone())),
      Value::Bool(flag) => Some(Literal::Boolean(*flag)),
      Value::Number(number) => Some(
        number
          .as_i64()
          .map_or_else(|| Literal::Decimal(number.to_string()), Literal::Long),
      ),
      _ => None,
    },
    PrimitiveType::ByteArray | PrimitiveType::Binary => None,
  }
}

fn integer(value: &Value) -> Option<i64> {
  match value {
    Value::Number(number) => number.as_i64(),
    Value::String(text) => text.trim().parse().ok(),
    _ => None,
  }
}

/// Textual form of a numeric default, kept as written.
fn numeric_text(value: &Value) -> Option<String> {
  match value {
    Value::Number(number) => Some(number.to_string()),
    Value::String(text) => {
      let text = text.trim();
      text
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
        .map(|_| text.to_string())
    }
    _ => None,
  }
}

fn value_text(value: &Value) -> String {
  match value {
    Value::String(text) => text.clone(),
    other => other.to_string(),
  }
}
