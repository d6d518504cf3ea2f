use std::fmt;

use serde::{Serialize, Serializer};

/// A Kotlin/JVM literal expression for a coerced default value.
///
/// Numeric variants keep the textual form of the source number so that
/// rendering never goes through a lossy float conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
  String(String),
  Int(i64),
  Long(i64),
  Float(String),
  Double(String),
  Decimal(String),
  Boolean(bool),
  Date(String),
  DateTime(String),
  Uuid(String),
  Uri(String),
  EnumMember { type_name: String, constant: String },
  EmptyList,
  EmptyMap,
}

impl fmt::Display for Literal {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::String(value) => f.write_str(&quote(value)),
      Self::Int(value) => write!(f, "{value}"),
      Self::Long(value) => write!(f, "{value}L"),
      Self::Float(value) => write!(f, "{value}f"),
      Self::Double(value) if value.contains(['.', 'e', 'E']) => f.write_str(value),
      Self::Double(value) => write!(f, "{value}.0"),
      Self::Decimal(value) => write!(f, "java.math.BigDecimal({})", quote(value)),
      Self::Boolean(value) => write!(f, "{value}"),
      Self::Date(value) => write!(f, "java.time.LocalDate.parse({})", quote(value)),
      Self::DateTime(value) => write!(f, "java.time.OffsetDateTime.parse({})", quote(value)),
      Self::Uuid(value) => write!(f, "java.util.UUID.fromString({})", quote(value)),
      Self::Uri(value) => write!(f, "java.net.URI({})", quote(value)),
      Self::EnumMember { type_name, constant } => write!(f, "{type_name}.{constant}"),
      Self::EmptyList => f.write_str("emptyList()"),
      Self::EmptyMap => f.write_str("mutableMapOf()"),
    }
  }
}

/// Escapes a value as a double-quoted Kotlin string literal.
///
/// `$` is escaped so that the value is never read as a string template.
#[must_use]
pub fn quote(value: &str) -> String {
  let mut out = String::with_capacity(value.len() + 2);
  out.push('"');
  for ch in value.chars() {
    match ch {
      '\\' => out.push_str("\\\\"),
      '"' => out.push_str("\\\""),
      '$' => out.push_str("\\$"),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      '\t' => out.push_str("\\t"),
      '\u{8}' => out.push_str("\\b"),
      c if c.is_control() => out.push_str(&format!("\\u{:04x}", u32::from(c))),
      c => out.push(c),
    }
  }
  out.push('"');
  out
}

/// The constructor default a property is emitted with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultValue {
  /// Plain literal.
  Literal(Literal),
  /// Merge-patch optional with a declared default: `JsonNullable.of(lit)`.
  Present(Literal),
  /// Merge-patch optional without a default: `JsonNullable.undefined()`.
  Undefined,
  /// Standard-mode optional without a default.
  Null,
}

impl DefaultValue {
  /// Wraps a coerced default for a property.
  ///
  /// Required properties get no constructor default at all. Optional ones get
  /// their literal (or `null`), or the tri-state equivalents in merge-patch mode.
  #[must_use]
  pub fn for_property(literal: Option<Literal>, is_required: bool, merge_patch: bool) -> Option<Self> {
    if is_required {
      return None;
    }
    Some(match (literal, merge_patch) {
      (Some(literal), true) => Self::Present(literal),
      (None, true) => Self::Undefined,
      (Some(literal), false) => Self::Literal(literal),
      (None, false) => Self::Null,
    })
  }

  #[must_use]
  pub fn literal(&self) -> Option<&Literal> {
    match self {
      Self::Literal(literal) | Self::Present(literal) => Some(literal),
      Self::Undefined | Self::Null => None,
    }
  }
}

impl fmt::Display for DefaultValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Literal(literal) => write!(f, "{literal}"),
      Self::Present(literal) => write!(f, "JsonNullable.of({literal})"),
      Self::Undefined => f.write_str("JsonNullable.undefined()"),
      Self::Null => f.write_str("null"),
    }
  }
}

impl Serialize for DefaultValue {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}
