use std::fmt;

/// Why a `$ref` could not be followed to a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefFailure {
  /// Points at a component that does not exist.
  Dangling,
  /// Points outside `#/components/schemas` or into another document.
  External,
  /// The chain (or an `allOf` chain) returns to a schema already on it.
  Cycle(Vec<String>),
}

impl fmt::Display for RefFailure {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Dangling => f.write_str("target does not exist"),
      Self::External => f.write_str("only #/components/schemas references are supported"),
      Self::Cycle(chain) => write!(f, "cycle {}", chain.join(" -> ")),
    }
  }
}

/// Fatal errors raised while building the type model.
///
/// Every variant names the schema (and property, where one is involved) that
/// triggered it. No partial model is produced once one is raised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
  #[error("schema '{schema}': cannot resolve '{reference}': {reason}")]
  UnresolvableReference {
    schema: String,
    reference: String,
    reason: RefFailure,
  },

  #[error("schema '{schema}': property '{property}' is declared as both {existing} and {incoming}")]
  ConflictingPropertyType {
    schema: String,
    property: String,
    existing: String,
    incoming: String,
  },

  #[error("schema '{schema}': discriminator property '{property}' is not declared on it or on subtype '{subtype}'")]
  MissingDiscriminatorProperty {
    schema: String,
    subtype: String,
    property: String,
  },

  #[error("schema '{schema}': default {value} of property '{property}' is not a member of enum '{enum_type}'")]
  UnknownEnumDefault {
    schema: String,
    property: String,
    enum_type: String,
    value: String,
  },

  #[error("schema '{schema}': no discriminator value for '{property}' maps to this subtype")]
  SubtypeDiscriminatorWithNoValue { schema: String, property: String },

  #[error("schema '{schema}': discriminator '{property}' maps several values to this subtype: {}", .values.join(", "))]
  SubtypeDiscriminatorWithMultipleValues {
    schema: String,
    property: String,
    values: Vec<String>,
  },

  #[error("inheritance cycle between schemas {}", .cycle.join(" -> "))]
  CyclicInheritance { cycle: Vec<String> },

  #[error("schema '{schema}' is a subtype of several polymorphic schemas: {}", .supertypes.join(", "))]
  AmbiguousSupertype { schema: String, supertypes: Vec<String> },

  #[error("schema '{schema}': default {value} of property '{property}' does not fit type {expected}")]
  IncompatibleDefault {
    schema: String,
    property: String,
    expected: String,
    value: String,
  },
}

impl ModelError {
  /// Name of the schema the error is reported against.
  #[must_use]
  pub fn schema(&self) -> &str {
    match self {
      Self::UnresolvableReference { schema, .. }
      | Self::ConflictingPropertyType { schema, .. }
      | Self::MissingDiscriminatorProperty { schema, .. }
      | Self::UnknownEnumDefault { schema, .. }
      | Self::SubtypeDiscriminatorWithNoValue { schema, .. }
      | Self::SubtypeDiscriminatorWithMultipleValues { schema, .. }
      | Self::AmbiguousSupertype { schema, .. }
      | Self::IncompatibleDefault { schema, .. } => schema,
      Self::CyclicInheritance { cycle } => cycle.first().map_or("", String::as_str),
    }
  }
}

pub type ModelResult<T> = Result<T, ModelError>;
