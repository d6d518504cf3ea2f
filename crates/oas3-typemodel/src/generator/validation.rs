use serde::Serialize;

use crate::generator::model::quote;

/// Bean-validation package family the annotations are rendered for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ValidationDialect {
  #[default]
  Javax,
  Jakarta,
}

impl ValidationDialect {
  #[must_use]
  pub const fn package(self) -> &'static str {
    match self {
      Self::Javax => "javax.validation",
      Self::Jakarta => "jakarta.validation",
    }
  }
}

/// A dialect-neutral validation annotation attached to a property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "annotation", rename_all = "snake_case")]
pub enum ValidationAnnotation {
  NotNull,
  Valid,
  Pattern { regexp: String },
  Size { min: Option<u64>, max: Option<u64> },
  DecimalMin { value: String, inclusive: bool },
  DecimalMax { value: String, inclusive: bool },
}

impl ValidationAnnotation {
  #[must_use]
  pub const fn simple_name(&self) -> &'static str {
    match self {
      Self::NotNull => "NotNull",
      Self::Valid => "Valid",
      Self::Pattern { .. } => "Pattern",
      Self::Size { .. } => "Size",
      Self::DecimalMin { .. } => "DecimalMin",
      Self::DecimalMax { .. } => "DecimalMax",
    }
  }

  /// Fully qualified annotation class, e.g. `jakarta.validation.constraints.NotNull`.
  ///
  /// `Valid` lives at the package root; every other annotation is a constraint.
  #[must_use]
  pub fn qualified_name(&self, dialect: ValidationDialect) -> String {
    match self {
      Self::Valid => format!("{}.Valid", dialect.package()),
      other => format!("{}.constraints.{}", dialect.package(), other.simple_name()),
    }
  }

  /// Renders the annotation as it appears on a constructor parameter.
  #[must_use]
  pub fn render(&self, dialect: ValidationDialect) -> String {
    let name = self.qualified_name(dialect);
    match self {
      Self::NotNull | Self::Valid => format!("@{name}"),
      Self::Pattern { regexp } => format!("@{name}(regexp = {})", quote(regexp)),
      Self::Size { min, max } => {
        let args = [min.map(|min| format!("min = {min}")), max.map(|max| format!("max = {max}"))]
          .into_iter()
          .flatten()
          .collect::<Vec<_>>()
          .join(", ");
        format!("@{name}({args})")
      }
      Self::DecimalMin { value, inclusive } | Self::DecimalMax { value, inclusive } => {
        format!("@{name}(value = \"{value}\", inclusive = {inclusive})")
      }
    }
  }
}
