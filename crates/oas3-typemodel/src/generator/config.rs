use serde::Serialize;

use crate::generator::validation::ValidationDialect;

/// What to do when a subtype maps to several discriminator values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DiscriminatorPolicy {
  /// Leave the discriminator settable and record a warning.
  #[default]
  Lenient,
  /// Fail with `SubtypeDiscriminatorWithMultipleValues`.
  Strict,
}

/// Options for one model build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, bon::Builder)]
pub struct ModelConfig {
  /// Generate for JSON merge-patch (RFC 7396) request bodies.
  #[builder(default)]
  pub merge_patch: bool,
  #[builder(default)]
  pub validation_dialect: ValidationDialect,
  #[builder(default)]
  pub discriminator_policy: DiscriminatorPolicy,
}

impl ModelConfig {
  #[must_use]
  pub fn mandatory_policy(&self) -> MandatoryPolicy {
    if self.merge_patch {
      MandatoryPolicy::merge_patch()
    } else {
      MandatoryPolicy::standard()
    }
  }
}

/// Facts about a property used to decide whether its emitted type is non-nullable.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyContext {
  pub is_required: bool,
  pub is_nullable: bool,
  pub has_default: bool,
}

/// Decides whether a property's emitted type is non-nullable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MandatoryPolicy {
  merge_patch: bool,
}

impl MandatoryPolicy {
  #[must_use]
  pub const fn standard() -> Self {
    Self { merge_patch: false }
  }

  #[must_use]
  pub const fn merge_patch() -> Self {
    Self { merge_patch: true }
  }

  /// Determines if a property is mandatory.
  ///
  /// Standard mode: required and not nullable, or optional with a default
  /// (the default fills the gap). Merge-patch mode: anything not nullable,
  /// since absence is carried by the tri-state wrapper instead of `null`.
  #[must_use]
  pub const fn is_mandatory(self, ctx: PropertyContext) -> bool {
    if self.merge_patch {
      return !ctx.is_nullable;
    }
    (ctx.is_required && !ctx.is_nullable) || (!ctx.is_required && ctx.has_default)
  }
}
