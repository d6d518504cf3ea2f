use strum::Display;

use crate::generator::model::{SchemaDescriptor, SchemaKind};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationStats {
  pub schemas_resolved: usize,
  pub objects: usize,
  pub polymorphic_supers: usize,
  pub polymorphic_subs: usize,
  pub enums: usize,
  pub primitives: usize,
  pub arrays: usize,
  pub maps: usize,
  pub inline_schemas: usize,
  pub aliases: usize,
  pub properties: usize,
  pub warnings: Vec<GenerationWarning>,
}

impl GenerationStats {
  pub fn record_descriptor(&mut self, descriptor: &SchemaDescriptor) {
    self.schemas_resolved += 1;
    self.properties += descriptor.properties.len();
    if descriptor.inline {
      self.inline_schemas += 1;
    }
    match descriptor.kind {
      SchemaKind::Primitive { .. } => self.primitives += 1,
      SchemaKind::Enum(_) => self.enums += 1,
      SchemaKind::ObjectSingle => self.objects += 1,
      SchemaKind::ObjectPolymorphicSuper(_) => {
        self.objects += 1;
        self.polymorphic_supers += 1;
      }
      SchemaKind::ObjectPolymorphicSub => {
        self.objects += 1;
        self.polymorphic_subs += 1;
      }
      SchemaKind::ArrayOf { .. } => self.arrays += 1,
      SchemaKind::MapOf { .. } => self.maps += 1,
    }
  }

  pub fn record_aliases(&mut self, count: usize) {
    self.aliases += count;
  }

  pub fn record_warnings(&mut self, warnings: impl IntoIterator<Item = GenerationWarning>) {
    self.warnings.extend(warnings);
  }
}

/// Non-fatal findings; the model is still produced.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GenerationWarning {
  #[strum(to_string = "Schema '{schema_name}': oneOf/anyOf without a discriminator is treated as an untyped value")]
  UntypedUnion { schema_name: String },
  #[strum(to_string = "Schema '{schema_name}': inline member #{index} of a discriminated union has no name and is ignored")]
  InlineUnionMember { schema_name: String, index: usize },
  #[strum(
    to_string = "Schema '{schema_name}': discriminator '{property}' has several values ({values}); the field stays settable"
  )]
  DiscriminatorMultipleValues {
    schema_name: String,
    property: String,
    values: String,
  },
  #[strum(to_string = "Schema '{schema_name}': pattern on '{property}' is not a valid regex and is dropped: {error}")]
  InvalidPattern {
    schema_name: String,
    property: String,
    error: String,
  },
  #[strum(to_string = "Schema '{schema_name}': default of '{property}' is ignored: {reason}")]
  IgnoredDefault {
    schema_name: String,
    property: String,
    reason: String,
  },
}

impl GenerationWarning {
  /// Warnings that change the shape of the emitted model and are always shown.
  pub fn is_lossy(&self) -> bool {
    matches!(self, Self::UntypedUnion { .. } | Self::InlineUnionMember { .. })
  }
}
