use crate::{
  document::{AdditionalProperties, RawSchema, SchemaOrRef, SchemaType, TypeSet},
  generator::model::PrimitiveType,
};

/// Structural shape of a schema node, before any `$ref` is followed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Category<'a> {
  Enum,
  /// Object-like: properties, `allOf`, or a discriminated union.
  Object,
  /// `oneOf`/`anyOf` without a discriminator.
  Union,
  /// `oneOf`/`anyOf` of exactly one schema plus `{type: null}`.
  NullableOf {
    keyword: &'static str,
    index: usize,
    inner: &'a SchemaOrRef,
  },
  Array(Option<&'a SchemaOrRef>),
  /// String-keyed map; `None` values are untyped.
  Map(Option<&'a SchemaOrRef>),
  Primitive(PrimitiveType),
}

/// Extension methods for [`RawSchema`] to query its shape conveniently.
pub(crate) trait SchemaExt {
  /// Returns the first non-null entry of `type`.
  fn non_null_type(&self) -> Option<SchemaType>;

  /// Returns true if the schema is exactly `{type: null}`.
  fn is_null(&self) -> bool;

  /// `nullable: true`, a `null` entry in a 3.1 type list, or a nullable union.
  fn is_nullable(&self) -> bool;

  /// Returns true if the schema declares at least one non-null enum value.
  fn has_enum_values(&self) -> bool;

  fn has_union(&self) -> bool;

  /// Returns `(keyword, index, inner)` for `oneOf`/`anyOf: [inner, {type: null}]`.
  fn nullable_union(&self) -> Option<(&'static str, usize, &SchemaOrRef)>;

  /// Returns the target of a wrapper such as `{allOf: [$ref], description: ..}`.
  fn single_all_of_ref(&self) -> Option<&SchemaOrRef>;

  fn category(&self) -> Category<'_>;

  fn primitive_type(&self) -> PrimitiveType;
}

impl SchemaExt for RawSchema {
  fn non_null_type(&self) -> Option<SchemaType> {
    match self.schema_type.as_ref()? {
      TypeSet::Single(SchemaType::Null) => None,
      TypeSet::Single(schema_type) => Some(*schema_type),
      TypeSet::Multiple(types) => types.iter().copied().find(|t| *t != SchemaType::Null),
    }
  }

  fn is_null(&self) -> bool {
    let null_only = match &self.schema_type {
      Some(TypeSet::Single(SchemaType::Null)) => true,
      Some(TypeSet::Multiple(types)) => !types.is_empty() && types.iter().all(|t| *t == SchemaType::Null),
      _ => false,
    };
    null_only && self.properties.is_empty() && !self.has_union() && self.all_of.is_empty()
  }

  fn is_nullable(&self) -> bool {
    if self.nullable == Some(true) {
      return true;
    }
    if let Some(TypeSet::Multiple(types)) = &self.schema_type
      && types.contains(&SchemaType::Null)
    {
      return true;
    }
    self.nullable_union().is_some()
  }

  fn has_enum_values(&self) -> bool {
    self.enum_values.iter().any(|value| !value.is_null())
  }

  fn has_union(&self) -> bool {
    !self.one_of.is_empty() || !self.any_of.is_empty()
  }

  fn nullable_union(&self) -> Option<(&'static str, usize, &SchemaOrRef)> {
    if self.discriminator.is_some() {
      return None;
    }
    [("oneOf", &self.one_of), ("anyOf", &self.any_of)]
      .into_iter()
      .filter(|(_, variants)| variants.len() == 2)
      .find_map(|(keyword, variants)| {
        let is_null = |variant: &SchemaOrRef| variant.as_schema().is_some_and(SchemaExt::is_null);
        match (is_null(&variants[0]), is_null(&variants[1])) {
          (false, true) => Some((keyword, 0, &variants[0])),
          (true, false) => Some((keyword, 1, &variants[1])),
          _ => None,
        }
      })
  }

  fn single_all_of_ref(&self) -> Option<&SchemaOrRef> {
    let [branch @ SchemaOrRef::Ref { .. }] = self.all_of.as_slice() else {
      return None;
    };
    let bare = self.properties.is_empty()
      && !self.has_union()
      && self.discriminator.is_none()
      && self.additional_properties.is_none()
      && !self.has_enum_values();
    bare.then_some(branch)
  }

  fn category(&self) -> Category<'_> {
    if self.has_enum_values() {
      return Category::Enum;
    }
    if let Some((keyword, index, inner)) = self.nullable_union() {
      return Category::NullableOf { keyword, index, inner };
    }
    if self.has_union() {
      return if self.discriminator.is_some() {
        Category::Object
      } else {
        Category::Union
      };
    }
    if !self.properties.is_empty() || !self.all_of.is_empty() || self.discriminator.is_some() {
      return Category::Object;
    }

    match self.non_null_type() {
      Some(SchemaType::Array) => Category::Array(self.items.as_deref()),
      Some(SchemaType::Object) => match &self.additional_properties {
        Some(AdditionalProperties::Schema(values)) => Category::Map(Some(values)),
        Some(AdditionalProperties::Flag(false)) => Category::Object,
        Some(AdditionalProperties::Flag(true)) | None => Category::Map(None),
      },
      Some(_) => Category::Primitive(self.primitive_type()),
      None => match &self.additional_properties {
        Some(AdditionalProperties::Schema(values)) => Category::Map(Some(values)),
        Some(AdditionalProperties::Flag(true)) => Category::Map(None),
        _ => Category::Primitive(PrimitiveType::Untyped),
      },
    }
  }

  fn primitive_type(&self) -> PrimitiveType {
    self
      .non_null_type()
      .map_or(PrimitiveType::Untyped, |schema_type| {
        PrimitiveType::from_schema(schema_type, self.format.as_deref())
      })
  }
}

impl SchemaOrRef {
  /// Inline nullability; a bare `$ref` is never nullable on its own.
  pub(crate) fn is_nullable(&self) -> bool {
    self.as_schema().is_some_and(SchemaExt::is_nullable)
  }

  /// Returns true for a `$ref`, or for an inline wrapper whose only type
  /// information is a single `$ref` (`allOf: [$ref]` or a nullable union).
  pub(crate) fn is_reference_like(&self) -> bool {
    match self {
      Self::Ref { .. } => true,
      Self::Schema(schema) => {
        schema.single_all_of_ref().is_some()
          || schema
            .nullable_union()
            .is_some_and(|(_, _, inner)| inner.is_reference_like())
      }
    }
  }
}
