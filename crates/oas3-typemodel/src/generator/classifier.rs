use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::generator::{
  coercion::DefaultCoercer,
  config::{ModelConfig, PropertyContext},
  discriminator::{Discrimination, DiscriminatorValue, Hierarchy},
  errors::ModelResult,
  metrics::GenerationWarning,
  model::{
    ADDITIONAL_PROPERTIES_KEY, DefaultValue, DiscriminatorKey, Literal, PropertyDescriptor, PropertyKind,
    PropertyModifier, TypeRef, Wrapping,
  },
  resolver::{ResolvedGraph, ResolvedProperty},
  validation::ValidationAnnotation,
};

/// Place of an object schema in its polymorphic hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Role {
  Single,
  /// Discriminated root.
  Super,
  /// Discriminated schema that is itself a subtype.
  Intermediate,
  Sub,
}

/// Properties visible on a schema: its flattened properties in `allOf` branch
/// order, preceded by whatever its supertypes contribute that the flattened
/// shape lacks (union-only members, borrowed discriminator declarations).
#[derive(Debug, Default)]
struct EffectiveObject {
  properties: IndexMap<String, ResolvedProperty>,
  required: BTreeSet<String>,
}

pub(crate) struct PropertyClassifier<'g> {
  graph: &'g ResolvedGraph,
  hierarchy: &'g Hierarchy,
  config: ModelConfig,
  coercer: DefaultCoercer<'g>,
}

impl<'g> PropertyClassifier<'g> {
  pub(crate) fn new(graph: &'g ResolvedGraph, hierarchy: &'g Hierarchy, config: ModelConfig) -> Self {
    Self {
      graph,
      hierarchy,
      config,
      coercer: DefaultCoercer::new(graph),
    }
  }

  pub(crate) fn role(&self, name: &str) -> Role {
    let discriminated = self.hierarchy.discrimination(name).is_some();
    let has_parent = self.hierarchy.parent(name).is_some();
    match (discriminated, has_parent) {
      (true, false) => Role::Super,
      (true, true) => Role::Intermediate,
      (false, true) => Role::Sub,
      (false, false) => Role::Single,
    }
  }

  /// Classifies every property of the object schema `name`.
  ///
  /// Returns an empty list for non-object schemas.
  pub(crate) fn classify(&self, name: &str, warnings: &mut Vec<GenerationWarning>) -> ModelResult<Vec<PropertyDescriptor>> {
    let Some(object) = self.graph.object(name) else {
      return Ok(Vec::new());
    };

    let role = self.role(name);
    let effective = self.effective(name);
    let inherited: BTreeSet<String> = self
      .hierarchy
      .parent(name)
      .map(|parent| self.effective(parent).properties.into_keys().collect())
      .unwrap_or_default();
    let own_discrimination = self.hierarchy.discrimination(name);

    let mut descriptors = Vec::with_capacity(effective.properties.len() + 1);
    for (key, property) in &effective.properties {
      let own_discriminator = own_discrimination.is_some_and(|discrimination| discrimination.property() == key);
      let ancestor_discrimination = self.ancestor_discrimination(name, key);
      let is_inherited = inherited.contains(key);
      let is_required = effective.required.contains(key);

      let modifier = match role {
        Role::Single => PropertyModifier::None,
        Role::Super | Role::Intermediate if own_discriminator => PropertyModifier::Abstract,
        Role::Intermediate if is_inherited => PropertyModifier::Override,
        Role::Super | Role::Intermediate => PropertyModifier::Open,
        Role::Sub if is_inherited || ancestor_discrimination.is_some() => PropertyModifier::Override,
        Role::Sub => PropertyModifier::None,
      };

      let discriminator_mappings = ancestor_discrimination
        .map(|discrimination| discrimination.keys_for(name))
        .unwrap_or_default();

      let (default_literal, has_default) = if modifier == PropertyModifier::Abstract {
        (None, false)
      } else if let Some(discrimination) = ancestor_discrimination {
        match self
          .config
          .discriminator_policy
          .evaluate(name, key, discriminator_mappings.clone(), warnings)?
        {
          DiscriminatorValue::Fixed(fixed) => (
            Some(DefaultValue::Literal(discriminator_literal(&fixed, discrimination))),
            true,
          ),
          DiscriminatorValue::Settable(_) => self.declared_default(name, property, is_required, warnings)?,
        }
      } else {
        self.declared_default(name, property, is_required, warnings)?
      };

      let is_polymorphic_discriminator = own_discriminator || ancestor_discrimination.is_some();
      let mandatory = self.config.mandatory_policy().is_mandatory(PropertyContext {
        is_required,
        is_nullable: property.nullable,
        has_default,
      });
      let wrapping = if self.config.merge_patch && !is_required && !is_polymorphic_discriminator {
        Wrapping::TriState
      } else {
        Wrapping::Plain
      };
      let annotations = match role {
        Role::Super | Role::Intermediate => Vec::new(),
        Role::Single | Role::Sub => self.annotations(property, mandatory),
      };

      descriptors.push(PropertyDescriptor {
        oas_key: key.clone(),
        kind: property.kind.clone(),
        type_ref: property.type_ref.clone(),
        is_required,
        is_nullable: property.nullable,
        has_default,
        default_literal,
        is_polymorphic_discriminator,
        is_inherited,
        discriminator_mappings,
        modifier,
        wrapping,
        mandatory,
        annotations,
        description: property.description.clone(),
      });
    }

    if let Some(additional) = &object.additional {
      descriptors.push(self.additional_properties_capture(additional.type_ref.clone()));
    }

    Ok(descriptors)
  }

  fn effective(&self, name: &str) -> EffectiveObject {
    let parent = self
      .hierarchy
      .parent(name)
      .map(|parent| self.effective(parent))
      .unwrap_or_default();
    let own = self.graph.object(name);
    let lacks = |key: &str| own.is_none_or(|object| !object.properties.contains_key(key));

    let mut effective = EffectiveObject {
      properties: IndexMap::new(),
      required: parent.required,
    };
    for (key, property) in parent.properties {
      if lacks(&key) {
        effective.properties.insert(key, property);
      }
    }

    if let Some(discrimination) = self.hierarchy.discrimination(name)
      && !discrimination.declared_on_super
      && lacks(discrimination.property())
    {
      effective
        .properties
        .entry(discrimination.property().to_string())
        .or_insert_with(|| discrimination.declaration.clone());
    }

    if let Some(object) = own {
      for (key, property) in &object.properties {
        effective.properties.insert(key.clone(), property.clone());
      }
      effective.required.extend(object.required.iter().cloned());
    }

    effective
  }

  /// The nearest supertype whose discriminator is `key`.
  fn ancestor_discrimination(&self, name: &str, key: &str) -> Option<&'g Discrimination> {
    let hierarchy = self.hierarchy;
    hierarchy
      .ancestors(name)
      .into_iter()
      .filter_map(|ancestor| hierarchy.discrimination(ancestor))
      .find(|discrimination| discrimination.property() == key)
  }

  fn declared_default(
    &self,
    name: &str,
    property: &ResolvedProperty,
    is_required: bool,
    warnings: &mut Vec<GenerationWarning>,
  ) -> ModelResult<(Option<DefaultValue>, bool)> {
    let literal = self.coercer.coerce(name, property, warnings)?;
    let has_default = literal.is_some();
    Ok((
      DefaultValue::for_property(literal, is_required, self.config.merge_patch),
      has_default,
    ))
  }

  fn annotations(&self, property: &ResolvedProperty, mandatory: bool) -> Vec<ValidationAnnotation> {
    let mut annotations = Vec::new();
    if mandatory {
      annotations.push(ValidationAnnotation::NotNull);
    }

    match &property.kind {
      PropertyKind::Field(constraints) => {
        if let Some(pattern) = &constraints.pattern {
          annotations.push(ValidationAnnotation::Pattern {
            regexp: pattern.clone(),
          });
        }
        if constraints.min_length.is_some() || constraints.max_length.is_some() {
          annotations.push(ValidationAnnotation::Size {
            min: constraints.min_length,
            max: constraints.max_length,
          });
        }
        if let Some(minimum) = &constraints.minimum {
          annotations.push(ValidationAnnotation::DecimalMin {
            value: minimum.value.to_string(),
            inclusive: !minimum.exclusive,
          });
        }
        if let Some(maximum) = &constraints.maximum {
          annotations.push(ValidationAnnotation::DecimalMax {
            value: maximum.value.to_string(),
            inclusive: !maximum.exclusive,
          });
        }
      }
      PropertyKind::CollectionValidation(constraints) => {
        if constraints.min_items.is_some() || constraints.max_items.is_some() {
          annotations.push(ValidationAnnotation::Size {
            min: constraints.min_items,
            max: constraints.max_items,
          });
        }
      }
      PropertyKind::ObjectRefField { .. }
      | PropertyKind::ObjectInlinedField { .. }
      | PropertyKind::MapField
      | PropertyKind::AdditionalPropertiesCapture => {}
    }

    if self.graph.is_complex(&property.type_ref) {
      annotations.push(ValidationAnnotation::Valid);
    }
    annotations
  }

  fn additional_properties_capture(&self, values: TypeRef) -> PropertyDescriptor {
    let mandatory = self.config.mandatory_policy().is_mandatory(PropertyContext {
      is_required: false,
      is_nullable: false,
      has_default: true,
    });
    PropertyDescriptor {
      oas_key: ADDITIONAL_PROPERTIES_KEY.to_string(),
      kind: PropertyKind::AdditionalPropertiesCapture,
      type_ref: TypeRef::map_of(values),
      is_required: false,
      is_nullable: false,
      has_default: true,
      default_literal: Some(DefaultValue::Literal(Literal::EmptyMap)),
      is_polymorphic_discriminator: false,
      is_inherited: false,
      discriminator_mappings: Vec::new(),
      modifier: PropertyModifier::None,
      wrapping: Wrapping::Plain,
      mandatory,
      annotations: Vec::new(),
      description: None,
    }
  }
}

fn discriminator_literal(key: &DiscriminatorKey, discrimination: &Discrimination) -> Literal {
  match (key, &discrimination.descriptor.enum_type) {
    (DiscriminatorKey::EnumKey { constant, .. }, Some(enum_type)) => Literal::EnumMember {
      type_name: enum_type.clone(),
      constant: constant.clone(),
    },
    (key, _) => Literal::String(key.value().to_string()),
  }
}
