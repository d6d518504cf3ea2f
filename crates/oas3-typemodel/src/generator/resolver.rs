use std::{
  collections::{BTreeMap, BTreeSet, VecDeque},
  sync::Arc,
};

use indexmap::IndexMap;
use regex::Regex;
use serde_json::{Number, Value};

use crate::{
  document::{AdditionalProperties, Discriminator, ExclusiveBound, OpenApiDocument, RawSchema, SchemaOrRef},
  generator::{
    errors::{ModelError, ModelResult, RefFailure},
    metrics::GenerationWarning,
    model::{
      CollectionConstraints, EnumDescriptor, EnumMember, FieldConstraints, NumericBound, PrimitiveType, PropertyKind,
      TypeRef,
    },
    naming::{ensure_unique, inline_type_name, to_enum_constant},
  },
  utils::{Category, SchemaExt, component_pointer, escape_pointer_segment, parse_schema_ref_path},
};

/// An inline object or enum found while typing a value. It is resolved later
/// under its synthesized name.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct InlineSchema {
  pub name: String,
  pub pointer: String,
  pub schema: RawSchema,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResolvedProperty {
  pub key: String,
  pub type_ref: TypeRef,
  pub kind: PropertyKind,
  pub nullable: bool,
  pub default: Option<Value>,
  pub description: Option<String>,
  pub inlines: Vec<InlineSchema>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AdditionalType {
  pub type_ref: TypeRef,
  pub inlines: Vec<InlineSchema>,
}

/// An object schema with its `allOf` chain flattened.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ObjectShape {
  pub properties: IndexMap<String, ResolvedProperty>,
  pub required: BTreeSet<String>,
  pub additional: Option<AdditionalType>,
  /// Declared on the schema itself or on one of its inline `allOf` branches.
  pub discriminator: Option<Discriminator>,
  /// Components referenced from `allOf`, in branch order.
  pub all_of_refs: Vec<String>,
  /// Named members of a discriminated `oneOf`/`anyOf`.
  pub union_members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Shape {
  Primitive(PrimitiveType),
  Enum(EnumDescriptor),
  Array(TypeRef),
  Map(TypeRef),
  Object(ObjectShape),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResolvedSchema {
  pub name: String,
  pub pointer: String,
  pub inline: bool,
  pub description: Option<String>,
  pub shape: Shape,
}

impl ResolvedSchema {
  pub(crate) fn object(&self) -> Option<&ObjectShape> {
    match &self.shape {
      Shape::Object(object) => Some(object),
      _ => None,
    }
  }

  pub(crate) fn enum_descriptor(&self) -> Option<&EnumDescriptor> {
    match &self.shape {
      Shape::Enum(descriptor) => Some(descriptor),
      _ => None,
    }
  }
}

/// Every schema reachable from the document's components, keyed by name.
#[derive(Debug, Default)]
pub(crate) struct ResolvedGraph {
  pub schemas: BTreeMap<String, Arc<ResolvedSchema>>,
  pub aliases: BTreeMap<String, String>,
  pub warnings: Vec<GenerationWarning>,
}

impl ResolvedGraph {
  pub(crate) fn canonical<'s>(&'s self, name: &'s str) -> &'s str {
    self.aliases.get(name).map_or(name, String::as_str)
  }

  pub(crate) fn get(&self, name: &str) -> Option<&Arc<ResolvedSchema>> {
    self.schemas.get(self.canonical(name))
  }

  pub(crate) fn object(&self, name: &str) -> Option<&ObjectShape> {
    self.get(name).and_then(|schema| schema.object())
  }

  /// Returns the enum a type refers to, with its name.
  pub(crate) fn enum_of<'s>(&'s self, type_ref: &'s TypeRef) -> Option<(&'s str, &'s EnumDescriptor)> {
    let name = type_ref.named()?;
    let descriptor = self.get(name)?.enum_descriptor()?;
    Some((name, descriptor))
  }

  /// True when the type, or the element type of an array or map, is a named object.
  pub(crate) fn is_complex(&self, type_ref: &TypeRef) -> bool {
    type_ref
      .element()
      .named()
      .is_some_and(|name| self.object(name).is_some())
  }
}

/// Walks the component schemas and every inline schema they contain.
///
/// Results are memoized by JSON pointer, so a schema reached directly and via
/// `$ref` is resolved once. Inline schemas discovered while typing properties
/// are queued and resolved after the components.
pub(crate) struct SchemaResolver<'a> {
  document: &'a OpenApiDocument,
  component_names: BTreeSet<String>,
  resolved: BTreeMap<String, Arc<ResolvedSchema>>,
  flattened: BTreeMap<String, Arc<ObjectShape>>,
  flattening: Vec<(String, String)>,
  typing: Vec<String>,
  inline_names: BTreeMap<String, String>,
  bound_names: BTreeMap<String, BTreeSet<String>>,
  aliases: BTreeMap<String, String>,
  pending: VecDeque<InlineSchema>,
  warnings: Vec<GenerationWarning>,
}

impl<'a> SchemaResolver<'a> {
  pub(crate) fn new(document: &'a OpenApiDocument) -> Self {
    Self {
      document,
      component_names: document.schema_names().cloned().collect(),
      resolved: BTreeMap::new(),
      flattened: BTreeMap::new(),
      flattening: Vec::new(),
      typing: Vec::new(),
      inline_names: BTreeMap::new(),
      bound_names: BTreeMap::new(),
      aliases: BTreeMap::new(),
      pending: VecDeque::new(),
      warnings: Vec::new(),
    }
  }

  /// Resolves the named components in the given order, then every inline
  /// schema they reach.
  pub(crate) fn resolve<I, S>(self, order: I) -> ModelResult<ResolvedGraph>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let order: Vec<String> = order.into_iter().map(|name| name.as_ref().to_string()).collect();

    // Inline schemas at different pointers may synthesize the same name. The
    // first pointer keeps it, later ones are renamed and the pass is repeated
    // so nested inline names follow the renamed owner.
    let mut pass = self;
    loop {
      pass.resolve_pass(&order)?;
      let renames = pass.inline_renames();
      if renames.is_empty() {
        return Ok(pass.into_graph());
      }

      let mut inline_names = std::mem::take(&mut pass.inline_names);
      inline_names.extend(renames);
      pass = Self::new(pass.document);
      pass.inline_names = inline_names;
    }
  }

  fn resolve_pass(&mut self, order: &[String]) -> ModelResult<()> {
    for name in order {
      self.resolve_component(name)?;
    }

    while let Some(inline) = self.pending.pop_front() {
      if !self.resolved.contains_key(&inline.pointer) {
        self.resolve_schema(&inline.name, &inline.pointer, &inline.schema, true)?;
      }
    }
    Ok(())
  }

  /// New names for every pointer that shares its name with a pointer sorting
  /// before it. Pointers nested under a renamed pointer wait for the next pass,
  /// where their names derive from the new owner name.
  fn inline_renames(&self) -> BTreeMap<String, String> {
    let colliding: Vec<(&String, &String)> = self
      .bound_names
      .iter()
      .flat_map(|(name, pointers)| pointers.iter().skip(1).map(move |pointer| (name, pointer)))
      .collect();

    let mut used: BTreeSet<String> = self.component_names.clone();
    used.extend(self.bound_names.keys().cloned());

    let mut renames = BTreeMap::new();
    for (name, pointer) in &colliding {
      let nested = colliding
        .iter()
        .any(|(_, owner)| pointer.strip_prefix(owner.as_str()).is_some_and(|rest| rest.starts_with('/')));
      if nested {
        continue;
      }
      let unique = ensure_unique(name, &used);
      used.insert(unique.clone());
      renames.insert((*pointer).clone(), unique);
    }
    renames
  }

  fn into_graph(self) -> ResolvedGraph {
    let schemas = self
      .resolved
      .into_values()
      .map(|schema| (schema.name.clone(), schema))
      .collect();

    ResolvedGraph {
      schemas,
      aliases: self.aliases,
      warnings: self.warnings,
    }
  }

  pub(crate) fn resolve_component(&mut self, name: &str) -> ModelResult<Arc<ResolvedSchema>> {
    let target = self.follow_alias(name, name)?;
    if target != name {
      self.aliases.insert(name.to_string(), target.clone());
    }
    let schema = self.component_schema(&target)?;
    self.resolve_schema(&target, &component_pointer(&target), schema, false)
  }

  fn resolve_schema(
    &mut self,
    name: &str,
    pointer: &str,
    schema: &RawSchema,
    inline: bool,
  ) -> ModelResult<Arc<ResolvedSchema>> {
    if let Some(existing) = self.resolved.get(pointer) {
      return Ok(Arc::clone(existing));
    }

    let shape = self.shape_of(name, pointer, schema)?;
    self.bind_name(name, pointer);

    let resolved = Arc::new(ResolvedSchema {
      name: name.to_string(),
      pointer: pointer.to_string(),
      inline,
      description: schema.description.clone(),
      shape,
    });
    self.resolved.insert(pointer.to_string(), Arc::clone(&resolved));
    Ok(resolved)
  }

  fn bind_name(&mut self, name: &str, pointer: &str) {
    self
      .bound_names
      .entry(name.to_string())
      .or_default()
      .insert(pointer.to_string());
  }

  fn shape_of(&mut self, name: &str, pointer: &str, schema: &RawSchema) -> ModelResult<Shape> {
    match schema.category() {
      Category::Enum => Ok(Shape::Enum(enum_descriptor(schema))),
      Category::NullableOf { keyword, index, inner } => match inner {
        SchemaOrRef::Schema(inner) => self.shape_of(name, &format!("{pointer}/{keyword}/{index}"), inner),
        SchemaOrRef::Ref { ref_path } => {
          let target = self.resolve_ref(name, ref_path)?;
          Ok(self.resolve_component(&target)?.shape.clone())
        }
      },
      Category::Union => {
        self.warn(GenerationWarning::UntypedUnion {
          schema_name: name.to_string(),
        });
        Ok(Shape::Primitive(PrimitiveType::Untyped))
      }
      Category::Object => Ok(Shape::Object(self.object_shape(name, pointer, schema)?)),
      Category::Array(items) => {
        let mut inlines = Vec::new();
        let items = match items {
          Some(items) => self.type_of(name, &format!("{name}Item"), items, &format!("{pointer}/items"), &mut inlines)?,
          None => TypeRef::untyped(),
        };
        self.pending.extend(inlines);
        Ok(Shape::Array(items))
      }
      Category::Map(values) => {
        let mut inlines = Vec::new();
        let values = match values {
          Some(values) => self.type_of(
            name,
            &format!("{name}Value"),
            values,
            &format!("{pointer}/additionalProperties"),
            &mut inlines,
          )?,
          None => TypeRef::untyped(),
        };
        self.pending.extend(inlines);
        Ok(Shape::Map(values))
      }
      Category::Primitive(primitive) => Ok(Shape::Primitive(primitive)),
    }
  }

  fn object_shape(&mut self, name: &str, pointer: &str, schema: &RawSchema) -> ModelResult<ObjectShape> {
    let flat = self.flatten(name, pointer, schema)?;
    let mut object = (*flat).clone();

    for property in object.properties.values() {
      self.pending.extend(property.inlines.iter().cloned());
    }
    if let Some(additional) = &object.additional {
      self.pending.extend(additional.inlines.iter().cloned());
    }

    if object.discriminator.is_some() {
      for (index, variant) in schema.one_of.iter().chain(&schema.any_of).enumerate() {
        match variant {
          SchemaOrRef::Ref { ref_path } => {
            let member = self.resolve_ref(name, ref_path)?;
            if !object.union_members.contains(&member) {
              object.union_members.push(member);
            }
          }
          SchemaOrRef::Schema(_) => self.warn(GenerationWarning::InlineUnionMember {
            schema_name: name.to_string(),
            index,
          }),
        }
      }
    }

    Ok(object)
  }

  /// Flattens the `allOf` chain of an object schema, memoized by pointer.
  fn flatten(&mut self, name: &str, pointer: &str, schema: &RawSchema) -> ModelResult<Arc<ObjectShape>> {
    if let Some(flat) = self.flattened.get(pointer) {
      return Ok(Arc::clone(flat));
    }

    if let Some(position) = self.flattening.iter().position(|(visiting, _)| visiting == pointer) {
      let mut cycle: Vec<String> = self.flattening[position..]
        .iter()
        .map(|(_, visiting)| visiting.clone())
        .collect();
      cycle.push(name.to_string());
      return Err(ModelError::UnresolvableReference {
        schema: name.to_string(),
        reference: pointer.to_string(),
        reason: RefFailure::Cycle(cycle),
      });
    }

    self.flattening.push((pointer.to_string(), name.to_string()));
    let result = self.merge_all_of(name, pointer, schema);
    self.flattening.pop();

    let flat = Arc::new(result?);
    self.flattened.insert(pointer.to_string(), Arc::clone(&flat));
    Ok(flat)
  }

  fn merge_all_of(&mut self, name: &str, pointer: &str, schema: &RawSchema) -> ModelResult<ObjectShape> {
    let mut merged = MergeAccumulator::new(name);

    for (index, branch) in schema.all_of.iter().enumerate() {
      match branch {
        SchemaOrRef::Ref { ref_path } => {
          let parent = self.resolve_ref(name, ref_path)?;
          let parent_schema = self.component_schema(&parent)?;
          let inherited = self.flatten(&parent, &component_pointer(&parent), parent_schema)?;
          merged.merge(&inherited, false)?;
          merged.all_of_refs.push(parent);
        }
        SchemaOrRef::Schema(inline) => {
          let inherited = self.flatten(name, &format!("{pointer}/allOf/{index}"), inline)?;
          merged.merge(&inherited, true)?;
          merged.all_of_refs.extend(inherited.all_of_refs.iter().cloned());
        }
      }
    }

    for (key, property) in &schema.properties {
      let resolved = self.resolve_property(name, pointer, key, property)?;
      merged.insert(resolved)?;
    }

    merged.required.extend(schema.required.iter().cloned());
    if let Some(additional) = &schema.additional_properties {
      merged.additional = self.additional_type(name, pointer, additional)?;
    }
    if let Some(discriminator) = &schema.discriminator {
      merged.discriminator = Some(discriminator.clone());
    }

    Ok(merged.finish())
  }

  fn additional_type(
    &mut self,
    name: &str,
    pointer: &str,
    additional: &AdditionalProperties,
  ) -> ModelResult<Option<AdditionalType>> {
    match additional {
      AdditionalProperties::Flag(false) => Ok(None),
      AdditionalProperties::Flag(true) => Ok(Some(AdditionalType {
        type_ref: TypeRef::untyped(),
        inlines: Vec::new(),
      })),
      AdditionalProperties::Schema(values) => {
        let mut inlines = Vec::new();
        let type_ref = self.type_of(
          name,
          &format!("{name}Value"),
          values,
          &format!("{pointer}/additionalProperties"),
          &mut inlines,
        )?;
        Ok(Some(AdditionalType { type_ref, inlines }))
      }
    }
  }

  fn resolve_property(
    &mut self,
    owner: &str,
    owner_pointer: &str,
    key: &str,
    node: &SchemaOrRef,
  ) -> ModelResult<ResolvedProperty> {
    let pointer = format!("{owner_pointer}/properties/{}", escape_pointer_segment(key));
    let mut inlines = Vec::new();
    let type_ref = self.type_of(owner, &inline_type_name(owner, key), node, &pointer, &mut inlines)?;
    let effective = self.effective_schema(owner, node)?;

    let kind = match &type_ref {
      TypeRef::Named(_) if effective.has_enum_values() => PropertyKind::Field(FieldConstraints::default()),
      TypeRef::Named(target) if node.is_reference_like() => PropertyKind::ObjectRefField { target: target.clone() },
      TypeRef::Named(target) => PropertyKind::ObjectInlinedField { target: target.clone() },
      TypeRef::Array(_) => PropertyKind::CollectionValidation(CollectionConstraints {
        min_items: effective.min_items,
        max_items: effective.max_items,
        unique_items: effective.unique_items.unwrap_or(false),
      }),
      TypeRef::Map(_) => PropertyKind::MapField,
      TypeRef::Primitive(primitive) => PropertyKind::Field(self.field_constraints(owner, key, *primitive, &effective)),
    };

    Ok(ResolvedProperty {
      key: key.to_string(),
      nullable: self.is_nullable(owner, node)?,
      type_ref,
      kind,
      default: effective.default,
      description: effective.description,
      inlines,
    })
  }

  fn field_constraints(&mut self, owner: &str, key: &str, primitive: PrimitiveType, schema: &RawSchema) -> FieldConstraints {
    let mut constraints = FieldConstraints::default();

    if primitive.is_textual() {
      constraints.pattern = schema.pattern.as_ref().and_then(|pattern| match validate_pattern(pattern) {
        Ok(()) => Some(pattern.clone()),
        Err(error) => {
          self.warn(GenerationWarning::InvalidPattern {
            schema_name: owner.to_string(),
            property: key.to_string(),
            error,
          });
          None
        }
      });
      constraints.min_length = schema.min_length;
      constraints.max_length = schema.max_length;
    }

    if primitive.is_numeric() {
      constraints.minimum = numeric_bound(schema.minimum.as_ref(), schema.exclusive_minimum.as_ref());
      constraints.maximum = numeric_bound(schema.maximum.as_ref(), schema.exclusive_maximum.as_ref());
    }

    constraints
  }

  /// Types a value schema without resolving referenced components.
  ///
  /// Inline objects and enums are named from `base` and appended to
  /// `inlines`; the caller decides whether to queue them.
  fn type_of(
    &mut self,
    context: &str,
    base: &str,
    node: &SchemaOrRef,
    pointer: &str,
    inlines: &mut Vec<InlineSchema>,
  ) -> ModelResult<TypeRef> {
    let schema = match node {
      SchemaOrRef::Ref { ref_path } => {
        let target = self.resolve_ref(context, ref_path)?;
        return self.component_type(&target);
      }
      SchemaOrRef::Schema(schema) => schema,
    };

    if let Some(inner) = schema.single_all_of_ref() {
      return self.type_of(context, base, inner, &format!("{pointer}/allOf/0"), inlines);
    }

    match schema.category() {
      Category::Enum | Category::Object => {
        let name = self
          .inline_names
          .get(pointer)
          .cloned()
          .unwrap_or_else(|| ensure_unique(base, &self.component_names));
        inlines.push(InlineSchema {
          name: name.clone(),
          pointer: pointer.to_string(),
          schema: (**schema).clone(),
        });
        Ok(TypeRef::Named(name))
      }
      Category::NullableOf { keyword, index, inner } => {
        self.type_of(context, base, inner, &format!("{pointer}/{keyword}/{index}"), inlines)
      }
      Category::Union => {
        self.warn(GenerationWarning::UntypedUnion {
          schema_name: base.to_string(),
        });
        Ok(TypeRef::untyped())
      }
      Category::Array(items) => {
        let items = match items {
          Some(items) => self.type_of(context, &format!("{base}Item"), items, &format!("{pointer}/items"), inlines)?,
          None => TypeRef::untyped(),
        };
        Ok(TypeRef::array_of(items))
      }
      Category::Map(values) => {
        let values = match values {
          Some(values) => self.type_of(
            context,
            &format!("{base}Value"),
            values,
            &format!("{pointer}/additionalProperties"),
            inlines,
          )?,
          None => TypeRef::untyped(),
        };
        Ok(TypeRef::map_of(values))
      }
      Category::Primitive(primitive) => Ok(TypeRef::Primitive(primitive)),
    }
  }

  /// Type of a value that references a component. Objects and enums stay
  /// named; primitives, arrays and maps are inlined into the reference.
  fn component_type(&mut self, name: &str) -> ModelResult<TypeRef> {
    if self.typing.iter().any(|visiting| visiting == name) {
      let mut cycle = self.typing.clone();
      cycle.push(name.to_string());
      return Err(ModelError::UnresolvableReference {
        schema: name.to_string(),
        reference: component_pointer(name),
        reason: RefFailure::Cycle(cycle),
      });
    }

    let schema = self.component_schema(name)?;
    self.typing.push(name.to_string());
    let mut discarded = Vec::new();
    let result = self.named_type(name, &component_pointer(name), schema, &mut discarded);
    self.typing.pop();
    result
  }

  fn named_type(
    &mut self,
    name: &str,
    pointer: &str,
    schema: &RawSchema,
    inlines: &mut Vec<InlineSchema>,
  ) -> ModelResult<TypeRef> {
    match schema.category() {
      Category::Enum | Category::Object => Ok(TypeRef::Named(name.to_string())),
      Category::Union => Ok(TypeRef::untyped()),
      Category::NullableOf { keyword, index, inner } => match inner {
        SchemaOrRef::Schema(inner) => self.named_type(name, &format!("{pointer}/{keyword}/{index}"), inner, inlines),
        SchemaOrRef::Ref { ref_path } => {
          let target = self.resolve_ref(name, ref_path)?;
          self.component_type(&target)
        }
      },
      Category::Array(items) => {
        let items = match items {
          Some(items) => self.type_of(name, &format!("{name}Item"), items, &format!("{pointer}/items"), inlines)?,
          None => TypeRef::untyped(),
        };
        Ok(TypeRef::array_of(items))
      }
      Category::Map(values) => {
        let values = match values {
          Some(values) => self.type_of(
            name,
            &format!("{name}Value"),
            values,
            &format!("{pointer}/additionalProperties"),
            inlines,
          )?,
          None => TypeRef::untyped(),
        };
        Ok(TypeRef::map_of(values))
      }
      Category::Primitive(primitive) => Ok(TypeRef::Primitive(primitive)),
    }
  }

  /// The schema whose keywords (default, constraints, enum values) apply to a
  /// property: the referenced component, or the target of an inline wrapper.
  fn effective_schema(&self, context: &str, node: &SchemaOrRef) -> ModelResult<RawSchema> {
    match node {
      SchemaOrRef::Ref { ref_path } => {
        let target = self.resolve_ref(context, ref_path)?;
        let schema = self.component_schema(&target)?;
        Ok(match schema.nullable_union() {
          Some((_, _, SchemaOrRef::Schema(inner))) => (**inner).clone(),
          _ => schema.clone(),
        })
      }
      SchemaOrRef::Schema(schema) => {
        let inner = schema
          .single_all_of_ref()
          .or_else(|| schema.nullable_union().map(|(_, _, inner)| inner));
        let Some(inner) = inner else {
          return Ok((**schema).clone());
        };

        let mut effective = self.effective_schema(context, inner)?;
        if schema.default.is_some() {
          effective.default.clone_from(&schema.default);
        }
        if schema.description.is_some() {
          effective.description.clone_from(&schema.description);
        }
        Ok(effective)
      }
    }
  }

  fn is_nullable(&self, context: &str, node: &SchemaOrRef) -> ModelResult<bool> {
    match node {
      SchemaOrRef::Ref { ref_path } => {
        // A nullable alias (`oneOf: [$ref, null]`) is nullable even though its target is not.
        let via_alias = parse_schema_ref_path(ref_path)
          .and_then(|name| self.document.schema(&name))
          .is_some_and(SchemaOrRef::is_nullable);
        let target = self.resolve_ref(context, ref_path)?;
        Ok(via_alias || self.component_schema(&target)?.is_nullable())
      }
      SchemaOrRef::Schema(schema) => match schema.single_all_of_ref() {
        Some(inner) if !schema.is_nullable() => self.is_nullable(context, inner),
        _ => Ok(schema.is_nullable()),
      },
    }
  }

  fn resolve_ref(&self, context: &str, ref_path: &str) -> ModelResult<String> {
    let name = parse_schema_ref_path(ref_path).ok_or_else(|| ModelError::UnresolvableReference {
      schema: context.to_string(),
      reference: ref_path.to_string(),
      reason: RefFailure::External,
    })?;
    self.follow_alias(context, &name)
  }

  /// Follows a chain of alias components (`$ref` or nullable `$ref`) to the
  /// component that actually defines a schema.
  fn follow_alias(&self, context: &str, name: &str) -> ModelResult<String> {
    let mut chain = vec![name.to_string()];
    let mut current = name.to_string();

    loop {
      let Some(node) = self.document.schema(&current) else {
        return Err(ModelError::UnresolvableReference {
          schema: context.to_string(),
          reference: component_pointer(&current),
          reason: RefFailure::Dangling,
        });
      };
      let Some(ref_path) = alias_target(node) else {
        return Ok(current);
      };

      let next = parse_schema_ref_path(ref_path).ok_or_else(|| ModelError::UnresolvableReference {
        schema: current.clone(),
        reference: ref_path.to_string(),
        reason: RefFailure::External,
      })?;
      let is_cycle = chain.contains(&next);
      chain.push(next.clone());
      if is_cycle {
        return Err(ModelError::UnresolvableReference {
          schema: context.to_string(),
          reference: ref_path.to_string(),
          reason: RefFailure::Cycle(chain),
        });
      }
      current = next;
    }
  }

  /// The defining schema of a component, after alias chains are followed.
  fn component_schema(&self, name: &str) -> ModelResult<&'a RawSchema> {
    let document = self.document;
    let target = self.follow_alias(name, name)?;
    match document.schema(&target) {
      Some(SchemaOrRef::Schema(schema)) => Ok(schema),
      _ => Err(ModelError::UnresolvableReference {
        schema: name.to_string(),
        reference: component_pointer(&target),
        reason: RefFailure::Dangling,
      }),
    }
  }

  fn warn(&mut self, warning: GenerationWarning) {
    if !self.warnings.contains(&warning) {
      self.warnings.push(warning);
    }
  }
}

fn alias_target(node: &SchemaOrRef) -> Option<&str> {
  match node {
    SchemaOrRef::Ref { ref_path } => Some(ref_path),
    SchemaOrRef::Schema(schema) => match schema.nullable_union() {
      Some((_, _, SchemaOrRef::Ref { ref_path })) => Some(ref_path),
      _ => None,
    },
  }
}

/// Accumulates `allOf` branches: a key keeps its first position and its
/// latest declaration; redeclaring it with another type is an error.
struct MergeAccumulator<'n> {
  schema: &'n str,
  properties: IndexMap<String, ResolvedProperty>,
  required: BTreeSet<String>,
  additional: Option<AdditionalType>,
  discriminator: Option<Discriminator>,
  all_of_refs: Vec<String>,
}

impl<'n> MergeAccumulator<'n> {
  fn new(schema: &'n str) -> Self {
    Self {
      schema,
      properties: IndexMap::new(),
      required: BTreeSet::new(),
      additional: None,
      discriminator: None,
      all_of_refs: Vec::new(),
    }
  }

  fn merge(&mut self, branch: &ObjectShape, inline_branch: bool) -> ModelResult<()> {
    for property in branch.properties.values() {
      self.insert(property.clone())?;
    }
    self.required.extend(branch.required.iter().cloned());
    if branch.additional.is_some() {
      self.additional.clone_from(&branch.additional);
    }
    // A referenced parent's discriminator makes this schema its subtype, not a second super.
    if inline_branch && branch.discriminator.is_some() {
      self.discriminator.clone_from(&branch.discriminator);
    }
    Ok(())
  }

  fn insert(&mut self, property: ResolvedProperty) -> ModelResult<()> {
    if let Some(existing) = self.properties.get(&property.key)
      && existing.type_ref != property.type_ref
    {
      return Err(ModelError::ConflictingPropertyType {
        schema: self.schema.to_string(),
        property: property.key,
        existing: existing.type_ref.to_string(),
        incoming: property.type_ref.to_string(),
      });
    }
    self.properties.insert(property.key.clone(), property);
    Ok(())
  }

  fn finish(self) -> ObjectShape {
    ObjectShape {
      properties: self.properties,
      required: self.required,
      additional: self.additional,
      discriminator: self.discriminator,
      all_of_refs: self.all_of_refs,
      union_members: Vec::new(),
    }
  }
}

fn enum_descriptor(schema: &RawSchema) -> EnumDescriptor {
  let base = match schema.primitive_type() {
    PrimitiveType::Untyped => PrimitiveType::String,
    primitive => primitive,
  };

  let mut used = BTreeSet::new();
  let mut members: Vec<EnumMember> = Vec::new();
  for value in schema.enum_values.iter().filter(|value| !value.is_null()) {
    if members.iter().any(|member| &member.value == value) {
      continue;
    }
    let text = match value {
      Value::String(text) => text.clone(),
      other => other.to_string(),
    };
    let constant = ensure_unique(&to_enum_constant(&text), &used);
    used.insert(constant.clone());
    members.push(EnumMember {
      value: value.clone(),
      constant,
    });
  }

  EnumDescriptor { base, members }
}

fn numeric_bound(value: Option<&Number>, exclusive: Option<&ExclusiveBound>) -> Option<NumericBound> {
  match exclusive {
    Some(ExclusiveBound::Value(bound)) => Some(NumericBound {
      value: bound.clone(),
      exclusive: true,
    }),
    Some(ExclusiveBound::Flag(exclusive)) => value.map(|value| NumericBound {
      value: value.clone(),
      exclusive: *exclusive,
    }),
    None => value.map(|value| NumericBound {
      value: value.clone(),
      exclusive: false,
    }),
  }
}

/// Lookaround and backreferences are valid for the JVM but unsupported by the
/// `regex` crate, so patterns using them are kept without compiling.
const JVM_ONLY_CONSTRUCTS: [&str; 4] = ["(?=", "(?!", "(?<=", "(?<!"];

fn validate_pattern(pattern: &str) -> Result<(), String> {
  let has_backreference = pattern
    .as_bytes()
    .windows(2)
    .any(|pair| pair[0] == b'\\' && pair[1].is_ascii_digit() && pair[1] != b'0');
  if has_backreference || JVM_ONLY_CONSTRUCTS.iter().any(|construct| pattern.contains(construct)) {
    return Ok(());
  }
  Regex::new(pattern).map(|_| ()).map_err(|err| err.to_string())
}
