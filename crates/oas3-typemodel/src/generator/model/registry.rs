use std::{collections::BTreeMap, sync::Arc};

use serde::Serialize;

use super::SchemaDescriptor;

/// Registry owning every descriptor produced by one run.
///
/// Supertype and subtype links inside descriptors are names; they are resolved
/// through this registry. Alias component names (whose `$ref` chain ends at
/// another component) return the same `Arc` as the schema they point to.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TypeModel {
  schemas: BTreeMap<String, Arc<SchemaDescriptor>>,
  #[serde(skip_serializing_if = "BTreeMap::is_empty")]
  aliases: BTreeMap<String, String>,
}

impl TypeModel {
  pub(crate) fn new(schemas: BTreeMap<String, Arc<SchemaDescriptor>>, aliases: BTreeMap<String, String>) -> Self {
    Self { schemas, aliases }
  }

  /// Looks up a descriptor by canonical or alias name.
  #[must_use]
  pub fn get(&self, name: &str) -> Option<&Arc<SchemaDescriptor>> {
    self
      .schemas
      .get(name)
      .or_else(|| self.aliases.get(name).and_then(|target| self.schemas.get(target)))
  }

  #[must_use]
  pub fn contains(&self, name: &str) -> bool {
    self.get(name).is_some()
  }

  #[must_use]
  pub fn supertype_of(&self, descriptor: &SchemaDescriptor) -> Option<&Arc<SchemaDescriptor>> {
    descriptor.supertype.as_deref().and_then(|name| self.get(name))
  }

  pub fn subtypes_of<'a>(&'a self, descriptor: &'a SchemaDescriptor) -> impl Iterator<Item = &'a Arc<SchemaDescriptor>> {
    descriptor.subtypes.iter().filter_map(|name| self.get(name))
  }

  /// Descriptors in name order.
  pub fn iter(&self) -> impl Iterator<Item = &Arc<SchemaDescriptor>> {
    self.schemas.values()
  }

  pub fn names(&self) -> impl Iterator<Item = &String> {
    self.schemas.keys()
  }

  #[must_use]
  pub fn aliases(&self) -> &BTreeMap<String, String> {
    &self.aliases
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.schemas.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.schemas.is_empty()
  }
}
