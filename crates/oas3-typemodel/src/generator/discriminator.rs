use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;
use itertools::Itertools;
use petgraph::{
  algo::{has_path_connecting, kosaraju_scc},
  graphmap::DiGraphMap,
};

use crate::{
  generator::{
    config::DiscriminatorPolicy,
    errors::{ModelError, ModelResult, RefFailure},
    metrics::GenerationWarning,
    model::{DiscriminatorDescriptor, DiscriminatorKey, EnumDescriptor},
    resolver::{ObjectShape, ResolvedGraph, ResolvedProperty},
  },
  utils::parse_schema_ref_path,
};

/// Discriminator facts for one polymorphic schema.
#[derive(Debug, Clone)]
pub(crate) struct Discrimination {
  pub descriptor: DiscriminatorDescriptor,
  /// Declaration of the discriminator property. Taken from the first subtype
  /// that declares it when the polymorphic schema itself does not.
  pub declaration: ResolvedProperty,
  pub declared_on_super: bool,
  /// Mapping value to canonical target schema, in mapping order.
  mapping: IndexMap<String, String>,
  enum_members: Option<EnumDescriptor>,
}

impl Discrimination {
  pub(crate) fn property(&self) -> &str {
    &self.descriptor.property
  }

  /// Discriminator keys that select `subtype`.
  ///
  /// Explicit mapping entries win; without any, the subtype's own name is the
  /// implicit key. For enum discriminators, values that are not members are
  /// dropped.
  pub(crate) fn keys_for(&self, subtype: &str) -> Vec<DiscriminatorKey> {
    let mut values: Vec<&str> = self
      .mapping
      .iter()
      .filter(|(_, target)| target.as_str() == subtype)
      .map(|(value, _)| value.as_str())
      .collect();
    if values.is_empty() {
      values.push(subtype);
    }

    match &self.enum_members {
      Some(members) => values
        .into_iter()
        .filter_map(|value| {
          members.member_for_str(value).map(|member| DiscriminatorKey::EnumKey {
            value: value.to_string(),
            constant: member.constant.clone(),
          })
        })
        .collect(),
      None => values
        .into_iter()
        .map(|value| DiscriminatorKey::StringKey {
          value: value.to_string(),
        })
        .collect(),
    }
  }
}

/// Polymorphic relationships between the resolved schemas.
#[derive(Debug, Default)]
pub(crate) struct Hierarchy {
  parents: BTreeMap<String, String>,
  children: BTreeMap<String, BTreeSet<String>>,
  discriminations: BTreeMap<String, Discrimination>,
}

impl Hierarchy {
  pub(crate) fn parent(&self, name: &str) -> Option<&str> {
    self.parents.get(name).map(String::as_str)
  }

  pub(crate) fn children(&self, name: &str) -> BTreeSet<String> {
    self.children.get(name).cloned().unwrap_or_default()
  }

  pub(crate) fn discrimination(&self, name: &str) -> Option<&Discrimination> {
    self.discriminations.get(name)
  }

  /// Supertypes from the nearest to the root.
  pub(crate) fn ancestors(&self, name: &str) -> Vec<&str> {
    let mut ancestors = Vec::new();
    let mut current = name;
    while let Some(parent) = self.parent(current) {
      if parent == name || ancestors.contains(&parent) {
        break;
      }
      ancestors.push(parent);
      current = parent;
    }
    ancestors
  }
}

pub(crate) struct DiscriminatorAnalyzer<'g> {
  graph: &'g ResolvedGraph,
}

impl<'g> DiscriminatorAnalyzer<'g> {
  pub(crate) fn new(graph: &'g ResolvedGraph) -> Self {
    Self { graph }
  }

  /// Links every subtype to its polymorphic supertype and collects the
  /// discriminator keys of each.
  ///
  /// # Errors
  ///
  /// `AmbiguousSupertype` when a schema has two unrelated polymorphic
  /// supertypes, `CyclicInheritance` when the supertype links form a cycle,
  /// `MissingDiscriminatorProperty` when neither a polymorphic schema nor a
  /// subtype declares the discriminator property, and `UnresolvableReference`
  /// for mapping targets that name no schema.
  pub(crate) fn analyze(&self) -> ModelResult<Hierarchy> {
    let supers: BTreeMap<&str, &ObjectShape> = self
      .graph
      .schemas
      .iter()
      .filter_map(|(name, schema)| {
        schema
          .object()
          .filter(|object| object.discriminator.is_some())
          .map(|object| (name.as_str(), object))
      })
      .collect();

    let candidates = self.collect_candidates(&supers)?;
    let parents = select_parents(&candidates)?;
    detect_cycles(&parents)?;

    let mut children: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for (child, parent) in &parents {
      children.entry(parent.clone()).or_default().insert(child.clone());
    }

    let mut discriminations = BTreeMap::new();
    for (name, object) in &supers {
      let empty = BTreeSet::new();
      let direct = children.get(*name).unwrap_or(&empty);
      let discrimination = self.discrimination(name, object, direct)?;
      discriminations.insert((*name).to_string(), discrimination);
    }

    Ok(Hierarchy {
      parents,
      children,
      discriminations,
    })
  }

  /// Candidate supertypes per schema: discriminated schemas referenced from
  /// its `allOf`, and discriminated schemas listing it as a union member or
  /// mapping target.
  fn collect_candidates(&self, supers: &BTreeMap<&str, &ObjectShape>) -> ModelResult<BTreeMap<String, BTreeSet<String>>> {
    let mut candidates: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for (name, schema) in &self.graph.schemas {
      let Some(object) = schema.object() else {
        continue;
      };
      for parent in &object.all_of_refs {
        let parent = self.graph.canonical(parent);
        if supers.contains_key(parent) {
          candidates.entry(name.clone()).or_default().insert(parent.to_string());
        }
      }
    }

    for (name, object) in supers {
      let mut members: Vec<String> = object
        .union_members
        .iter()
        .map(|member| self.graph.canonical(member).to_string())
        .collect();
      if let Some(discriminator) = &object.discriminator {
        for target in discriminator.mapping.values() {
          members.push(self.mapping_target(name, target)?);
        }
      }

      for member in members {
        if member == *name {
          continue;
        }
        candidates.entry(member).or_default().insert((*name).to_string());
      }
    }

    Ok(candidates)
  }

  fn discrimination(&self, name: &str, object: &ObjectShape, children: &BTreeSet<String>) -> ModelResult<Discrimination> {
    let Some(discriminator) = &object.discriminator else {
      return Err(ModelError::MissingDiscriminatorProperty {
        schema: name.to_string(),
        subtype: name.to_string(),
        property: String::new(),
      });
    };
    let property = &discriminator.property_name;

    // Union members first, in declaration order, then the remaining subtypes by name.
    let ordered: Vec<&String> = object
      .union_members
      .iter()
      .filter(|member| children.contains(*member))
      .chain(children.iter().filter(|child| !object.union_members.contains(child)))
      .collect();

    let declared = |schema: &str| {
      self
        .graph
        .object(schema)
        .and_then(|object| object.properties.get(property))
    };

    let (declaration, declared_on_super) = match object.properties.get(property) {
      Some(declaration) => (declaration.clone(), true),
      None => {
        let borrowed = ordered.iter().find_map(|child| declared(child));
        let Some(declaration) = borrowed else {
          return Err(ModelError::MissingDiscriminatorProperty {
            schema: name.to_string(),
            subtype: ordered.first().map_or_else(|| name.to_string(), |child| (*child).clone()),
            property: property.clone(),
          });
        };
        (declaration.clone(), false)
      }
    };

    if !declared_on_super
      && let Some(child) = ordered.iter().find(|child| declared(child).is_none())
    {
      return Err(ModelError::MissingDiscriminatorProperty {
        schema: name.to_string(),
        subtype: (*child).clone(),
        property: property.clone(),
      });
    }

    let enum_members = self.graph.enum_of(&declaration.type_ref);
    let enum_type = enum_members.map(|(enum_name, _)| enum_name.to_string());
    let enum_members = enum_members.map(|(_, members)| members.clone());

    let mut mapping = IndexMap::new();
    for (value, target) in &discriminator.mapping {
      mapping.insert(value.clone(), self.mapping_target(name, target)?);
    }

    let mut discrimination = Discrimination {
      descriptor: DiscriminatorDescriptor {
        property: property.clone(),
        enum_type,
        subtype_keys: BTreeMap::new(),
      },
      declaration,
      declared_on_super,
      mapping,
      enum_members,
    };
    discrimination.descriptor.subtype_keys = children
      .iter()
      .map(|child| (child.clone(), discrimination.keys_for(child)))
      .collect();

    Ok(discrimination)
  }

  /// Canonical schema name for a mapping target (`#/components/schemas/S` or bare `S`).
  fn mapping_target(&self, schema: &str, target: &str) -> ModelResult<String> {
    let name = if target.starts_with('#') {
      parse_schema_ref_path(target).ok_or_else(|| ModelError::UnresolvableReference {
        schema: schema.to_string(),
        reference: target.to_string(),
        reason: RefFailure::External,
      })?
    } else {
      target.to_string()
    };

    let canonical = self.graph.canonical(&name);
    if self.graph.get(canonical).is_none() {
      return Err(ModelError::UnresolvableReference {
        schema: schema.to_string(),
        reference: target.to_string(),
        reason: RefFailure::Dangling,
      });
    }
    Ok(canonical.to_string())
  }
}

/// Picks one supertype per schema. A candidate that is itself an ancestor of
/// another candidate (a grandparent listing its grandchild in its mapping) is
/// not a direct parent.
fn select_parents(candidates: &BTreeMap<String, BTreeSet<String>>) -> ModelResult<BTreeMap<String, String>> {
  let mut graph = DiGraphMap::<&str, ()>::new();
  for (schema, supers) in candidates {
    for parent in supers {
      graph.add_edge(schema.as_str(), parent.as_str(), ());
    }
  }

  let mut parents = BTreeMap::new();
  for (schema, supers) in candidates {
    let direct: Vec<&String> = supers
      .iter()
      .filter(|candidate| {
        !supers
          .iter()
          .any(|other| other != *candidate && has_path_connecting(&graph, other.as_str(), candidate.as_str(), None))
      })
      .collect();

    match direct.as_slice() {
      [] => {}
      [parent] => {
        parents.insert(schema.clone(), (*parent).clone());
      }
      _ => {
        return Err(ModelError::AmbiguousSupertype {
          schema: schema.clone(),
          supertypes: direct.into_iter().cloned().collect(),
        });
      }
    }
  }

  Ok(parents)
}

fn detect_cycles(parents: &BTreeMap<String, String>) -> ModelResult<()> {
  let mut graph = DiGraphMap::<&str, ()>::new();
  for (child, parent) in parents {
    graph.add_edge(child.as_str(), parent.as_str(), ());
  }

  let cycle = kosaraju_scc(&graph)
    .into_iter()
    .filter(|component| component.len() > 1 || component.iter().any(|node| graph.contains_edge(node, node)))
    .map(|component| component.into_iter().map(str::to_string).sorted().collect::<Vec<_>>())
    .min();

  match cycle {
    Some(cycle) => Err(ModelError::CyclicInheritance { cycle }),
    None => Ok(()),
  }
}

/// How a subtype's discriminator field is emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DiscriminatorValue {
  /// Exactly one key: the field is defaulted to it.
  Fixed(DiscriminatorKey),
  /// Several keys under the lenient policy: the field stays settable.
  Settable(Vec<DiscriminatorKey>),
}

impl DiscriminatorPolicy {
  /// Applies the zero/one/many rule to a subtype's discriminator keys.
  pub(crate) fn evaluate(
    self,
    schema: &str,
    property: &str,
    keys: Vec<DiscriminatorKey>,
    warnings: &mut Vec<GenerationWarning>,
  ) -> ModelResult<DiscriminatorValue> {
    let values = || keys.iter().map(|key| key.value().to_string()).collect::<Vec<_>>();
    match keys.as_slice() {
      [] => Err(ModelError::SubtypeDiscriminatorWithNoValue {
        schema: schema.to_string(),
        property: property.to_string(),
      }),
      [key] => Ok(DiscriminatorValue::Fixed(key.clone())),
      _ => match self {
        Self::Strict => Err(ModelError::SubtypeDiscriminatorWithMultipleValues {
          schema: schema.to_string(),
          property: property.to_string(),
          values: values(),
        }),
        Self::Lenient => {
          warnings.push(GenerationWarning::DiscriminatorMultipleValues {
            schema_name: schema.to_string(),
            property: property.to_string(),
            values: values().join(", "),
          });
          Ok(DiscriminatorValue::Settable(keys))
        }
      },
    }
  }
}
