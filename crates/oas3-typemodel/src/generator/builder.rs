use std::{collections::BTreeMap, sync::Arc};

use crate::{
  document::OpenApiDocument,
  generator::{
    classifier::PropertyClassifier,
    config::ModelConfig,
    discriminator::{DiscriminatorAnalyzer, Hierarchy},
    errors::ModelResult,
    metrics::{GenerationStats, GenerationWarning},
    model::{SchemaDescriptor, SchemaKind, TypeModel},
    resolver::{ResolvedSchema, SchemaResolver, Shape},
  },
};

/// Builds the immutable [`TypeModel`] for every schema of a document.
///
/// The pipeline runs in four passes over one in-memory document: resolution
/// (references, `allOf` flattening, inline naming), discriminator analysis,
/// property classification, and descriptor assembly. The first error aborts
/// the build; no partial model is returned.
pub struct TypeModelBuilder<'a> {
  document: &'a OpenApiDocument,
  config: ModelConfig,
}

impl<'a> TypeModelBuilder<'a> {
  #[must_use]
  pub fn new(document: &'a OpenApiDocument, config: ModelConfig) -> Self {
    Self { document, config }
  }

  /// Builds the model, visiting components in document order.
  ///
  /// # Errors
  ///
  /// Returns the first [`ModelError`](crate::generator::errors::ModelError)
  /// raised by any pass.
  pub fn build(&self) -> ModelResult<(TypeModel, GenerationStats)> {
    self.build_in_order(self.document.schema_names())
  }

  /// Builds the model visiting components in the given order. The result does
  /// not depend on the order.
  pub(crate) fn build_in_order<I, S>(&self, order: I) -> ModelResult<(TypeModel, GenerationStats)>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let graph = SchemaResolver::new(self.document).resolve(order)?;
    let hierarchy = DiscriminatorAnalyzer::new(&graph).analyze()?;
    let classifier = PropertyClassifier::new(&graph, &hierarchy, self.config);

    let mut warnings = graph.warnings.clone();
    let mut stats = GenerationStats::default();
    let mut schemas = BTreeMap::new();

    for (name, schema) in &graph.schemas {
      let descriptor = Self::descriptor(schema, &hierarchy, &classifier, &mut warnings)?;
      stats.record_descriptor(&descriptor);
      schemas.insert(name.clone(), Arc::new(descriptor));
    }

    stats.record_aliases(graph.aliases.len());
    stats.record_warnings(warnings);

    Ok((TypeModel::new(schemas, graph.aliases.clone()), stats))
  }

  fn descriptor(
    schema: &ResolvedSchema,
    hierarchy: &Hierarchy,
    classifier: &PropertyClassifier<'_>,
    warnings: &mut Vec<GenerationWarning>,
  ) -> ModelResult<SchemaDescriptor> {
    let name = schema.name.as_str();
    let kind = match &schema.shape {
      Shape::Primitive(primitive) => SchemaKind::Primitive { primitive: *primitive },
      Shape::Enum(descriptor) => SchemaKind::Enum(descriptor.clone()),
      Shape::Array(items) => SchemaKind::ArrayOf { items: items.clone() },
      Shape::Map(values) => SchemaKind::MapOf { values: values.clone() },
      Shape::Object(_) => match hierarchy.discrimination(name) {
        Some(discrimination) => SchemaKind::ObjectPolymorphicSuper(discrimination.descriptor.clone()),
        None if hierarchy.parent(name).is_some() => SchemaKind::ObjectPolymorphicSub,
        None => SchemaKind::ObjectSingle,
      },
    };

    Ok(SchemaDescriptor {
      name: name.to_string(),
      pointer: schema.pointer.clone(),
      kind,
      properties: classifier.classify(name, warnings)?,
      supertype: hierarchy.parent(name).map(str::to_string),
      subtypes: hierarchy.children(name),
      description: schema.description.clone(),
      inline: schema.inline,
    })
  }
}
