//! Orchestration for the OpenAPI to type model pipeline.
//!
//! The `Orchestrator` owns a loaded document and its build options and hides
//! the individual passes behind a small API for the CLI and library users.
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//!
//! use oas3_typemodel::{
//!   generator::{config::ModelConfig, orchestrator::Orchestrator},
//!   utils::spec::SpecLoader,
//! };
//!
//! # async fn example() -> anyhow::Result<()> {
//! let document = SpecLoader::open(Path::new("openapi.yaml")).await?.parse()?;
//! let orchestrator = Orchestrator::new(document, ModelConfig::default());
//! let generated = orchestrator.build()?;
//!
//! println!("{} schemas, {} warnings", generated.model.len(), generated.stats.warnings.len());
//! # Ok(())
//! # }
//! ```

use anyhow::Context;
use serde::Serialize;

use crate::{
  document::{DocumentInfo, OpenApiDocument},
  generator::{
    builder::TypeModelBuilder,
    config::ModelConfig,
    errors::ModelError,
    metrics::GenerationStats,
    model::TypeModel,
  },
};

pub struct Orchestrator {
  document: OpenApiDocument,
  config: ModelConfig,
}

/// Metadata about the OpenAPI document, used in output headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelMetadata {
  pub title: String,
  pub version: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
}

impl From<&DocumentInfo> for ModelMetadata {
  fn from(info: &DocumentInfo) -> Self {
    Self {
      title: info.title.clone(),
      version: info.version.clone(),
      description: info.description.clone(),
    }
  }
}

/// A built model together with the statistics of the run that produced it.
#[derive(Debug, Clone)]
pub struct GeneratedModel {
  pub model: TypeModel,
  pub stats: GenerationStats,
}

#[derive(Serialize)]
struct ModelFile<'a> {
  source: &'a str,
  info: ModelMetadata,
  config: &'a ModelConfig,
  model: &'a TypeModel,
}

impl Orchestrator {
  #[must_use]
  pub fn new(document: OpenApiDocument, config: ModelConfig) -> Self {
    Self { document, config }
  }

  #[must_use]
  pub fn document(&self) -> &OpenApiDocument {
    &self.document
  }

  #[must_use]
  pub fn config(&self) -> ModelConfig {
    self.config
  }

  #[must_use]
  pub fn metadata(&self) -> ModelMetadata {
    ModelMetadata::from(&self.document.info)
  }

  /// Runs every pass over the document.
  ///
  /// # Errors
  ///
  /// Returns the first [`ModelError`] raised; nothing is produced in that case.
  pub fn build(&self) -> Result<GeneratedModel, ModelError> {
    let (model, stats) = TypeModelBuilder::new(&self.document, self.config).build()?;
    Ok(GeneratedModel { model, stats })
  }

  /// Builds the model and renders it as pretty JSON with a header naming the
  /// source document and the options used.
  ///
  /// # Errors
  ///
  /// Returns an error if the model cannot be built or serialized.
  pub fn build_json(&self, source_path: &str) -> anyhow::Result<(String, GenerationStats)> {
    let generated = self.build()?;
    let file = ModelFile {
      source: source_path,
      info: self.metadata(),
      config: &self.config,
      model: &generated.model,
    };
    let json = serde_json::to_string_pretty(&file).context("failed to serialize type model")?;
    Ok((json, generated.stats))
  }
}
