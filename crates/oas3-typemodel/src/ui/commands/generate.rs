use std::path::PathBuf;

use chrono::{Local, Timelike};
use crossterm::style::Stylize;

use crate::{
  document::OpenApiDocument,
  generator::{config::ModelConfig, metrics::GenerationStats, orchestrator::Orchestrator},
  ui::{Colors, GenerateCommand},
  utils::spec::SpecLoader,
};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
pub struct GenerateConfig {
  pub input: PathBuf,
  pub output: PathBuf,
  pub model: ModelConfig,
  pub verbose: bool,
  pub quiet: bool,
}

impl GenerateConfig {
  pub fn from_command(command: GenerateCommand) -> anyhow::Result<Self> {
    let GenerateCommand {
      input,
      output,
      options,
      verbose,
      quiet,
    } = command;

    if verbose && quiet {
      anyhow::bail!("--verbose and --quiet cannot be used together");
    }
    if input == output {
      anyhow::bail!("Output path must differ from the input specification");
    }

    Ok(Self {
      input,
      output,
      model: ModelConfig::from(&options),
      verbose,
      quiet,
    })
  }

  async fn load_spec(&self) -> anyhow::Result<OpenApiDocument> {
    SpecLoader::open(&self.input).await?.parse()
  }

  async fn write_output(&self, json: String) -> anyhow::Result<()> {
    if let Some(parent) = self.output.parent()
      && !parent.as_os_str().is_empty()
    {
      tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&self.output, json).await?;
    Ok(())
  }
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      println!("{} {message}", format_timestamp().with(self.colors.timestamp()));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      println!(
        "            {:<25} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      );
    }
  }

  fn log_loading(&self) {
    self.info(
      &format!("Loading OpenAPI spec from: {}", self.config.input.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_building(&self, orchestrator: &Orchestrator) {
    let metadata = orchestrator.metadata();
    self.info(
      &format!("Building type model for {} {}...", metadata.title, metadata.version)
        .with(self.colors.primary())
        .to_string(),
    );
    if self.config.verbose {
      let model = &self.config.model;
      self.stat("Merge patch:", model.merge_patch.to_string());
      self.stat("Validation dialect:", model.validation_dialect.to_string());
      self.stat("Discriminator policy:", model.discriminator_policy.to_string());
    }
  }

  fn print_statistics(&self, stats: &GenerationStats) {
    if self.config.quiet {
      return;
    }

    self.stat("Schemas resolved:", stats.schemas_resolved.to_string());
    self.stat(
      "",
      format!(
        "{} objects ({} polymorphic supers, {} subtypes)",
        stats.objects, stats.polymorphic_supers, stats.polymorphic_subs
      ),
    );
    self.stat("", format!("{} enums", stats.enums));
    self.stat(
      "",
      format!(
        "{} primitives, {} arrays, {} maps",
        stats.primitives, stats.arrays, stats.maps
      ),
    );
    if stats.inline_schemas > 0 {
      self.stat("Inline schemas:", stats.inline_schemas.to_string());
    }
    if stats.aliases > 0 {
      self.stat("Aliases:", stats.aliases.to_string());
    }
    self.stat("Properties:", stats.properties.to_string());
    if !stats.warnings.is_empty() {
      self.stat("Warnings:", stats.warnings.len().to_string());
    }

    self.print_warnings(stats);
  }

  fn print_warnings(&self, stats: &GenerationStats) {
    if stats.warnings.is_empty() || self.config.quiet {
      return;
    }

    let mut printed_header = false;
    for warning in &stats.warnings {
      if !warning.is_lossy() && !self.config.verbose {
        continue;
      }

      if !printed_header {
        println!();
        printed_header = true;
      }

      let label = if warning.is_lossy() { "Lossy:" } else { "Warning:" };
      eprintln!(
        "{} {}",
        label.with(self.colors.accent()),
        warning.to_string().with(self.colors.primary())
      );
    }
  }

  fn log_writing(&self) {
    self.info(
      &format!("Writing to: {}", self.config.output.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_success(&self) {
    if !self.config.quiet {
      println!();
      println!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        "Successfully built type model".with(self.colors.success())
      );
    }
  }
}

/// Loads the specification, builds the model and writes it as JSON.
///
/// The output file is only touched once the whole model has been built.
pub async fn generate_model(config: GenerateConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = GenerateLogger::new(&config, colors);

  logger.log_loading();
  let document = config.load_spec().await?;

  let orchestrator = Orchestrator::new(document, config.model);
  logger.log_building(&orchestrator);
  let source_path = config.input.display().to_string();
  let (json, stats) = orchestrator.build_json(&source_path)?;
  logger.print_statistics(&stats);

  logger.log_writing();
  config.write_output(json).await?;

  logger.log_success();
  Ok(())
}
