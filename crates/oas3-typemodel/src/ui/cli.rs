use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::{ColorMode, Colors, ThemeMode};
use crate::generator::{
  config::{DiscriminatorPolicy, ModelConfig},
  validation::ValidationDialect,
};

#[derive(Parser, Debug)]
#[command(name = "oas3-typemodel")]
#[command(author, version, about = "OpenAPI schema to JVM type model compiler")]
#[command(styles = Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// List information from an OpenAPI specification
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Build the type model and write it as JSON
  Generate(GenerateCommand),
  /// Show the classified properties of one schema
  Describe(DescribeCommand),
}

/// Options that change how properties are classified.
#[derive(Args, Debug, Clone, Default)]
pub struct ModelOptions {
  /// Classify for JSON merge-patch request bodies (tri-state optionals)
  #[arg(long, default_value_t = false)]
  pub merge_patch: bool,

  /// Package family of the rendered validation annotations
  #[arg(long, value_enum, value_name = "DIALECT", default_value = "javax")]
  pub validation_dialect: ValidationDialect,

  /// Fail when a subtype maps to several discriminator values instead of warning
  #[arg(long, default_value_t = false)]
  pub strict_discriminators: bool,
}

impl From<&ModelOptions> for ModelConfig {
  fn from(options: &ModelOptions) -> Self {
    let policy = if options.strict_discriminators {
      DiscriminatorPolicy::Strict
    } else {
      DiscriminatorPolicy::Lenient
    };
    ModelConfig::builder()
      .merge_patch(options.merge_patch)
      .validation_dialect(options.validation_dialect)
      .discriminator_policy(policy)
      .build()
  }
}

#[derive(Args, Debug, Clone)]
pub struct GenerateCommand {
  /// Path to the OpenAPI JSON or YAML specification file
  #[arg(short, long, value_name = "FILE")]
  pub input: PathBuf,

  /// Path where the type model JSON will be written
  #[arg(short, long, value_name = "FILE")]
  pub output: PathBuf,

  #[command(flatten)]
  pub options: ModelOptions,

  /// Enable verbose output with detailed progress information
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false)]
  pub quiet: bool,
}

#[derive(Args, Debug, Clone)]
pub struct DescribeCommand {
  /// Path to the OpenAPI JSON or YAML specification file
  #[arg(short, long, value_name = "FILE")]
  pub input: PathBuf,

  /// Component or synthesized inline schema name
  #[arg(short, long, value_name = "NAME")]
  pub schema: String,

  #[command(flatten)]
  pub options: ModelOptions,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List every schema of the type model
  Schemas {
    /// Path to the OpenAPI JSON or YAML specification file
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,
  },
}

#[cfg(test)]
mod tests {
  use super::*;

  fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("oas3-typemodel").chain(args.iter().copied())).unwrap()
  }

  #[test]
  fn test_generate_defaults() {
    let cli = parse(&["generate", "-i", "api.yaml", "-o", "model.json"]);
    let Commands::Generate(command) = cli.command else {
      panic!("expected the generate command");
    };

    assert_eq!(command.input, PathBuf::from("api.yaml"));
    assert_eq!(command.output, PathBuf::from("model.json"));
    assert!(!command.verbose);
    assert!(!command.quiet);
    assert_eq!(ModelConfig::from(&command.options), ModelConfig::default());
    assert_eq!(cli.color, ColorMode::Auto);
  }

  #[test]
  fn test_generate_model_options() {
    let cli = parse(&[
      "generate",
      "--input",
      "api.yaml",
      "--output",
      "model.json",
      "--merge-patch",
      "--validation-dialect",
      "jakarta",
      "--strict-discriminators",
      "--color",
      "never",
    ]);
    let Commands::Generate(command) = cli.command else {
      panic!("expected the generate command");
    };

    let config = ModelConfig::from(&command.options);
    assert!(config.merge_patch);
    assert_eq!(config.validation_dialect, ValidationDialect::Jakarta);
    assert_eq!(config.discriminator_policy, DiscriminatorPolicy::Strict);
    assert_eq!(cli.color, ColorMode::Never);
  }

  #[test]
  fn test_describe_and_list() {
    let cli = parse(&["describe", "-i", "api.json", "-s", "Pet", "--theme", "light"]);
    let Commands::Describe(command) = cli.command else {
      panic!("expected the describe command");
    };
    assert_eq!(command.schema, "Pet");
    assert_eq!(cli.theme, ThemeMode::Light);

    let cli = parse(&["list", "schemas", "-i", "api.json"]);
    assert!(matches!(
      cli.command,
      Commands::List {
        list_command: ListCommands::Schemas { .. }
      }
    ));
  }

  #[test]
  fn test_rejects_unknown_dialect() {
    let result = Cli::try_parse_from([
      "oas3-typemodel",
      "generate",
      "-i",
      "api.yaml",
      "-o",
      "model.json",
      "--validation-dialect",
      "jsr303",
    ]);
    assert!(result.is_err());
  }
}
