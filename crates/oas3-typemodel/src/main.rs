#![allow(clippy::missing_errors_doc)]
use clap::Parser;
use oas3_typemodel::ui::{self, Cli, Colors, Commands, ListCommands, colors};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();
  let colors = Colors::new(colors::colors_enabled(cli.color), colors::detect_theme(cli.theme));

  match cli.command {
    Commands::List { list_command } => match list_command {
      ListCommands::Schemas { input } => ui::commands::list_schemas(&input, &colors).await?,
    },
    Commands::Generate(command) => {
      let config = ui::commands::GenerateConfig::from_command(command)?;
      ui::commands::generate_model(config, &colors).await?;
    }
    Commands::Describe(command) => ui::commands::describe_schema(command, &colors).await?,
  }

  Ok(())
}
