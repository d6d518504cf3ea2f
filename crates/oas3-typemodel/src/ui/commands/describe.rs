use comfy_table::{Attribute, Cell, ContentArrangement, Row, Table};
use crossterm::style::Stylize;

use crate::{
  generator::{
    config::ModelConfig,
    model::{DiscriminatorKey, PropertyModifier, SchemaDescriptor},
    orchestrator::Orchestrator,
    validation::ValidationDialect,
  },
  ui::{Colors, DescribeCommand, colors::IntoComfyColor, term_width},
  utils::spec::SpecLoader,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PropertyRow {
  pub key: String,
  pub type_name: String,
  pub kind: &'static str,
  /// `R` required, `N` nullable, `M` mandatory.
  pub flags: String,
  pub modifier: Option<PropertyModifier>,
  pub default: Option<String>,
  pub annotations: Vec<String>,
}

pub(crate) fn property_rows(descriptor: &SchemaDescriptor, dialect: ValidationDialect) -> Vec<PropertyRow> {
  descriptor
    .properties
    .iter()
    .map(|property| {
      let flags = [
        (property.is_required, 'R'),
        (property.is_nullable, 'N'),
        (property.mandatory, 'M'),
      ]
      .into_iter()
      .filter_map(|(set, flag)| set.then_some(flag))
      .collect();

      PropertyRow {
        key: property.oas_key.clone(),
        type_name: property.type_ref.to_string(),
        kind: property.kind.label(),
        flags,
        modifier: (property.modifier != PropertyModifier::None).then_some(property.modifier),
        default: property.default_literal.as_ref().map(ToString::to_string),
        annotations: property
          .annotations
          .iter()
          .map(|annotation| annotation.render(dialect))
          .collect(),
      }
    })
    .collect()
}

fn discriminator_summary(descriptor: &SchemaDescriptor) -> Option<String> {
  let discriminator = descriptor.discriminator()?;
  let subtypes = discriminator
    .subtype_keys
    .iter()
    .map(|(subtype, keys)| {
      let values: Vec<&str> = keys.iter().map(DiscriminatorKey::value).collect();
      format!("{}={subtype}", values.join("|"))
    })
    .collect::<Vec<_>>()
    .join(", ");
  Some(format!("{} [{subtypes}]", discriminator.property))
}

pub async fn describe_schema(command: DescribeCommand, colors: &Colors) -> anyhow::Result<()> {
  let config = ModelConfig::from(&command.options);
  let document = SpecLoader::open(&command.input).await?.parse()?;
  let generated = Orchestrator::new(document, config).build()?;

  let Some(descriptor) = generated.model.get(&command.schema) else {
    anyhow::bail!("Schema '{}' is not part of the type model", command.schema);
  };

  println!(
    "{} {}",
    descriptor.name.as_str().with(colors.value()).bold(),
    format!("({})", descriptor.kind.label()).with(colors.accent())
  );
  if let Some(supertype) = &descriptor.supertype {
    println!("  {} {}", "extends".with(colors.label()), supertype.as_str().with(colors.info()));
  }
  if let Some(summary) = discriminator_summary(descriptor) {
    println!("  {} {}", "discriminator".with(colors.label()), summary.with(colors.info()));
  }
  if descriptor.properties.is_empty() {
    return Ok(());
  }

  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut row = Row::new();
  for header in ["PROPERTY", "TYPE", "KIND", "FLAGS", "MODIFIER", "DEFAULT", "ANNOTATIONS"] {
    row.add_cell(Cell::new(header).fg(IntoComfyColor::into(colors.label())));
  }
  table.set_header(row);

  for property in property_rows(descriptor, config.validation_dialect) {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(property.key)
        .fg(IntoComfyColor::into(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(Cell::new(property.type_name).fg(IntoComfyColor::into(colors.primary())));
    row.add_cell(Cell::new(property.kind).fg(IntoComfyColor::into(colors.accent())));
    row.add_cell(Cell::new(property.flags).fg(IntoComfyColor::into(colors.info())));
    row.add_cell(Cell::new(property.modifier.map(|modifier| modifier.to_string()).unwrap_or_default()));
    row.add_cell(match property.default {
      Some(default) => Cell::new(default).fg(IntoComfyColor::into(colors.success())),
      None => Cell::new("-").fg(IntoComfyColor::into(colors.muted())),
    });
    row.add_cell(Cell::new(property.annotations.join("\n")).fg(IntoComfyColor::into(colors.info())));
    table.add_row(row);
  }

  println!("{table}");

  Ok(())
}
