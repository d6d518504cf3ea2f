use std::path::Path;

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};

use crate::{
  generator::{config::ModelConfig, model::TypeModel, orchestrator::Orchestrator},
  ui::{Colors, colors::IntoComfyColor, term_width},
  utils::spec::SpecLoader,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SchemaRow {
  pub name: String,
  pub kind: &'static str,
  pub properties: usize,
  pub supertype: Option<String>,
  pub subtypes: Vec<String>,
}

pub(crate) fn schema_rows(model: &TypeModel) -> Vec<SchemaRow> {
  model
    .iter()
    .map(|descriptor| SchemaRow {
      name: descriptor.name.clone(),
      kind: descriptor.kind.label(),
      properties: descriptor.properties.len(),
      supertype: descriptor.supertype.clone(),
      subtypes: descriptor.subtypes.iter().cloned().collect(),
    })
    .collect()
}

pub async fn list_schemas(input: &Path, colors: &Colors) -> anyhow::Result<()> {
  let document = SpecLoader::open(input).await?.parse()?;
  let generated = Orchestrator::new(document, ModelConfig::default()).build()?;

  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut row = Row::new();
  for header in ["SCHEMA", "KIND", "PROPS", "SUPERTYPE", "SUBTYPES"] {
    row.add_cell(Cell::new(header).fg(IntoComfyColor::into(colors.label())));
  }
  table.set_header(row);

  for schema in schema_rows(&generated.model) {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(schema.name)
        .fg(IntoComfyColor::into(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(Cell::new(schema.kind).fg(IntoComfyColor::into(colors.accent())));
    row.add_cell(
      Cell::new(schema.properties)
        .fg(IntoComfyColor::into(colors.primary()))
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(match schema.supertype {
      Some(supertype) => Cell::new(supertype).fg(IntoComfyColor::into(colors.info())),
      None => Cell::new("-").fg(IntoComfyColor::into(colors.muted())),
    });
    row.add_cell(Cell::new(schema.subtypes.join(", ")).fg(IntoComfyColor::into(colors.info())));
    table.add_row(row);
  }

  println!("{table}");

  Ok(())
}
