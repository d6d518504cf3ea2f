use std::{ffi::OsStr, path::Path};

use anyhow::Context;
use fmmap::tokio::{AsyncMmapFile, AsyncMmapFileExt};
use serde_json::Value;

use crate::document::{DocumentInfo, OpenApiDocument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecFormat {
  #[default]
  Json,
  Yaml,
}

impl SpecFormat {
  #[must_use]
  pub fn from_extension(ext: &str) -> Self {
    match ext {
      "yaml" | "yml" => Self::Yaml,
      _ => Self::Json,
    }
  }

  #[must_use]
  pub fn from_path(path: &Path) -> Self {
    path
      .extension()
      .and_then(OsStr::to_str)
      .map_or(Self::default(), Self::from_extension)
  }
}

pub struct SpecLoader {
  file: AsyncMmapFile,
  format: SpecFormat,
}

impl SpecLoader {
  pub async fn open(path: &Path) -> anyhow::Result<Self> {
    let format = SpecFormat::from_path(path);
    let file = AsyncMmapFile::open(path)
      .await
      .with_context(|| format!("failed to open {}", path.display()))?;

    Ok(Self { file, format })
  }

  pub fn parse(&self) -> anyhow::Result<OpenApiDocument> {
    parse_document(self.file.as_slice(), self.format)
  }
}

/// Parses raw JSON or YAML bytes into an [`OpenApiDocument`].
///
/// The document header is checked through the `oas3` crate; the schema graph
/// is then read with `serde_path_to_error` so that failures name the offending
/// location (e.g. `components.schemas.Pet.properties.age.minimum`).
pub fn parse_document(bytes: &[u8], format: SpecFormat) -> anyhow::Result<OpenApiDocument> {
  let value: Value = match format {
    SpecFormat::Json => serde_json::from_slice(bytes).context("document is not valid JSON")?,
    SpecFormat::Yaml => {
      // YAML allows non-string keys (`200:`); serializing through serde_json turns them into strings.
      let yaml: serde_yaml::Value = serde_yaml::from_slice(bytes).context("document is not valid YAML")?;
      serde_json::to_value(yaml).context("YAML document cannot be represented as JSON")?
    }
  };
  document_from_value(value)
}

pub fn document_from_value(value: Value) -> anyhow::Result<OpenApiDocument> {
  let version = value.get("openapi").and_then(Value::as_str).unwrap_or_default();
  if !version.starts_with("3.") {
    anyhow::bail!("unsupported OpenAPI version '{version}': expected 3.x");
  }

  let info = value
    .get("info")
    .cloned()
    .context("document has no 'info' object")
    .and_then(|info| serde_json::from_value::<oas3::spec::Info>(info).context("invalid 'info' object"))?;

  let mut document: OpenApiDocument = serde_path_to_error::deserialize(value)
    .map_err(|err| anyhow::anyhow!("invalid schema at {}: {}", err.path(), err.inner()))?;
  document.info = DocumentInfo::from(info);

  Ok(document)
}
