pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Parses a schema `$ref` path and extracts the referenced component name.
///
/// Only internal references of the form `#/components/schemas/<name>` are
/// understood. JSON pointer escapes (`~1` for `/`, `~0` for `~`) in the name
/// segment are decoded. Returns `None` for external documents, other component
/// kinds and pointers that descend below the component itself.
pub fn parse_schema_ref_path(ref_path: &str) -> Option<String> {
  let segment = ref_path.strip_prefix(SCHEMA_REF_PREFIX)?;
  if segment.is_empty() || segment.contains('/') {
    return None;
  }
  Some(unescape_pointer_segment(segment))
}

pub fn component_pointer(name: &str) -> String {
  format!("{SCHEMA_REF_PREFIX}{}", escape_pointer_segment(name))
}

pub fn escape_pointer_segment(segment: &str) -> String {
  segment.replace('~', "~0").replace('/', "~1")
}

pub fn unescape_pointer_segment(segment: &str) -> String {
  segment.replace("~1", "/").replace("~0", "~")
}
