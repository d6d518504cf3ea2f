pub mod refs;
pub mod schema_ext;
pub mod spec;

pub(crate) use refs::{component_pointer, escape_pointer_segment, parse_schema_ref_path};
pub(crate) use schema_ext::{Category, SchemaExt};

#[cfg(test)]
mod tests;
