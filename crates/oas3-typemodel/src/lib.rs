//! Compiles the component schemas of an OpenAPI 3 document into a typed,
//! immutable model for JVM code emitters.
//!
//! Loading lives in [`utils::spec`], the passes in [`generator`], and the
//! entry point most callers want is [`generator::orchestrator::Orchestrator`].
//! The command-line front end in [`ui`] is a thin layer over the same API.

pub mod document;
pub mod generator;
pub mod ui;
pub mod utils;
