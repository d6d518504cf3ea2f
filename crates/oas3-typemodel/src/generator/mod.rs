pub mod builder;
pub(crate) mod classifier;
pub(crate) mod coercion;
pub mod config;
pub(crate) mod discriminator;
pub mod errors;
pub mod metrics;
pub mod model;
pub(crate) mod naming;
pub mod orchestrator;
pub(crate) mod resolver;
pub mod validation;

#[cfg(test)]
mod tests;
