mod classifier;
mod coercion;
mod config;
mod literals;
mod support;
mod validation;
