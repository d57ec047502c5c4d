// file: src/exporter/mod.rs
// description: result writers
// reference: internal module structure

pub mod json;

pub use json::JsonExporter;
