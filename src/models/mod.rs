// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod image_results;
pub mod rewritten_query;
pub mod user_query;

pub use image_results::ImageResults;
pub use rewritten_query::RewrittenQuery;
pub use user_query::UserQuery;
