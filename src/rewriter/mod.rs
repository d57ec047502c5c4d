// file: src/rewriter/mod.rs
// description: query rewriter seam and its OpenAI implementation
// reference: internal module structure

pub mod openai;
pub mod prompt;

use crate::error::Result;
use crate::models::RewrittenQuery;
use async_trait::async_trait;

pub use openai::OpenAiQueryRewriter;

/// Turns a free-text request into a short, visually descriptive search phrase.
#[async_trait]
pub trait QueryRewriter: Send + Sync {
    async fn rewrite(&self, query: &str) -> Result<RewrittenQuery>;
}
