// file: src/search/mod.rs
// description: image finder seam and its SerpApi implementation
// reference: internal module structure

pub mod serpapi;

use crate::error::Result;
use crate::models::ImageResults;
use async_trait::async_trait;

pub use serpapi::{SearchParams, SerpApiImageFinder};

/// Submits a search phrase and returns candidate image URLs in relevance order.
#[async_trait]
pub trait ImageFinder: Send + Sync {
    async fn find_images(&self, query: &str) -> Result<ImageResults>;
}
