// file: src/models/image_results.rs
// description: ordered image URLs picked from a search response

use serde::{Deserialize, Serialize};

/// Image URLs in relevance order. An entry is `None` when the source
/// record carried no `original` field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageResults {
    pub urls: Vec<Option<String>>,
}

impl ImageResults {
    pub fn new(urls: Vec<Option<String>>) -> Self {
        Self { urls }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn as_slice(&self) -> &[Option<String>] {
        &self.urls
    }
}
