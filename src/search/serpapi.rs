// file: src/search/serpapi.rs
// description: SerpApi google_images integration
// reference: https://serpapi.com/google-images-api

use super::ImageFinder;
use crate::config::SearchConfig;
use crate::error::{PipelineError, Result};
use crate::models::ImageResults;
use crate::utils::Validator;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

const SEARCH_PATH: &str = "/search";
const ERROR_BODY_PREVIEW: usize = 300;

/// Fixed request parameters sent alongside every query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub engine: String,
    pub google_domain: String,
    pub hl: String,
    pub gl: String,
    pub ijn: String,
    pub imgsz: String,
}

impl SearchParams {
    pub fn from_config(config: &SearchConfig) -> Self {
        Self {
            engine: config.engine.clone(),
            google_domain: config.google_domain.clone(),
            hl: config.hl.clone(),
            gl: config.gl.clone(),
            ijn: config.ijn.clone(),
            imgsz: config.imgsz.clone(),
        }
    }

    fn to_query_pairs<'a>(&'a self, query: &'a str, api_key: &'a str) -> Vec<(&'static str, &'a str)> {
        vec![
            ("engine", self.engine.as_str()),
            ("google_domain", self.google_domain.as_str()),
            ("q", query),
            ("hl", self.hl.as_str()),
            ("gl", self.gl.as_str()),
            ("ijn", self.ijn.as_str()),
            ("imgsz", self.imgsz.as_str()),
            ("output", "json"),
            ("api_key", api_key),
        ]
    }
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    images_results: Option<Vec<ImageRecord>>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ImageRecord {
    #[serde(default)]
    original: Option<String>,
}

pub struct SerpApiImageFinder {
    client: Client,
    api_key: String,
    url: String,
    params: SearchParams,
    max_results: usize,
}

impl SerpApiImageFinder {
    pub fn new(api_key: String, config: &SearchConfig) -> Self {
        Self {
            client: Client::new(),
            api_key,
            url: format!("{}{}", config.endpoint.trim_end_matches('/'), SEARCH_PATH),
            params: SearchParams::from_config(config),
            max_results: config.max_results,
        }
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// Keeps the `original` URL of the first `limit` records. A missing
    /// `images_results` collection yields an empty list.
    fn collect_urls(response: SearchResponse, limit: usize) -> ImageResults {
        let Some(records) = response.images_results else {
            match response.error {
                Some(message) => warn!("Search returned no images: {}", message),
                None => debug!("Search response has no images_results"),
            }
            return ImageResults::empty();
        };

        ImageResults::new(
            records
                .into_iter()
                .take(limit)
                .map(|record| record.original)
                .collect(),
        )
    }
}

#[async_trait]
impl ImageFinder for SerpApiImageFinder {
    async fn find_images(&self, query: &str) -> Result<ImageResults> {
        info!("Searching for: {}", query);

        Validator::validate_query(query, "Query")?;

        let response = self
            .client
            .get(&self.url)
            .query(&self.params.to_query_pairs(query, &self.api_key))
            .send()
            .await
            .map_err(|e| {
                PipelineError::ImageSearch(format!("Failed to send SerpApi request: {}", e))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            PipelineError::ImageSearch(format!("Failed to read SerpApi response: {}", e))
        })?;

        if !status.is_success() {
            let message = serde_json::from_str::<SearchResponse>(&body)
                .ok()
                .and_then(|r| r.error)
                .unwrap_or_else(|| Validator::truncate_text(&body, ERROR_BODY_PREVIEW));
            return Err(PipelineError::ImageSearch(format!(
                "SerpApi request failed with status {}: {}",
                status, message
            )));
        }

        let parsed: SearchResponse = serde_json::from_str(&body).map_err(|e| {
            PipelineError::ImageSearch(format!("Failed to parse SerpApi response: {}", e))
        })?;

        let results = Self::collect_urls(parsed, self.max_results);
        debug!("Search returned {} image(s)", results.len());
        Ok(results)
    }
}
