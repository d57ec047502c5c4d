// file: src/rewriter/openai.rs
// description: OpenAI Responses API integration with structured output
// reference: https://platform.openai.com/docs/guides/structured-outputs

use super::QueryRewriter;
use super::prompt::{SYSTEM_PROMPT, user_message};
use crate::config::LlmConfig;
use crate::error::{PipelineError, Result};
use crate::models::RewrittenQuery;
use crate::models::rewritten_query::SCHEMA_NAME;
use crate::utils::Validator;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

const RESPONSES_PATH: &str = "/responses";
const ERROR_BODY_PREVIEW: usize = 300;

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: Vec<InputMessage<'a>>,
    text: TextOptions,
}

#[derive(Debug, Serialize)]
struct InputMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Serialize)]
struct TextOptions {
    format: TextFormat,
}

#[derive(Debug, Serialize)]
struct TextFormat {
    #[serde(rename = "type")]
    kind: &'static str,
    name: &'static str,
    strict: bool,
    schema: Value,
}

#[derive(Debug, Deserialize)]
struct ResponsesResponse {
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    content: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    OutputText { text: String },
    Refusal { refusal: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Rewrites queries through `POST /responses`, one request per call and no retries.
pub struct OpenAiQueryRewriter {
    client: Client,
    api_key: String,
    model: String,
    url: String,
}

impl OpenAiQueryRewriter {
    pub fn new(api_key: String, config: &LlmConfig) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model: config.model.clone(),
            url: format!("{}{}", config.endpoint.trim_end_matches('/'), RESPONSES_PATH),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(&self, query: &str) -> Result<ResponsesRequest<'_>> {
        Ok(ResponsesRequest {
            model: &self.model,
            input: vec![
                InputMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                InputMessage {
                    role: "user",
                    content: user_message(query),
                },
            ],
            text: TextOptions {
                format: TextFormat {
                    kind: "json_schema",
                    name: SCHEMA_NAME,
                    strict: true,
                    schema: RewrittenQuery::json_schema()?,
                },
            },
        })
    }

    /// Pulls the structured reply out of a Responses API body.
    fn extract_query(body: ResponsesResponse) -> Result<RewrittenQuery> {
        for item in body.output.into_iter().filter(|item| item.kind == "message") {
            for part in item.content {
                match part {
                    ContentPart::OutputText { text } => {
                        return RewrittenQuery::from_model_output(&text);
                    }
                    ContentPart::Refusal { refusal } => {
                        return Err(PipelineError::LanguageModel(format!(
                            "Model refused to rewrite the query: {}",
                            refusal
                        )));
                    }
                    ContentPart::Other => {}
                }
            }
        }

        Err(PipelineError::LanguageModel(
            "No output text returned from OpenAI".to_string(),
        ))
    }
}

#[async_trait]
impl QueryRewriter for OpenAiQueryRewriter {
    async fn rewrite(&self, query: &str) -> Result<RewrittenQuery> {
        Validator::validate_query(query, "User query")?;

        let request = self.build_request(query)?;

        debug!("Requesting query rewrite from {} ({})", self.url, self.model);

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                PipelineError::LanguageModel(format!("Failed to send OpenAI request: {}", e))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            PipelineError::LanguageModel(format!("Failed to read OpenAI response: {}", e))
        })?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or_else(|_| Validator::truncate_text(&body, ERROR_BODY_PREVIEW));
            return Err(PipelineError::LanguageModel(format!(
                "OpenAI request failed with status {}: {}",
                status, message
            )));
        }

        let parsed: ResponsesResponse = serde_json::from_str(&body).map_err(|e| {
            PipelineError::LanguageModel(format!("Failed to parse OpenAI response: {}", e))
        })?;

        let rewritten = Self::extract_query(parsed)?;
        debug!("Rewritten query: {}", rewritten.query);
        Ok(rewritten)
    }
}
