// file: src/models/rewritten_query.rs
// description: structured reply produced by the query rewriter
// reference: https://docs.rs/schemars

use crate::error::{PipelineError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name the schema is registered under in the structured output request.
pub const SCHEMA_NAME: &str = "QueryFormat";

/// Image search phrase returned by the language model.
///
/// The prompt asks for 3-7 words; the length is not checked here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RewrittenQuery {
    pub query: String,
}

impl RewrittenQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    /// JSON schema in the shape strict structured output accepts: no
    /// `$schema` or `title` keys, `additionalProperties` set to false.
    pub fn json_schema() -> Result<Value> {
        let schema = schemars::schema_for!(RewrittenQuery);
        let mut value = serde_json::to_value(&schema)
            .map_err(|e| PipelineError::Serialization(e.to_string()))?;

        if let Some(object) = value.as_object_mut() {
            object.remove("$schema");
            object.remove("title");
            object.insert("additionalProperties".to_string(), Value::Bool(false));
        }

        Ok(value)
    }

    /// Decodes the model's `output_text` payload.
    pub fn from_model_output(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| {
            PipelineError::LanguageModel(format!(
                "Structured reply did not match {}: {}",
                SCHEMA_NAME, e
            ))
        })
    }
}
