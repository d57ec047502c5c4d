// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod exporter;
pub mod models;
pub mod pipeline;
pub mod rewriter;
pub mod search;
pub mod utils;

pub use config::{Config, Credentials, LlmConfig, OutputConfig, SearchConfig};
pub use error::{PipelineError, Result};
pub use exporter::JsonExporter;
pub use models::{ImageResults, RewrittenQuery, UserQuery};
pub use pipeline::{ImagePipeline, PipelineStats, RunOutcome};
pub use rewriter::{OpenAiQueryRewriter, QueryRewriter};
pub use search::{ImageFinder, SearchParams, SerpApiImageFinder};
pub use utils::{OperationTimer, Validator};
