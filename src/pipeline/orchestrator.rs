// file: src/pipeline/orchestrator.rs
// description: runs rewrite, search and export in strict sequence
// reference: orchestrates the single-shot image lookup workflow

use crate::config::{Config, Credentials};
use crate::error::Result;
use crate::exporter::JsonExporter;
use crate::models::{RewrittenQuery, UserQuery};
use crate::pipeline::progress::{PipelineStats, StageSpinner};
use crate::rewriter::{OpenAiQueryRewriter, QueryRewriter};
use crate::search::{ImageFinder, SerpApiImageFinder};
use crate::utils::OperationTimer;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

const SLOW_STAGE: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Saved {
        query: RewrittenQuery,
        path: PathBuf,
        count: usize,
        stats: PipelineStats,
    },
    NoImages {
        query: RewrittenQuery,
        stats: PipelineStats,
    },
}

impl RunOutcome {
    pub fn query(&self) -> &RewrittenQuery {
        match self {
            RunOutcome::Saved { query, .. } | RunOutcome::NoImages { query, .. } => query,
        }
    }

    pub fn stats(&self) -> &PipelineStats {
        match self {
            RunOutcome::Saved { stats, .. } | RunOutcome::NoImages { stats, .. } => stats,
        }
    }
}

pub struct ImagePipeline<R, F> {
    rewriter: R,
    finder: F,
    exporter: JsonExporter,
    show_progress: bool,
}

impl ImagePipeline<OpenAiQueryRewriter, SerpApiImageFinder> {
    /// Wires the OpenAI rewriter and SerpApi finder from configuration.
    pub fn from_config(config: &Config, credentials: Credentials) -> Self {
        let Credentials {
            serp_api_key,
            openai_api_key,
        } = credentials;

        Self::new(
            OpenAiQueryRewriter::new(openai_api_key, &config.llm),
            SerpApiImageFinder::new(serp_api_key, &config.search),
            JsonExporter::new(config.output.path.clone()),
        )
    }
}

impl<R, F> ImagePipeline<R, F>
where
    R: QueryRewriter,
    F: ImageFinder,
{
    pub fn new(rewriter: R, finder: F, exporter: JsonExporter) -> Self {
        Self {
            rewriter,
            finder,
            exporter,
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    fn spinner(&self, message: &str) -> StageSpinner {
        if self.show_progress {
            StageSpinner::start(message)
        } else {
            StageSpinner::hidden()
        }
    }

    /// Rewrites `user_query`, searches with the result and writes any URLs
    /// found. The first error aborts the run; nothing is written unless
    /// both service calls succeed.
    pub async fn run(&self, user_query: &str) -> Result<RunOutcome> {
        let user_query = UserQuery::parse(user_query)?;
        let mut stats = PipelineStats::new();

        let timer = OperationTimer::new("rewrite query");
        let spinner = self.spinner("Optimizing query");
        let rewritten = self.rewriter.rewrite(user_query.as_str()).await?;
        spinner.finish();
        timer.warn_if_slow(SLOW_STAGE);
        stats.rewrite_duration = timer.finish();

        info!("Optimized query: {}", rewritten.query);

        let timer = OperationTimer::new("image search");
        let spinner = self.spinner("Searching images");
        let images = self.finder.find_images(&rewritten.query).await?;
        spinner.finish();
        timer.warn_if_slow(SLOW_STAGE);
        stats.search_duration = timer.finish_with_count(images.len());
        stats.images_found = images.len();

        if images.is_empty() {
            return Ok(RunOutcome::NoImages {
                query: rewritten,
                stats,
            });
        }

        let path = self.exporter.write_urls(images.as_slice())?;

        Ok(RunOutcome::Saved {
            query: rewritten,
            path,
            count: images.len(),
            stats,
        })
    }
}
