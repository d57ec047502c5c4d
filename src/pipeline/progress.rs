// file: src/pipeline/progress.rs
// description: spinner shown while a pipeline stage waits on the network
// reference: uses indicatif for progress display and tracks stage timings

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const TICK_INTERVAL: Duration = Duration::from_millis(120);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineStats {
    pub rewrite_duration: Duration,
    pub search_duration: Duration,
    pub images_found: usize,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_duration(&self) -> Duration {
        self.rewrite_duration + self.search_duration
    }
}

pub struct StageSpinner {
    bar: ProgressBar,
}

impl StageSpinner {
    /// Starts a spinner on stderr; indicatif hides it when stderr is not a terminal.
    pub fn start(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(TICK_INTERVAL);
        Self { bar }
    }

    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Drop for StageSpinner {
    fn drop(&mut self) {
        self.finish();
    }
}
