// file: src/exporter/json.rs
// description: json export of the collected image urls

use crate::error::{PipelineError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_path: PathBuf,
}

impl JsonExporter {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Writes `urls` as a 2-space indented JSON array, replacing any existing file.
    pub fn write_urls(&self, urls: &[Option<String>]) -> Result<PathBuf> {
        if let Some(parent) = self
            .output_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        {
            fs::create_dir_all(parent).map_err(|source| PipelineError::FileOperation {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(urls)
            .map_err(|e| PipelineError::Serialization(e.to_string()))?;

        debug!("Writing {} bytes to {:?}", json.len(), self.output_path);

        fs::write(&self.output_path, json).map_err(|source| PipelineError::FileOperation {
            path: self.output_path.clone(),
            source,
        })?;

        info!("Exported {} url(s) to {}", urls.len(), self.output_path.display());
        Ok(self.output_path.clone())
    }
}
