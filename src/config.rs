// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{PipelineError, Result};
use crate::utils::validation::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

pub const SERP_API_KEY_VAR: &str = "SERP_API_KEY";
pub const OPENAI_API_KEY_VAR: &str = "OPEN_AI_API_KEY";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub llm: LlmConfig,
    pub search: SearchConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    pub endpoint: String,
    pub model: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    pub endpoint: String,
    pub engine: String,
    pub google_domain: String,
    pub hl: String,
    pub gl: String,
    pub ijn: String,
    pub imgsz: String,
    pub max_results: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub path: PathBuf,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let defaults = Self::default_config();
        let mut builder = config::Config::builder()
            .set_default("llm.endpoint", defaults.llm.endpoint)
            .and_then(|b| b.set_default("llm.model", defaults.llm.model))
            .and_then(|b| b.set_default("search.endpoint", defaults.search.endpoint))
            .and_then(|b| b.set_default("search.engine", defaults.search.engine))
            .and_then(|b| b.set_default("search.google_domain", defaults.search.google_domain))
            .and_then(|b| b.set_default("search.hl", defaults.search.hl))
            .and_then(|b| b.set_default("search.gl", defaults.search.gl))
            .and_then(|b| b.set_default("search.ijn", defaults.search.ijn))
            .and_then(|b| b.set_default("search.imgsz", defaults.search.imgsz))
            .and_then(|b| b.set_default("search.max_results", defaults.search.max_results as i64))
            .and_then(|b| {
                b.set_default("output.path", defaults.output.path.display().to_string())
            })
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("IMAGE_SCOUT")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            llm: LlmConfig {
                endpoint: "https://api.openai.com/v1".to_string(),
                model: "gpt-4o-2024-08-06".to_string(),
            },
            search: SearchConfig {
                endpoint: "https://serpapi.com".to_string(),
                engine: "google_images".to_string(),
                google_domain: "google.com".to_string(),
                hl: "en".to_string(),
                gl: "us".to_string(),
                ijn: "0".to_string(),
                imgsz: "svga".to_string(),
                max_results: 5,
            },
            output: OutputConfig {
                path: PathBuf::from("images.json"),
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.search.max_results == 0 {
            return Err(PipelineError::Config(
                "search.max_results must be greater than 0".to_string(),
            ));
        }

        Validator::validate_url(&self.llm.endpoint)
            .map_err(|e| PipelineError::Config(format!("llm.endpoint: {}", e)))?;
        Validator::validate_url(&self.search.endpoint)
            .map_err(|e| PipelineError::Config(format!("search.endpoint: {}", e)))?;

        if self.llm.model.trim().is_empty() {
            return Err(PipelineError::Config("llm.model must not be empty".to_string()));
        }

        if self.output.path.as_os_str().is_empty() {
            return Err(PipelineError::Config("output.path must not be empty".to_string()));
        }

        Ok(())
    }
}

/// The two service keys, read once at startup and never mutated.
#[derive(Clone)]
pub struct Credentials {
    pub serp_api_key: String,
    pub openai_api_key: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves every key through `lookup`; blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| PipelineError::MissingCredential(name.to_string()))
        };

        Ok(Self {
            serp_api_key: require(SERP_API_KEY_VAR)?,
            openai_api_key: require(OPENAI_API_KEY_VAR)?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("serp_api_key", &"***")
            .field("openai_api_key", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.search.max_results, 5);
        assert_eq!(config.search.engine, "google_images");
        assert_eq!(config.output.path, PathBuf::from("images.json"));
    }

    #[test]
    fn test_validate_rejects_zero_results() {
        let mut config = Config::default_config();
        config.search.max_results = 0;
        assert!(matches!(config.validate(), Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_endpoint() {
        let mut config = Config::default_config();
        config.llm.endpoint = "api.openai.com".to_string();
        assert!(matches!(config.validate(), Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            "[search]\nmax_results = 3\nimgsz = \"l\"\n\n[output]\npath = \"out/urls.json\""
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.search.max_results, 3);
        assert_eq!(config.search.imgsz, "l");
        assert_eq!(config.search.hl, "en");
        assert_eq!(config.output.path, PathBuf::from("out/urls.json"));
        assert_eq!(config.llm.model, "gpt-4o-2024-08-06");
    }

    #[test]
    fn test_credentials_present() {
        let creds = Credentials::from_lookup(lookup_from(&[
            (SERP_API_KEY_VAR, "serp"),
            (OPENAI_API_KEY_VAR, "openai"),
        ]))
        .unwrap();
        assert_eq!(creds.serp_api_key, "serp");
        assert_eq!(creds.openai_api_key, "openai");
    }

    #[test]
    fn test_credentials_missing_names_variable() {
        let err = Credentials::from_lookup(lookup_from(&[(OPENAI_API_KEY_VAR, "openai")]))
            .unwrap_err();
        assert!(err.to_string().contains(SERP_API_KEY_VAR));

        let err =
            Credentials::from_lookup(lookup_from(&[(SERP_API_KEY_VAR, "serp")])).unwrap_err();
        assert!(err.to_string().contains(OPENAI_API_KEY_VAR));
    }

    #[test]
    fn test_credentials_blank_counts_as_missing() {
        let err = Credentials::from_lookup(lookup_from(&[
            (SERP_API_KEY_VAR, "   "),
            (OPENAI_API_KEY_VAR, "openai"),
        ]))
        .unwrap_err();
        assert!(matches!(err, PipelineError::MissingCredential(name) if name == SERP_API_KEY_VAR));
    }

    #[test]
    fn test_credentials_debug_hides_keys() {
        let creds = Credentials {
            serp_api_key: "secret-serp".to_string(),
            openai_api_key: "secret-openai".to_string(),
        };
        let rendered = format!("{:?}", creds);
        assert!(!rendered.contains("secret"));
    }
}
