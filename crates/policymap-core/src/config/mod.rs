//! Configuration management
//!
//! Every stage receives its settings from an explicit [`Config`] value; there
//! is no process-wide configuration state.

mod layout;

pub use layout::Layout;

use crate::analysis::ProfileConfig;
use crate::error::Result;
use crate::index::ChunkerConfig;
use crate::keywords::KeywordConfig;
use crate::llm::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Where pipeline artifacts live
    #[serde(default)]
    pub workspace: WorkspaceConfig,

    /// Sliding-window chunking parameters
    #[serde(default)]
    pub chunking: ChunkerConfig,

    /// Backoff policy for remote calls
    #[serde(default)]
    pub retry: RetryPolicy,

    /// LLM service configuration
    #[serde(default)]
    pub llm_service: LLMServiceConfig,

    /// Controlled keyword vocabulary
    #[serde(default)]
    pub keywords: KeywordConfig,

    /// Display names and groupings for profiling
    #[serde(default)]
    pub profile: ProfileConfig,
}

/// Root directories of the working tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Input and intermediate data (`pdf/`, `txt/`, `chunk/`, tables)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Result artifacts (`res/`)
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            output_dir: default_output_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("dat")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("out")
}

/// LLM service configuration for the OpenAI-compatible API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMServiceConfig {
    /// Base URL of the service
    #[serde(default = "default_url")]
    pub url: String,

    /// Model name for chat completions
    #[serde(default = "default_chat_model")]
    pub model: String,

    /// Model name for embeddings
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Embedding vector length
    #[serde(default = "default_embedding_dimensions")]
    pub embedding_dimensions: usize,

    /// API key, never written back to disk
    #[serde(default = "default_api_key", skip_serializing)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Sampling seed for completions
    #[serde(default = "default_seed")]
    pub seed: Option<u64>,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_frequency_penalty")]
    pub frequency_penalty: f32,

    /// Institution the analyst persona speaks for
    #[serde(default = "default_client_name")]
    pub client_name: String,
}

impl LLMServiceConfig {
    /// System message for the regulatory analyst persona
    pub fn system_prompt(&self) -> String {
        format!(
            "You are a regulatory analyst assistant. Respond in a staid and measured tone. \
             If you refer to yourself, do so as \"we\" or {}.",
            self.client_name
        )
    }
}

impl Default for LLMServiceConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            model: default_chat_model(),
            embedding_model: default_embedding_model(),
            embedding_dimensions: default_embedding_dimensions(),
            api_key: default_api_key(),
            timeout_secs: default_timeout(),
            seed: default_seed(),
            temperature: default_temperature(),
            frequency_penalty: default_frequency_penalty(),
            client_name: default_client_name(),
        }
    }
}

fn default_url() -> String {
    std::env::var("POLICYMAP_LLM_URL").unwrap_or_else(|_| "https://api.openai.com".to_string())
}

fn default_chat_model() -> String {
    std::env::var("POLICYMAP_LLM_MODEL").unwrap_or_else(|_| "gpt-4o".to_string())
}

fn default_embedding_model() -> String {
    std::env::var("POLICYMAP_EMBEDDING_MODEL")
        .unwrap_or_else(|_| "text-embedding-ada-002".to_string())
}

fn default_embedding_dimensions() -> usize {
    std::env::var("POLICYMAP_EMBEDDING_DIMS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(1536)
}

fn default_api_key() -> Option<String> {
    std::env::var("POLICYMAP_API_KEY")
        .or_else(|_| std::env::var("OPENAI_API_KEY"))
        .ok()
}

fn default_timeout() -> u64 {
    600
}

fn default_seed() -> Option<u64> {
    Some(12345)
}

fn default_temperature() -> f32 {
    0.2
}

fn default_frequency_penalty() -> f32 {
    -0.3
}

fn default_client_name() -> String {
    "the institution".to_string()
}

impl Config {
    /// Load config from default path
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load config from `path`, falling back to defaults when it is absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_yaml::from_str(&content)?;
            tracing::debug!("Loaded configuration from {}", path.display());
            Ok(config)
        } else {
            tracing::debug!("No configuration at {}, using defaults", path.display());
            Ok(Config::default())
        }
    }

    /// Save config to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CONFIG_DIR_NAME)
            .join("config.yml")
    }

    /// Check the sections whose values constrain the algorithms
    pub fn validate(&self) -> Result<()> {
        self.chunking.validate()?;
        self.retry.validate()?;
        Ok(())
    }

    /// File layout derived from the workspace roots
    pub fn layout(&self) -> Layout {
        Layout::new(&self.workspace.data_dir, &self.workspace.output_dir)
    }
}
