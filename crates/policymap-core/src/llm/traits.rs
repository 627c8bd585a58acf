//! LLM trait definitions

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Embedding generation trait
pub trait Embedder: Send + Sync {
    /// Generate embedding for single text
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Get embedding dimensions
    fn dimensions(&self) -> usize;

    /// Get model name
    fn model_name(&self) -> &str;
}

/// Chat completion trait
pub trait Completer: Send + Sync {
    fn complete(&self, messages: Vec<ChatMessage>) -> Result<String>;

    fn model_name(&self) -> &str;
}

/// Chat message for completion requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}
