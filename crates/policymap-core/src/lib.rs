//! Policymap Core Library
//!
//! Building blocks for mapping a corpus of policy documents.
//!
//! # Features
//! - PDF to plain-text extraction
//! - Sliding-window token chunking with overlap
//! - Controlled-vocabulary keyword tagging
//! - Resumable keyword embedding through an OpenAI-compatible service
//! - Exponential-backoff retry for remote calls
//! - Per-source keyword profiles and projection centroids

pub mod analysis;
pub mod config;
pub mod error;
pub mod index;
pub mod keywords;
pub mod llm;
pub mod providers;

pub use analysis::{profile_table, write_profiles, GroupProfile, KeywordCounts, ProfileConfig};
pub use config::{Config, LLMServiceConfig, Layout, WorkspaceConfig};
pub use error::{Error, PolicyMapError, Result};
pub use index::{
    chunk_directory, concat_directory, embed_table, Chunk, ChunkerConfig, EmbedStats,
    SlidingWindowChunker,
};
pub use keywords::{tag_table, KeywordConfig, KeywordTagger, TagReport, TaggedChunk};
pub use llm::{
    ChatMessage, Classify, Completer, Embedder, ErrorKind, OpenAiClient, RetryPolicy,
};
pub use providers::{scan_files, ExtractStats, PdfExtractor};

/// Default config directory name
pub const CONFIG_DIR_NAME: &str = "policymap";
