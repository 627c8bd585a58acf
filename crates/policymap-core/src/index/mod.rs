//! Chunking, chunk tables and embedding

mod chunker;
mod concat;
mod embedder;
mod writer;

pub use chunker::{
    estimate_word_count, is_non_alpha, line_tokens, normalize_line, raw_lines, Chunk,
    ChunkerConfig, Chunks, SlidingWindowChunker, CHUNK_LENGTH_TOKENS, CHUNK_OVERLAP_TOKENS,
    MAX_TOKEN_LEN, MIN_TOKEN_LEN,
};
pub use concat::{concat_directory, concat_tables, ConcatStats};
pub use embedder::{
    embed_table, embedding_header, EmbedProgress, EmbedStats, EmbeddingStore, EMBED_KEY_COLUMNS,
};
pub use writer::{chunk_directory, read_chunks, write_chunks, SourceStats, CHUNK_COLUMNS};

pub(crate) use writer::ensure_parent;
