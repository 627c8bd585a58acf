//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "policymap")]
#[command(
    author,
    version,
    about = "Chunk, tag, embed and profile a corpus of policy documents"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert PDFs to plain text
    Extract(ExtractArgs),

    /// Split text files into overlapping token windows
    Chunk(ChunkArgs),

    /// Combine per-source chunk tables into one
    Concat(ConcatArgs),

    /// Tag chunks with vocabulary keywords
    Tag(TagArgs),

    /// Embed chunk keywords, resuming any earlier run
    Embed(EmbedArgs),

    /// Write per-group keyword counts and centroids
    Profile(ProfileArgs),

    /// Ask the analyst model a question
    Ask(AskArgs),

    /// Show or create the configuration file
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct ExtractArgs {
    /// Directory of PDF files
    #[arg(long)]
    pub pdf_dir: Option<PathBuf>,

    /// Directory for extracted text
    #[arg(long)]
    pub txt_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct ChunkArgs {
    /// Directory of text files
    #[arg(long)]
    pub txt_dir: Option<PathBuf>,

    /// Directory for per-source chunk tables
    #[arg(long)]
    pub chunk_dir: Option<PathBuf>,

    /// Window size at which a chunk is cut
    #[arg(long)]
    pub length: Option<usize>,

    /// Tokens carried into the next chunk
    #[arg(long)]
    pub overlap: Option<usize>,
}

#[derive(Args)]
pub struct ConcatArgs {
    #[arg(long)]
    pub chunk_dir: Option<PathBuf>,

    /// Combined table path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct TagArgs {
    /// Combined chunk table
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Tagged table path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Lemmatized text, one line per chunk
    #[arg(long)]
    pub lemmas: Option<PathBuf>,

    /// Keyword frequency table path
    #[arg(long)]
    pub counts: Option<PathBuf>,
}

#[derive(Args)]
pub struct EmbedArgs {
    /// Tagged table
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Embedding table (appended to when it exists)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ProfileArgs {
    /// Tagged or embedded table, optionally with UMAP_D1/UMAP_D2 columns
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Directory for result tables
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct AskArgs {
    /// Prompt text
    #[arg(required = true, num_args = 1..)]
    pub prompt: Vec<String>,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
