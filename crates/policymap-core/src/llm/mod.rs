//! Remote model access and retry handling

mod client;
mod retry;
mod traits;

pub use client::{api_error_message, OpenAiClient};
pub use retry::{Classify, ErrorKind, RetryPolicy};
pub use traits::{ChatMessage, Completer, Embedder};
