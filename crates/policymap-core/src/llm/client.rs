//! Blocking HTTP client for OpenAI-compatible services

use super::retry::RetryPolicy;
use super::traits::{ChatMessage, Completer, Embedder};
use crate::config::LLMServiceConfig;
use crate::error::{PolicyMapError, Result};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Embeddings and chat completions over `/v1/*`, each request under a retry policy
pub struct OpenAiClient {
    http_client: Client,
    config: LLMServiceConfig,
    retry: RetryPolicy,
}

impl OpenAiClient {
    pub fn new(config: LLMServiceConfig, retry: RetryPolicy) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(PolicyMapError::Http)?;

        Ok(Self {
            http_client,
            config,
            retry,
        })
    }

    pub fn config(&self) -> &LLMServiceConfig {
        &self.config
    }

    /// Ask a single question with the analyst persona as system message
    pub fn ask(&self, prompt: &str) -> Result<String> {
        self.complete(vec![
            ChatMessage::system(self.config.system_prompt()),
            ChatMessage::user(prompt),
        ])
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.url.trim_end_matches('/'), path)
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match self.config.api_key {
            Some(ref api_key) => req.header("Authorization", format!("Bearer {}", api_key)),
            None => req,
        }
    }

    fn request_embedding(&self, text: &str) -> Result<Vec<f32>> {
        #[derive(Serialize)]
        struct EmbedRequest<'a> {
            model: &'a str,
            input: &'a str,
        }

        #[derive(Deserialize)]
        struct EmbedResponse {
            data: Vec<EmbedData>,
        }

        #[derive(Deserialize)]
        struct EmbedData {
            embedding: Vec<f32>,
        }

        let request = EmbedRequest {
            model: &self.config.embedding_model,
            input: text,
        };

        let req = self
            .http_client
            .post(self.endpoint("/v1/embeddings"))
            .json(&request);
        let response = check_status(self.authorize(req).send()?)?;
        let embed_response: EmbedResponse = response.json()?;

        embed_response
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| PolicyMapError::Llm("No embedding returned".to_string()))
    }

    fn request_completion(&self, messages: &[ChatMessage]) -> Result<String> {
        #[derive(Serialize)]
        struct ChatRequest<'a> {
            model: &'a str,
            messages: &'a [ChatMessage],
            temperature: f32,
            frequency_penalty: f32,
            #[serde(skip_serializing_if = "Option::is_none")]
            seed: Option<u64>,
        }

        #[derive(Deserialize)]
        struct ChatResponse {
            choices: Vec<ChatChoice>,
        }

        #[derive(Deserialize)]
        struct ChatChoice {
            message: ChatMessage,
        }

        let request = ChatRequest {
            model: &self.config.model,
            messages,
            temperature: self.config.temperature,
            frequency_penalty: self.config.frequency_penalty,
            seed: self.config.seed,
        };

        let req = self
            .http_client
            .post(self.endpoint("/v1/chat/completions"))
            .json(&request);
        let response = check_status(self.authorize(req).send()?)?;
        let chat_response: ChatResponse = response.json()?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| PolicyMapError::Llm("No response from LLM".to_string()))
    }
}

impl Embedder for OpenAiClient {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.retry.run(|| self.request_embedding(text))
    }

    fn dimensions(&self) -> usize {
        self.config.embedding_dimensions
    }

    fn model_name(&self) -> &str {
        &self.config.embedding_model
    }
}

impl Completer for OpenAiClient {
    fn complete(&self, messages: Vec<ChatMessage>) -> Result<String> {
        if messages.is_empty() {
            return Err(PolicyMapError::InvalidInput(
                "Completion needs at least one message".to_string(),
            ));
        }
        self.retry.run(|| self.request_completion(&messages))
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    let message = api_error_message(&body);
    if status == StatusCode::TOO_MANY_REQUESTS {
        Err(PolicyMapError::RateLimited(message))
    } else {
        Err(PolicyMapError::ExternalError {
            status: status.as_u16(),
            message,
        })
    }
}

/// The `error.message` of an API error body, or the raw body
pub fn api_error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: ErrorDetail,
    }

    #[derive(Deserialize)]
    struct ErrorDetail {
        message: String,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}
