//! Text generation backends.
//!
//! The only production backend is [`CohereClient`], which talks to Cohere's
//! `/v1/generate` endpoint. Handlers hold an `Arc<dyn GenerationBackend>` so
//! tests can swap in a canned implementation.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.cohere.ai";
pub const DEFAULT_MODEL: &str = "command";
pub const DEFAULT_MAX_TOKENS: u32 = 300;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("no API key configured for the generation service (set COHERE_API_KEY)")]
    MissingApiKey,
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("generation API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("generation API returned no candidates")]
    EmptyResponse,
}

/// Sampling settings sent with every request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// A hosted model that turns a prompt into text.
pub trait GenerationBackend: Send + Sync {
    /// Short provider name used in logs.
    fn name(&self) -> &str;

    /// Submit `prompt` once and return the text of the first candidate,
    /// untrimmed.
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
        params: &'a GenerationParams,
    ) -> Pin<Box<dyn Future<Output = Result<String, GenerationError>> + Send + 'a>>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    generations: Vec<Generation>,
}

#[derive(Debug, Deserialize)]
struct Generation {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Cohere generate API client.
pub struct CohereClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Option<Duration>,
}

impl CohereClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            timeout: None,
        }
    }

    /// Point the client at another host (a proxy or a local mock).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Apply a per-request timeout. Without one, reqwest's default applies.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/generate", self.base_url.trim_end_matches('/'))
    }
}

impl GenerationBackend for CohereClient {
    fn name(&self) -> &str {
        "Cohere"
    }

    fn generate<'a>(
        &'a self,
        prompt: &'a str,
        params: &'a GenerationParams,
    ) -> Pin<Box<dyn Future<Output = Result<String, GenerationError>> + Send + 'a>> {
        Box::pin(async move {
            let api_key = self
                .api_key
                .as_deref()
                .ok_or(GenerationError::MissingApiKey)?;

            let body = GenerateRequest {
                model: &params.model,
                prompt,
                max_tokens: params.max_tokens,
                temperature: params.temperature,
            };

            let mut req = self
                .client
                .post(self.endpoint())
                .bearer_auth(api_key)
                .header("Accept", "application/json")
                .json(&body);
            if let Some(timeout) = self.timeout {
                req = req.timeout(timeout);
            }

            let resp = req.send().await?;
            let status = resp.status();
            if !status.is_success() {
                let text = resp.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ErrorBody>(&text)
                    .ok()
                    .and_then(|b| b.message)
                    .unwrap_or_else(|| format!("HTTP {}", status));
                tracing::warn!(status = status.as_u16(), %message, "generation API rejected request");
                return Err(GenerationError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let data: GenerateResponse = resp.json().await?;
            data.generations
                .into_iter()
                .next()
                .map(|g| g.text)
                .ok_or(GenerationError::EmptyResponse)
        })
    }
}
