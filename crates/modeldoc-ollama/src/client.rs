//! Blocking client for the Ollama /api/generate endpoint

use serde::{Deserialize, Serialize};
use tracing::debug;

use modeldoc_core::OllamaConfig;

/// Error from a generation attempt
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Transport-level failure: connection error, timeout, malformed response
    #[error("request to generation endpoint failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status
    #[error("generation endpoint returned {0}")]
    Status(reqwest::StatusCode),
}

/// Request body for /api/generate
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: SamplingOptions,
}

/// Fixed sampling parameters sent with every request
#[derive(Debug, Serialize)]
struct SamplingOptions {
    temperature: f64,
    top_p: f64,
}

/// Response body from /api/generate
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    /// Generated text; absent field is treated as empty output
    #[serde(default)]
    response: String,
}

/// Client for a single Ollama endpoint.
///
/// One synchronous request per call, bounded by the configured timeout. No
/// retry and no streaming; callers decide what to do on failure.
pub struct OllamaClient {
    http: reqwest::blocking::Client,
    host: String,
    model: String,
    temperature: f64,
    top_p: f64,
}

impl OllamaClient {
    /// Build a client from endpoint configuration.
    ///
    /// Uses the blocking reqwest client so the pipeline stays synchronous.
    pub fn new(config: &OllamaConfig) -> Result<Self, GenerateError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            host: config.host.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            top_p: config.top_p,
        })
    }

    /// The full /api/generate URL for this client
    pub fn endpoint_url(&self) -> String {
        format!("{}/api/generate", self.host.trim_end_matches('/'))
    }

    /// Send the prompt and return the generated text.
    ///
    /// A missing `response` field in an otherwise successful reply yields an
    /// empty string, not an error.
    pub fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let url = self.endpoint_url();
        debug!(url = %url, model = %self.model, "sending generation request");

        let response = self
            .http
            .post(&url)
            .json(&GenerateRequest {
                model: &self.model,
                prompt,
                stream: false,
                options: SamplingOptions {
                    temperature: self.temperature,
                    top_p: self.top_p,
                },
            })
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerateError::Status(status));
        }

        let body: GenerateResponse = response.json()?;
        debug!(chars = body.response.len(), "generation succeeded");
        Ok(body.response)
    }
}
