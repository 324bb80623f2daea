//! HTTP client for the Gemini `generateContent` and `embedContent`
//! endpoints.
//!
//! One client instance holds one `reqwest::Client` and is constructed at
//! process start, then shared for the lifetime of the process. Requests
//! carry the API key as a query parameter per the API's convention.

use serde::{Deserialize, Serialize};

/// Default public API base URL.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Sampling temperature for markup/intent generation. Low, for
/// consistency over creativity.
const GENERATION_TEMPERATURE: f64 = 0.3;

/// Connection settings for the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API credential, from `GEMINI_API_KEY`.
    pub api_key: String,
    /// Base URL, override via `GEMINI_BASE_URL` (used by tests to point
    /// at a local stub).
    pub base_url: String,
    /// Text-generation model (default `gemini-1.5-flash`).
    pub model: String,
    /// Embedding model (default `text-embedding-004`).
    pub embed_model: String,
}

impl GeminiConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var             | Default                                  |
    /// |---------------------|------------------------------------------|
    /// | `GEMINI_API_KEY`    | (required)                               |
    /// | `GEMINI_BASE_URL`   | `https://generativelanguage.googleapis.com` |
    /// | `GEMINI_MODEL`      | `gemini-1.5-flash`                       |
    /// | `GEMINI_EMBED_MODEL`| `text-embedding-004`                     |
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY must be set");
        let base_url =
            std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-1.5-flash".into());
        let embed_model =
            std::env::var("GEMINI_EMBED_MODEL").unwrap_or_else(|_| "text-embedding-004".into());

        Self {
            api_key,
            base_url,
            model,
            embed_model,
        }
    }
}

/// Errors from the Gemini REST layer.
#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Gemini API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A well-formed 2xx response carried no usable content (empty
    /// candidate list, missing text part, missing embedding values).
    #[error("Gemini response contained no content")]
    MissingContent,
}

/// HTTP client for the Gemini API.
pub struct GeminiClient {
    client: reqwest::Client,
    config: GeminiConfig,
}

// --- Request/response DTOs (generateContent) -------------------------------

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

// --- Request/response DTOs (embedContent) ----------------------------------

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: String,
    content: Content<'a>,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embedding: Option<EmbeddingValues>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingValues {
    #[serde(default)]
    values: Vec<f32>,
}

impl GeminiClient {
    /// Create a new client with its own connection pool.
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: GeminiConfig) -> Self {
        Self { client, config }
    }

    /// Generate free-form text from a prompt.
    ///
    /// One `generateContent` call, no retry. Returns the first candidate's
    /// first text part.
    pub async fn generate(&self, prompt: &str) -> Result<String, GeminiError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.base_url, self.config.model, self.config.api_key
        );

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: GENERATION_TEMPERATURE,
            },
        };

        tracing::debug!(model = %self.config.model, prompt_len = prompt.len(), "Submitting generation request");
        let response = self.client.post(&url).json(&body).send().await?;
        let parsed: GenerateResponse = Self::parse_response(response).await?;

        extract_candidate_text(parsed).ok_or(GeminiError::MissingContent)
    }

    /// Embed a query text into a fixed-dimension vector.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, GeminiError> {
        let url = format!(
            "{}/v1beta/models/{}:embedContent?key={}",
            self.config.base_url, self.config.embed_model, self.config.api_key
        );

        let body = EmbedRequest {
            model: format!("models/{}", self.config.embed_model),
            content: Content {
                parts: vec![Part { text }],
            },
        };

        tracing::debug!(model = %self.config.embed_model, text_len = text.len(), "Submitting embedding request");
        let response = self.client.post(&url).json(&body).send().await?;
        let parsed: EmbedResponse = Self::parse_response(response).await?;

        match parsed.embedding {
            Some(e) if !e.values.is_empty() => Ok(e.values),
            _ => Err(GeminiError::MissingContent),
        }
    }

    /// Check the status code and deserialize a successful response body.
    ///
    /// Non-2xx responses are captured with their raw body so upstream
    /// failures stay debuggable from logs alone.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GeminiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }
}

/// Pull the first candidate's first non-empty text part, if any.
fn extract_candidate_text(response: GenerateResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|content| content.parts.into_iter().find_map(|p| p.text))
}
