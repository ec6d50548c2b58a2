// llm client: one request per generation, no retries

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ModelCredential;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const OLLAMA_API_URL: &str = "http://localhost:11434/api/chat";
const MAX_TOKENS: u32 = 4096;

/// failure of a single llm call
///
/// display strings carry the phrases the generation classifier matches on
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid API key (status {status}): {message}")]
    InvalidApiKey { status: u16, message: String },

    #[error("rate limit reached: {message}")]
    RateLimited { message: String },

    #[error("model not found: {message}")]
    ModelNotFound { message: String },

    #[error("connection refused: {0}")]
    Connection(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unsupported provider '{0}'")]
    UnsupportedProvider(String),

    #[error("{0}")]
    Other(String),
}

/// sends a prompt to the model a credential points at
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate(&self, credential: &ModelCredential, prompt: &str) -> Result<String, ClientError>;
}

/// wire dialect spoken by a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialect {
    OpenAi(&'static str),
    Anthropic,
    Ollama,
}

fn dialect(provider: &str) -> Option<Dialect> {
    match provider.to_lowercase().as_str() {
        "openai" => Some(Dialect::OpenAi("https://api.openai.com/v1/chat/completions")),
        "groq" => Some(Dialect::OpenAi("https://api.groq.com/openai/v1/chat/completions")),
        "mistral" => Some(Dialect::OpenAi("https://api.mistral.ai/v1/chat/completions")),
        "openrouter" => Some(Dialect::OpenAi("https://openrouter.ai/api/v1/chat/completions")),
        "anthropic" => Some(Dialect::Anthropic),
        "ollama" => Some(Dialect::Ollama),
        _ => None,
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    message: ResponseMessage,
}

/// error bodies come as {"error": {"message": ..}} or {"error": ".."}
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Detailed { message: String },
    Text(String),
}

fn error_message(body: String) -> String {
    match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(ErrorEnvelope {
            error: ErrorBody::Detailed { message } | ErrorBody::Text(message),
        }) => message,
        Err(_) => body,
    }
}

/// map a non-success status onto an error the classifier understands
fn status_error(status: StatusCode, body: String) -> ClientError {
    let message = error_message(body);
    match status.as_u16() {
        401 | 403 => ClientError::InvalidApiKey {
            status: status.as_u16(),
            message,
        },
        429 => ClientError::RateLimited { message },
        404 => ClientError::ModelNotFound { message },
        code => ClientError::Api { status: code, message },
    }
}

/// http client for the hosted providers and a local ollama
#[derive(Clone)]
pub struct HttpLlmClient {
    client: Client,
}

impl HttpLlmClient {
    pub fn new(timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    async fn post<B: Serialize>(
        &self,
        request: reqwest::RequestBuilder,
        body: &B,
    ) -> Result<reqwest::Response, ClientError> {
        let response = request.json(body).send().await.map_err(|e| {
            if e.is_connect() {
                ClientError::Connection(e.to_string())
            } else {
                ClientError::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "llm api returned an error");
            return Err(status_error(status, body));
        }
        Ok(response)
    }

    async fn openai(&self, url: &str, credential: &ModelCredential, prompt: &str) -> Result<String, ClientError> {
        let body = OpenAiRequest {
            model: &credential.model,
            messages: vec![ChatMessage { role: "user", content: prompt }],
        };
        let request = self.client.post(url).bearer_auth(&credential.api_key);
        let response: OpenAiResponse = self.post(request, &body).await?.json().await?;

        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default())
    }

    async fn anthropic(&self, credential: &ModelCredential, prompt: &str) -> Result<String, ClientError> {
        let body = AnthropicRequest {
            model: &credential.model,
            max_tokens: MAX_TOKENS,
            messages: vec![ChatMessage { role: "user", content: prompt }],
        };
        let request = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &credential.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION);
        let response: AnthropicResponse = self.post(request, &body).await?.json().await?;

        Ok(response
            .content
            .into_iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text)
            .unwrap_or_default())
    }

    async fn ollama(&self, credential: &ModelCredential, prompt: &str) -> Result<String, ClientError> {
        let body = OllamaRequest {
            model: &credential.model,
            messages: vec![ChatMessage { role: "user", content: prompt }],
            stream: false,
        };
        let request = self.client.post(OLLAMA_API_URL);
        let response: OllamaResponse = self.post(request, &body).await?.json().await?;
        Ok(response.message.content.unwrap_or_default())
    }
}

#[async_trait]
impl LlmClient for HttpLlmClient {
    async fn generate(&self, credential: &ModelCredential, prompt: &str) -> Result<String, ClientError> {
        let dialect = dialect(&credential.provider)
            .ok_or_else(|| ClientError::UnsupportedProvider(credential.provider.clone()))?;

        debug!(provider = %credential.provider, model = %credential.model, "sending llm request");
        match dialect {
            Dialect::OpenAi(url) => self.openai(url, credential, prompt).await,
            Dialect::Anthropic => self.anthropic(credential, prompt).await,
            Dialect::Ollama => self.ollama(credential, prompt).await,
        }
    }
}
