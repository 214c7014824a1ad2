use crate::config::UpstreamConfig;
use crate::error::RewriteError;
use crate::providers::traits::{CompletionClient, CompletionParams};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Mistral chat-completions client.
///
/// One POST per rewrite; the request timeout is the only cancellation
/// mechanism and there is no retry.
pub struct MistralClient {
    /// Pre-computed `"Bearer <key>"` header value (avoids `format!` per request).
    cached_auth_header: Option<String>,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpstreamErrorBody {
    message: Option<String>,
}

impl MistralClient {
    pub fn new(config: &UpstreamConfig) -> Self {
        Self::with_base_url(config.api_key.as_deref(), &config.base_url, config.timeout())
    }

    pub fn with_base_url(api_key: Option<&str>, base_url: &str, timeout: Duration) -> Self {
        Self {
            cached_auth_header: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(|k| format!("Bearer {k}")),
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::builder()
                .timeout(timeout)
                .connect_timeout(Duration::from_secs(10))
                .pool_max_idle_per_host(10)
                .pool_idle_timeout(Duration::from_secs(90))
                .tcp_keepalive(Duration::from_secs(60))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    fn build_request(prompt: &str, params: &CompletionParams) -> ChatRequest {
        ChatRequest {
            model: params.model.clone(),
            messages: vec![Message {
                role: "user",
                content: prompt.to_string(),
            }],
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        }
    }

    fn extract_text(chat_response: ChatResponse) -> Result<String, RewriteError> {
        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(RewriteError::MalformedResponse)
    }

    async fn map_error_status(status: StatusCode, response: reqwest::Response) -> RewriteError {
        match status {
            StatusCode::UNAUTHORIZED => RewriteError::UpstreamAuth,
            StatusCode::TOO_MANY_REQUESTS => RewriteError::UpstreamRateLimited,
            _ => {
                let message = response
                    .json::<UpstreamErrorBody>()
                    .await
                    .ok()
                    .and_then(|body| body.message)
                    .unwrap_or_else(|| "Unknown API error".to_string());
                RewriteError::Upstream {
                    status: status.as_u16(),
                    message,
                }
            }
        }
    }
}

#[async_trait]
impl CompletionClient for MistralClient {
    async fn complete(
        &self,
        prompt: &str,
        params: &CompletionParams,
    ) -> Result<String, RewriteError> {
        let auth_header = self
            .cached_auth_header
            .as_ref()
            .ok_or(RewriteError::MissingCredential)?;

        let request = Self::build_request(prompt, params);
        let url = format!("{}/v1/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", auth_header)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RewriteError::UpstreamTimeout
                } else {
                    RewriteError::Transport(anyhow::Error::new(e).context("Mistral request failed"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::map_error_status(status, response).await);
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|_| RewriteError::MalformedResponse)?;
        Self::extract_text(chat_response)
    }

    fn is_configured(&self) -> bool {
        self.cached_auth_header.is_some()
    }
}
