//! HTTP client for a running tonecraft gateway.
//!
//! Failure messages from the server's `{error, message}` body are surfaced
//! verbatim; a refused connection gets a human hint instead of a reqwest
//! debug dump.

use crate::tone::ToneSelection;
use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Serialize)]
struct AdjustToneRequest<'a> {
    text: &'a str,
    #[serde(rename = "toneConfig")]
    tone_config: ToneSelection,
}

#[derive(Deserialize)]
struct AdjustToneResponse {
    #[serde(rename = "adjustedText")]
    adjusted_text: String,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Ask the gateway to rewrite `text` in the given tone.
    pub async fn adjust_tone(&self, text: &str, tone: ToneSelection) -> Result<String> {
        let text = text.trim();
        if text.is_empty() {
            bail!("Text cannot be empty");
        }

        let response = self
            .client
            .post(format!("{}/api/adjust-tone", self.base_url))
            .json(&AdjustToneRequest {
                text,
                tone_config: tone,
            })
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    anyhow!(
                        "Unable to connect to the server at {}. Is the gateway running?",
                        self.base_url
                    )
                } else {
                    anyhow::Error::new(e).context("adjust-tone request failed")
                }
            })?;

        if !response.status().is_success() {
            let message = response
                .json::<ApiErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| "Failed to adjust tone".to_string());
            bail!(message);
        }

        let body: AdjustToneResponse = response
            .json()
            .await
            .map_err(|e| anyhow::Error::new(e).context("adjust-tone response decode failed"))?;
        Ok(body.adjusted_text)
    }

    /// Whether the gateway answers its health probe.
    pub async fn check_health(&self) -> bool {
        match self
            .client
            .get(format!("{}/api/health", self.base_url))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tone::{Detail, Formality};

    #[test]
    fn request_uses_wire_field_names() {
        let req = AdjustToneRequest {
            text: "Hi",
            tone_config: ToneSelection::new(Formality::Casual, Detail::Concise),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["text"], "Hi");
        assert_eq!(json["toneConfig"]["formality"], "casual");
        assert_eq!(json["toneConfig"]["detail"], "concise");
    }

    #[test]
    fn response_parses_adjusted_text() {
        let body: AdjustToneResponse =
            serde_json::from_str(r#"{"adjustedText":"Hey!"}"#).unwrap();
        assert_eq!(body.adjusted_text, "Hey!");
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = ApiClient::new("http://localhost:3001/");
        assert_eq!(client.base_url, "http://localhost:3001");
    }

    #[tokio::test]
    async fn empty_text_is_rejected_client_side() {
        let client = ApiClient::new("http://localhost:1");
        let tone = ToneSelection::new(Formality::Casual, Detail::Concise);
        let err = client.adjust_tone("   ", tone).await.unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }
}
