use crate::error::RewriteError;
use async_trait::async_trait;

/// Fixed sampling parameters for one completion call.
#[derive(Debug, Clone)]
pub struct CompletionParams {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl Default for CompletionParams {
    fn default() -> Self {
        Self {
            model: "mistral-small-latest".into(),
            temperature: 0.7,
            max_tokens: 1000,
        }
    }
}

/// The single asynchronous boundary of the rewrite pipeline.
///
/// Implementations fail with the typed `RewriteError` variants so the gateway
/// maps them to HTTP statuses without inspecting transport detail. Tests
/// substitute an in-process fake.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send one prompt upstream and return the raw completion text.
    async fn complete(
        &self,
        prompt: &str,
        params: &CompletionParams,
    ) -> Result<String, RewriteError>;

    /// Whether an upstream credential is present. Checked before any prompt
    /// is built; a missing credential must fail before the network.
    fn is_configured(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_match_upstream_contract() {
        let params = CompletionParams::default();
        assert_eq!(params.model, "mistral-small-latest");
        assert!((params.temperature - 0.7).abs() < f64::EPSILON);
        assert_eq!(params.max_tokens, 1000);
    }
}
