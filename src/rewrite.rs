//! The rewrite gateway: admission → cache → prompt → upstream, with
//! short-circuit on the first failure.

use crate::admission::{cache_key, AdmissionStats, RateLimiter, ResponseCache};
use crate::error::RewriteError;
use crate::prompt::build_prompt;
use crate::providers::{CompletionClient, CompletionParams};
use crate::tone::ToneSelection;
use std::sync::{Arc, Mutex};

/// Orchestrates one rewrite per call. Constructed once per process and
/// injected into the HTTP layer; tests instantiate isolated instances.
///
/// The rate window and cache sit behind mutexes that are never held across
/// the upstream await, so two concurrent requests with the same key may both
/// miss and both call upstream. Accepted race; last cache write wins.
pub struct RewriteService {
    client: Arc<dyn CompletionClient>,
    params: CompletionParams,
    limiter: Mutex<RateLimiter>,
    cache: Mutex<ResponseCache>,
}

impl RewriteService {
    pub fn new(client: Arc<dyn CompletionClient>, params: CompletionParams) -> Self {
        Self {
            client,
            params,
            limiter: Mutex::new(RateLimiter::new()),
            cache: Mutex::new(ResponseCache::new()),
        }
    }

    /// Rewrite `text` in the requested tone on behalf of `client_id`.
    ///
    /// Stage order is load-bearing: admission is spent before the cache is
    /// consulted (a hit still counts against the quota), and the credential
    /// is verified after the cache so cached rewrites survive a lost key.
    pub async fn rewrite(
        &self,
        text: &str,
        tone: ToneSelection,
        client_id: &str,
    ) -> Result<String, RewriteError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(RewriteError::EmptyText);
        }

        if !self.lock_limiter().allow(client_id) {
            return Err(RewriteError::RateLimited);
        }

        let key = cache_key(text, tone);
        if let Some(hit) = self.lock_cache().get(&key).map(str::to_string) {
            tracing::info!("cache hit for tone adjustment");
            return Ok(hit);
        }

        if !self.client.is_configured() {
            return Err(RewriteError::MissingCredential);
        }

        let prompt = build_prompt(text, tone);
        tracing::info!(tone = %tone.key_fragment(), "requesting rewrite from completion provider");
        let completion = self.client.complete(&prompt, &self.params).await?;

        let adjusted = completion.trim().to_string();
        self.lock_cache().put(key, adjusted.clone());
        Ok(adjusted)
    }

    /// Diagnostic snapshot of the admission layer.
    pub fn stats(&self) -> AdmissionStats {
        AdmissionStats {
            cache_size: self.lock_cache().len(),
            request_counts: self.lock_limiter().request_counts(),
        }
    }

    /// Whether the upstream credential is configured (health endpoint).
    pub fn upstream_configured(&self) -> bool {
        self.client.is_configured()
    }

    fn lock_limiter(&self) -> std::sync::MutexGuard<'_, RateLimiter> {
        self.limiter.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, ResponseCache> {
        self.cache.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
