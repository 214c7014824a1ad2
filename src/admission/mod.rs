//! Request admission: per-client rate limiting and the bounded response
//! cache that short-circuits repeated rewrites.
//!
//! Ordering contract: admission is consulted before the cache, and the cache
//! before the upstream call — a cache hit still spends a slot of the quota
//! but never reaches the network.

mod cache;
mod rate;

pub use cache::{cache_key, ResponseCache, CACHE_CAPACITY, CACHE_KEY_PREFIX_CHARS};
pub use rate::{RateLimiter, RATE_LIMIT, RATE_WINDOW_MS};

use serde::Serialize;
use std::collections::HashMap;

/// Read-only snapshot of the admission layer, served by the diagnostics
/// endpoint. Not authoritative state.
#[derive(Debug, Serialize)]
pub struct AdmissionStats {
    #[serde(rename = "cacheSize")]
    pub cache_size: usize,
    #[serde(rename = "requestCounts")]
    pub request_counts: HashMap<String, usize>,
}
