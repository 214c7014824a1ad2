use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// Requests allowed per client within one window.
pub const RATE_LIMIT: usize = 100;
/// Trailing window length (1 hour).
pub const RATE_WINDOW_MS: u64 = 3_600_000;

/// Sliding-log rate limiter keyed by client identifier.
///
/// Each client maps to the timestamps of its requests within the trailing
/// window. A check prunes expired entries first, then denies without
/// recording if the remaining count is at the cap — denial never reserves a
/// slot. Bursts up to the cap inside one window are allowed; this is not a
/// token bucket.
///
/// The set of distinct clients is unbounded. Accepted: a determined client
/// pool can grow this map, which is why the stats view exposes it.
#[derive(Debug, Default)]
pub struct RateLimiter {
    windows: HashMap<String, Vec<u64>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            windows: HashMap::new(),
        }
    }

    /// Admit or deny a request from `client_id` at the current wall clock.
    pub fn allow(&mut self, client_id: &str) -> bool {
        self.allow_at(client_id, now_ms())
    }

    /// Admit or deny at an explicit timestamp. Exposed for tests that need to
    /// move time.
    pub fn allow_at(&mut self, client_id: &str, now_ms: u64) -> bool {
        let window = self.windows.entry(client_id.to_string()).or_default();
        window.retain(|&t| now_ms.saturating_sub(t) < RATE_WINDOW_MS);

        if window.len() >= RATE_LIMIT {
            return false;
        }
        window.push(now_ms);
        true
    }

    /// Recorded (unpruned) request counts per client, for diagnostics.
    pub fn request_counts(&self) -> HashMap<String, usize> {
        self.windows
            .iter()
            .map(|(client, times)| (client.clone(), times.len()))
            .collect()
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}
