use crate::tone::ToneSelection;
use std::collections::{HashMap, VecDeque};

/// Maximum number of cached rewrites.
pub const CACHE_CAPACITY: usize = 1000;
/// How many characters of the source text participate in the cache key.
pub const CACHE_KEY_PREFIX_CHARS: usize = 100;

/// Cache key: truncated text prefix plus the serialized tone selection.
/// Texts sharing their first 100 characters and tone collide on purpose.
pub fn cache_key(text: &str, tone: ToneSelection) -> String {
    let prefix: String = text.chars().take(CACHE_KEY_PREFIX_CHARS).collect();
    format!("{prefix}-{}", tone.key_fragment())
}

/// Bounded rewrite cache with approximate-oldest eviction.
///
/// Insertion order is tracked for keys on their first insert only; a re-put
/// overwrites the value but keeps the key's original position, so eviction
/// removes the oldest-inserted-still-present entry. This approximates FIFO,
/// not LRU — recency of access never affects eviction order.
#[derive(Debug, Default)]
pub struct ResponseCache {
    entries: HashMap<String, String>,
    order: VecDeque<String>,
    capacity: usize,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::with_capacity(CACHE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Unconditional overwrite. If the insertion pushes the cache past
    /// capacity, exactly one entry is evicted.
    pub fn put(&mut self, key: String, value: String) {
        if self.entries.insert(key.clone(), value).is_none() {
            self.order.push_back(key);
        }
        if self.entries.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
