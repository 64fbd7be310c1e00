//! Response caching for the RUIAN client
//!
//! The cache is an injected key-value collaborator with per-entry expiry;
//! the client only derives keys, stores successful response bodies, and
//! reads them back. Errors are never cached. If the embedding application
//! is multi-threaded, safe concurrent access is the store's job.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;

/// Prefix applied to every key this client writes
pub const CACHE_NAMESPACE: &str = "ruian:";

/// Key-value store with expiry, supplied by the embedding application
///
/// Implementations may be backed by memory, files, or a distributed
/// cache; [`MemoryCache`] is the bundled reference implementation.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Read a value; expired or missing entries read as `None`.
    async fn load(&self, key: &str) -> Option<String>;

    /// Store a value that expires after `ttl`.
    async fn save(&self, key: &str, value: String, ttl: Duration);

    /// Remove every entry whose key starts with `prefix`.
    async fn clear(&self, prefix: &str);
}

/// Derive the cache key for an endpoint call.
///
/// The key is the namespaced lowercase hex SHA-256 of
/// `endpoint + "|" + k1=v1&k2=v2...` with parameters sorted by key, so
/// the key does not depend on parameter insertion order.
pub fn cache_key(endpoint: &str, params: &[(String, String)]) -> String {
    let mut sorted = params.to_vec();
    sorted.sort();

    let mut material = String::from(endpoint);
    material.push('|');
    for (i, (key, value)) in sorted.iter().enumerate() {
        if i > 0 {
            material.push('&');
        }
        material.push_str(key);
        material.push('=');
        material.push_str(value);
    }

    let digest = Sha256::digest(material.as_bytes());
    format!("{}{}", CACHE_NAMESPACE, hex::encode(digest))
}

/// In-memory [`CacheStore`] with per-entry expiry
///
/// Entries past their deadline read as absent and are dropped on the
/// next lookup.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

impl MemoryCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn load(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some((value, deadline)) if *deadline > Instant::now() => Some(value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    async fn save(&self, key: &str, value: String, ttl: Duration) {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), (value, Instant::now() + ttl));
    }

    async fn clear(&self, prefix: &str) {
        let mut entries = self.entries.lock().await;
        entries.retain(|key, _| !key.starts_with(prefix));
    }
}
