use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use nlmodel_core::cache_key;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::CacheError;
use crate::store::TextCache;

/// [`TextCache`] with per-key mutual exclusion.
///
/// Concurrent callers asking for the same key are serialized: the first one
/// computes and persists, the others block and then read the stored entry.
/// Callers for different keys do not wait on each other.
#[derive(Debug)]
pub struct SharedTextCache {
    inner: TextCache,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl SharedTextCache {
    #[must_use]
    pub fn new(inner: TextCache) -> Self {
        Self {
            inner,
            locks: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub const fn inner(&self) -> &TextCache {
        &self.inner
    }

    /// Same contract as [`TextCache::lookup_or_compute`], safe to call from
    /// several threads at once.
    pub fn lookup_or_compute<T, E, F>(&self, text: &str, compute: F) -> Result<Vec<T>, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&str) -> Result<Vec<T>, E>,
        E: From<CacheError>,
    {
        let key = cache_key(text);
        let key_lock = self.key_lock(&key);

        let outcome = {
            let _guard = key_lock.lock().unwrap_or_else(PoisonError::into_inner);
            self.inner.lookup_or_compute(text, compute)
        };

        self.release(&key, key_lock);
        outcome
    }

    fn key_lock(&self, key: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(key.to_string()).or_default())
    }

    fn release(&self, key: &str, key_lock: Arc<Mutex<()>>) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        // Only the map and this caller hold the lock: nobody else is waiting on it.
        let last = Arc::strong_count(&key_lock) == 2;
        // Give up our handle while the map is still locked so a concurrent
        // release for the same key sees the final count.
        drop(key_lock);
        if last {
            locks.remove(key);
            debug!("Released key lock for {key}");
        }
    }

    #[cfg(test)]
    fn tracked_keys(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
