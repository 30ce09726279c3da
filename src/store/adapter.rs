//! JSON storage adapter.
//!
//! Every value lives under one well-known key as a single JSON document.
//! Reads go through a short-lived cache so repeated lookups inside one
//! interaction burst (dashboard recomputes, filter changes) do not hit the
//! backend each time. The cache is a latency optimization, not a
//! consistency mechanism: every successful write refreshes the entry for
//! its key, so a reader never sees data older than the latest write.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::backend::StorageBackend;
use super::keys;
use crate::error::StorageError;

/// How long a cached read stays fresh.
pub const CACHE_FRESHNESS: Duration = Duration::from_millis(5000);

struct CacheEntry {
    value: serde_json::Value,
    fetched_at: Instant,
}

pub struct StorageAdapter {
    backend: Box<dyn StorageBackend>,
    cache: RwLock<HashMap<String, CacheEntry>>,
    freshness: Duration,
}

impl StorageAdapter {
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Self::with_freshness(backend, CACHE_FRESHNESS)
    }

    pub fn with_freshness(backend: Box<dyn StorageBackend>, freshness: Duration) -> Self {
        Self {
            backend,
            cache: RwLock::new(HashMap::new()),
            freshness,
        }
    }

    /// Serializes `value` and writes it under `key`. The backend capacity
    /// is probed with a throwaway write first so a full store fails before
    /// anything is overwritten. Fails closed; never panics.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let value = serde_json::to_value(value).map_err(|source| StorageError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.backend.probe()?;
        self.backend.write(key, &value.to_string())?;

        let mut cache = self.cache.write().unwrap();
        cache.insert(
            key.to_string(),
            CacheEntry {
                value,
                fetched_at: Instant::now(),
            },
        );
        Ok(())
    }

    /// Returns the value stored under `key`, or `default` when the key is
    /// absent, empty, unreadable or does not parse. Corrupted data is
    /// reported through the log, never as an error.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        if let Some(value) = self.fresh_cached_value(key) {
            match serde_json::from_value(value) {
                Ok(parsed) => return parsed,
                Err(err) => {
                    warn!("cached data for '{key}' does not match the expected shape: {err}");
                }
            }
        }

        let raw = match self.backend.read(key) {
            Ok(Some(raw)) if !raw.trim().is_empty() => raw,
            Ok(_) => return default,
            Err(err) => {
                warn!("failed to read '{key}' from storage: {err}");
                return default;
            }
        };

        let value: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!("stored data for '{key}' is corrupted: {err}");
                return default;
            }
        };

        match serde_json::from_value(value.clone()) {
            Ok(parsed) => {
                let mut cache = self.cache.write().unwrap();
                cache.insert(
                    key.to_string(),
                    CacheEntry {
                        value,
                        fetched_at: Instant::now(),
                    },
                );
                parsed
            }
            Err(err) => {
                warn!("stored data for '{key}' is corrupted: {err}");
                default
            }
        }
    }

    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.backend.delete(key)?;
        self.cache.write().unwrap().remove(key);
        Ok(())
    }

    /// Removes every well-known key.
    pub fn clear(&self) -> Result<(), StorageError> {
        for key in keys::ALL {
            self.backend.delete(key)?;
        }
        self.cache.write().unwrap().clear();
        Ok(())
    }

    pub fn exists(&self, key: &str) -> bool {
        matches!(self.backend.read(key), Ok(Some(_)))
    }

    fn fresh_cached_value(&self, key: &str) -> Option<serde_json::Value> {
        let cache = self.cache.read().unwrap();
        cache
            .get(key)
            .filter(|entry| entry.fetched_at.elapsed() < self.freshness)
            .map(|entry| entry.value.clone())
    }
}
