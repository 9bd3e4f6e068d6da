//! Durable TTL cache backing expensive external lookups.
//!
//! One JSON document per namespace, loaded fully on first touch and rewritten
//! fully on every mutation; the last full write wins. Entries that carry no
//! signal are never persisted: a cache must not durably remember "found
//! nothing", since that may reflect a transient failure rather than a true
//! negative.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::errors::AuditError;
use crate::types::CacheKey;

pub use crate::hash::key_for_materials as cache_key;

/// Payload types admissible into the cache.
pub trait CachePayload: Serialize + DeserializeOwned {
    /// `true` when the payload carries signal worth remembering.
    fn has_signal(&self) -> bool;
}

impl<T: Serialize + DeserializeOwned> CachePayload for Vec<T> {
    fn has_signal(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Serialize + DeserializeOwned> CachePayload for Option<T> {
    fn has_signal(&self) -> bool {
        self.is_some()
    }
}

impl<V: Serialize + DeserializeOwned> CachePayload for HashMap<String, V> {
    fn has_signal(&self) -> bool {
        !self.is_empty()
    }
}

/// Cache read result; `refreshed` is `true` when the compute ran.
#[derive(Clone, Debug)]
pub struct Lookup<T> {
    /// The payload, cached or freshly computed.
    pub value: T,
    /// Whether an external compute was performed for this lookup.
    pub refreshed: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct PersistedEntry {
    recorded_at: DateTime<Utc>,
    payload: Value,
}

type Document = HashMap<CacheKey, PersistedEntry>;

/// TTL-keyed cache persisted as one JSON document per namespace.
pub struct ResultCache {
    dir: PathBuf,
    namespaces: Mutex<HashMap<String, Document>>,
}

impl ResultCache {
    /// Open a cache rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, AuditError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            namespaces: Mutex::new(HashMap::new()),
        })
    }

    /// Serve `key` from the namespace, or run `compute` and remember it.
    ///
    /// An entry is served while younger than `ttl_days` (day granularity) and
    /// still parseable as `T` with signal. Expired, unparseable, and
    /// signal-free entries are evicted before `compute` runs. A freshly
    /// computed payload is persisted only when it has signal.
    pub fn get_or_compute<T, F>(
        &self,
        namespace: &str,
        key: &CacheKey,
        ttl_days: i64,
        compute: F,
    ) -> Result<Lookup<T>, AuditError>
    where
        T: CachePayload,
        F: FnOnce() -> Result<T, AuditError>,
    {
        self.get_or_compute_at(namespace, key, ttl_days, Utc::now(), compute)
    }

    /// `get_or_compute` against an explicit clock; the public entry point
    /// always passes the current instant.
    fn get_or_compute_at<T, F>(
        &self,
        namespace: &str,
        key: &CacheKey,
        ttl_days: i64,
        now: DateTime<Utc>,
        compute: F,
    ) -> Result<Lookup<T>, AuditError>
    where
        T: CachePayload,
        F: FnOnce() -> Result<T, AuditError>,
    {
        if let Some(value) = self.lookup_valid(namespace, key, ttl_days, now)? {
            return Ok(Lookup {
                value,
                refreshed: false,
            });
        }

        let value = compute()?;
        if value.has_signal() {
            self.insert(namespace, key, now, &value)?;
        }
        Ok(Lookup {
            value,
            refreshed: true,
        })
    }

    /// Write an entry with an explicit timestamp (backfill and test surface).
    pub fn seed_entry<T: CachePayload>(
        &self,
        namespace: &str,
        key: &CacheKey,
        recorded_at: DateTime<Utc>,
        payload: &T,
    ) -> Result<(), AuditError> {
        self.insert(namespace, key, recorded_at, payload)
    }

    /// Number of live entries in a namespace.
    pub fn len(&self, namespace: &str) -> usize {
        let mut namespaces = self.namespaces.lock().expect("cache state poisoned");
        Self::load_namespace(&self.dir, &mut namespaces, namespace).len()
    }

    /// `true` when the namespace holds no entries.
    pub fn is_empty(&self, namespace: &str) -> bool {
        self.len(namespace) == 0
    }

    fn lookup_valid<T: CachePayload>(
        &self,
        namespace: &str,
        key: &CacheKey,
        ttl_days: i64,
        now: DateTime<Utc>,
    ) -> Result<Option<T>, AuditError> {
        let mut namespaces = self.namespaces.lock().expect("cache state poisoned");
        let document = Self::load_namespace(&self.dir, &mut namespaces, namespace);
        let Some(entry) = document.get(key) else {
            return Ok(None);
        };

        let expired = (now - entry.recorded_at).num_days() >= ttl_days;
        let payload = entry.payload.clone();
        match serde_json::from_value::<T>(payload) {
            Ok(value) if !expired && value.has_signal() => return Ok(Some(value)),
            Ok(value) if !value.has_signal() => {
                debug!(namespace, key = %key, "evicting signal-free cache entry");
            }
            Ok(_) => {
                debug!(namespace, key = %key, "evicting expired cache entry");
            }
            Err(error) => {
                warn!(namespace, key = %key, %error, "evicting unparseable cache entry");
            }
        }

        document.remove(key);
        let snapshot = document.clone();
        drop(namespaces);
        self.write_document(namespace, &snapshot)?;
        Ok(None)
    }

    fn insert<T: CachePayload>(
        &self,
        namespace: &str,
        key: &CacheKey,
        recorded_at: DateTime<Utc>,
        payload: &T,
    ) -> Result<(), AuditError> {
        let value = serde_json::to_value(payload)
            .map_err(|error| AuditError::CacheStore(error.to_string()))?;
        let mut namespaces = self.namespaces.lock().expect("cache state poisoned");
        let document = Self::load_namespace(&self.dir, &mut namespaces, namespace);
        document.insert(
            key.clone(),
            PersistedEntry {
                recorded_at,
                payload: value,
            },
        );
        let snapshot = document.clone();
        drop(namespaces);
        self.write_document(namespace, &snapshot)
    }

    fn load_namespace<'a>(
        dir: &Path,
        namespaces: &'a mut HashMap<String, Document>,
        namespace: &str,
    ) -> &'a mut Document {
        namespaces
            .entry(namespace.to_string())
            .or_insert_with(|| {
                let path = dir.join(format!("{namespace}.json"));
                match fs::read(&path) {
                    Ok(bytes) => match serde_json::from_slice(&bytes) {
                        Ok(document) => document,
                        Err(error) => {
                            // Corrupted document: recover by recomputing.
                            warn!(namespace, %error, "cache document unreadable, starting empty");
                            Document::new()
                        }
                    },
                    Err(_) => Document::new(),
                }
            })
    }

    fn write_document(&self, namespace: &str, document: &Document) -> Result<(), AuditError> {
        let path = self.dir.join(format!("{namespace}.json"));
        let bytes = serde_json::to_vec(document)
            .map_err(|error| AuditError::CacheStore(error.to_string()))?;
        let mut file = NamedTempFile::new_in(&self.dir)?;
        file.write_all(&bytes)?;
        file.persist(&path)
            .map_err(|error| AuditError::CacheStore(error.to_string()))?;
        Ok(())
    }
}
