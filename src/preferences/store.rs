//! Key-value preference storage.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{YearProgressError, YearProgressResult};

/// String-keyed preference storage.
///
/// A missing key means "not set", which is distinct from a stored falsy value.
pub trait PreferenceStore {
    /// Read the raw value stored under `key`.
    fn get(&self, key: &str) -> YearProgressResult<Option<String>>;

    /// Store a raw value under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> YearProgressResult<()>;

    /// Remove `key` entirely.
    fn remove(&mut self, key: &str) -> YearProgressResult<()>;
}

/// Encode `value` as JSON and store it under `key`.
pub fn write_json<S, T>(store: &mut S, key: &str, value: &T) -> YearProgressResult<()>
where
    S: PreferenceStore + ?Sized,
    T: Serialize + ?Sized,
{
    let text = serde_json::to_string(value).map_err(|e| YearProgressError::Storage(e.to_string()))?;
    store.set(key, &text)
}

/// Read and decode the JSON value stored under `key`.
///
/// Missing, empty and unreadable values are all reported as `None`; malformed
/// values are logged and treated as missing.
pub fn read_json<S, T>(store: &S, key: &str) -> Option<T>
where
    S: PreferenceStore + ?Sized,
    T: DeserializeOwned,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!("Failed to read preference {}: {}", key, e);
            return None;
        }
    };

    if raw.trim().is_empty() {
        return None;
    }

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            let err = YearProgressError::MalformedPreference {
                key: key.to_string(),
                reason: e.to_string(),
            };
            tracing::warn!("{}, falling back", err);
            None
        }
    }
}

/// In-memory preference store.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: HashMap<String, String>,
    writes: usize,
}

impl MemoryPreferenceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set` and `remove` calls made so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Whether a key is currently stored.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> YearProgressResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> YearProgressResult<()> {
        self.writes += 1;
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> YearProgressResult<()> {
        self.writes += 1;
        self.values.remove(key);
        Ok(())
    }
}
