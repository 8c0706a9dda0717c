//! # Execution Context
//!
//! Opaque key-value checkpoint object threaded through the item-stream
//! lifecycle (`open`/`update`/`close`). The surrounding batch framework owns
//! persistence of this data between runs; adapters only read restart state at
//! `open` and record progress at `update`, and never retain the context beyond
//! a single call.
//!
//! Values are stored as `serde_json::Value` so any serde-compatible type can
//! be checkpointed. A dirty flag tracks whether anything changed since the
//! last persistence point.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::error::{ItemStreamError, Result};

/// Key-value checkpoint state passed through lifecycle calls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionContext {
    entries: HashMap<String, Value>,
    #[serde(skip)]
    dirty: bool,
}

impl ExecutionContext {
    /// Create an empty execution context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a serializable value under `key`, marking the context dirty.
    pub fn put<T: Serialize>(&mut self, key: impl Into<String>, value: T) -> Result<()> {
        let key = key.into();
        let value = serde_json::to_value(value)
            .map_err(|e| ItemStreamError::context_value(key.clone(), e.to_string()))?;
        self.entries.insert(key, value);
        self.dirty = true;
        Ok(())
    }

    /// Store a raw JSON value under `key`, marking the context dirty.
    pub fn put_value(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
        self.dirty = true;
    }

    /// Fetch and deserialize the value under `key`.
    ///
    /// Returns `Ok(None)` when the key is absent and `ContextValue` when the
    /// stored value cannot deserialize into `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| ItemStreamError::context_value(key, e.to_string())),
        }
    }

    /// Fetch the raw JSON value under `key`.
    pub fn get_value(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove the value under `key`, marking the context dirty when something
    /// was actually removed.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let removed = self.entries.remove(key);
        if removed.is_some() {
            self.dirty = true;
        }
        removed
    }

    /// Iterate over the stored keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the context holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the context changed since the last `clear_dirty`.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Reset the dirty flag, typically after the framework persisted the
    /// context.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Remove all entries and mark the context dirty.
    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            self.dirty = true;
        }
        self.entries.clear();
    }
}
