//! Named-slot key-value backends.

use std::cell::Cell;
use std::collections::HashMap;

use crate::store::{StoreError, StoreResult};

/// A local key-value store holding text under named slots.
///
/// This is the durable boundary the note store sits on. Any backend that
/// can read and replace a string by key (a directory of files, an embedded
/// database, an in-process map) can hold the note collection.
pub trait SlotBackend {
    /// Reads the value stored under `key`, or `None` if the slot is empty.
    fn read(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replaces the value stored under `key`.
    fn write(&mut self, key: &str, value: &str) -> StoreResult<()>;
}

impl<B: SlotBackend + ?Sized> SlotBackend for Box<B> {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> StoreResult<()> {
        (**self).write(key, value)
    }
}

/// In-process backend.
///
/// Writes can be made to fail on demand, which lets callers exercise the
/// write-failure path without a real full disk.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    slots: HashMap<String, String>,
    fail_writes: Cell<bool>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend with `value` already stored under `key`.
    pub fn with_slot(key: &str, value: impl Into<String>) -> Self {
        let mut backend = Self::default();
        backend.slots.insert(key.to_string(), value.into());
        backend
    }

    /// Makes every following write fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Returns the raw text stored under `key`.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }
}

impl SlotBackend for MemoryBackend {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> StoreResult<()> {
        if self.fail_writes.get() {
            return Err(StoreError::Write {
                slot: key.to_string(),
                reason: "memory backend is read-only".to_string(),
            });
        }
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
