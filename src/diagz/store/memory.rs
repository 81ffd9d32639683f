use super::KeyValueStore;
use crate::error::{GalleryError, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// In-memory key-value store for testing.
#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    simulate_unavailable: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every read and write fail, as a locked-down profile would.
    pub fn set_simulate_unavailable(&self, simulate: bool) {
        self.simulate_unavailable.set(simulate);
    }

    /// Write a raw value, bypassing any serialization done by callers.
    pub fn put_raw(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn check_available(&self) -> Result<()> {
        if self.simulate_unavailable.get() {
            return Err(GalleryError::Storage("Simulated unavailable store".to_string()));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.check_available()?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check_available()?;
        self.put_raw(key, value);
        Ok(())
    }
}
