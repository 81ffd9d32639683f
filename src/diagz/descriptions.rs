//! # Description overrides
//!
//! Users can attach their own description to any diagram. Overrides are kept
//! in the client-local [`KeyValueStore`] under one fixed key as a JSON object
//! mapping diagram id to text, and take precedence over whatever the registry
//! says.
//!
//! Storage problems never reach the caller. A store that cannot be read, or a
//! stored document that is not a JSON object of strings, is treated as "no
//! overrides" and logged. [`DescriptionStore::read_all`] exposes the typed
//! outcome for callers that want to tell the cases apart.

use crate::error::{GalleryError, Result};
use crate::store::KeyValueStore;
use std::collections::BTreeMap;
use tracing::warn;

pub const DESCRIPTION_STORAGE_KEY: &str = "diagram-descriptions";

pub type Descriptions = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredDescriptions {
    Loaded(Descriptions),
    /// Nothing has been saved yet.
    Missing,
    /// The stored value could not be decoded.
    Corrupt(String),
    /// The store itself failed.
    Unavailable(String),
}

impl StoredDescriptions {
    /// Empty-map-on-failure policy.
    pub fn into_map(self) -> Descriptions {
        match self {
            StoredDescriptions::Loaded(map) => map,
            StoredDescriptions::Missing => Descriptions::new(),
            StoredDescriptions::Corrupt(reason) => {
                warn!(%reason, "Stored descriptions are corrupt, ignoring them");
                Descriptions::new()
            }
            StoredDescriptions::Unavailable(reason) => {
                warn!(%reason, "Description store unavailable");
                Descriptions::new()
            }
        }
    }
}

pub struct DescriptionStore<K: KeyValueStore> {
    store: K,
}

impl<K: KeyValueStore> DescriptionStore<K> {
    pub fn new(store: K) -> Self {
        Self { store }
    }

    pub fn read_all(&self) -> StoredDescriptions {
        let raw = match self.store.get(DESCRIPTION_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return StoredDescriptions::Missing,
            Err(e) => return StoredDescriptions::Unavailable(e.to_string()),
        };
        if raw.trim().is_empty() {
            return StoredDescriptions::Missing;
        }
        match serde_json::from_str::<Descriptions>(&raw) {
            Ok(map) => StoredDescriptions::Loaded(map),
            Err(e) => StoredDescriptions::Corrupt(e.to_string()),
        }
    }

    pub fn load_all(&self) -> Descriptions {
        self.read_all().into_map()
    }

    /// The override for `id`. Empty text counts as no override.
    pub fn load(&self, id: &str) -> Option<String> {
        self.load_all().remove(id).filter(|text| !text.is_empty())
    }

    /// Merge `text` into the stored overrides. Returns whether it was persisted;
    /// failures are logged, not raised.
    pub fn save(&self, id: &str, text: &str) -> bool {
        match self.try_save(id, text) {
            Ok(()) => true,
            Err(e) => {
                warn!(diagram = id, error = %e, "Failed to save description");
                false
            }
        }
    }

    fn try_save(&self, id: &str, text: &str) -> Result<()> {
        let mut descriptions = match self.read_all() {
            StoredDescriptions::Unavailable(reason) => {
                return Err(GalleryError::Storage(reason));
            }
            other => other.into_map(),
        };
        descriptions.insert(id.to_string(), text.to_string());
        let serialized = serde_json::to_string(&descriptions)?;
        self.store.set(DESCRIPTION_STORAGE_KEY, &serialized)
    }
}
