//! # Client-local storage
//!
//! User annotations live in a small key-value store owned by this client
//! installation. Each key holds one serialized document; nothing is shared
//! across machines.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: one `{key}.json` file per key under the data directory.
//!   Writes go to a temporary file first and are renamed into place.
//! - [`memory::MemoryStore`]: in-memory map for tests.
//!
//! ## Storage format
//!
//! ```text
//! ~/.local/share/diagz/
//! ├── diagram-descriptions.json   # {"<diagram id>": "<description>"}
//! └── diagz.toml                  # optional, when DIAGZ_HOME is used
//! ```

use crate::error::Result;

pub mod fs;
pub mod memory;

/// Abstract key-value persistence.
///
/// All methods take `&self`; the CLI is single-threaded and the in-memory
/// implementation uses interior mutability.
pub trait KeyValueStore {
    /// Raw value for `key`, `Ok(None)` when it was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value for `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
