//! # Diagz Architecture
//!
//! Diagz is a **diagram gallery library** with a command-line client. It reads a
//! catalog of versioned diagram images from one of two sources, lets a user
//! browse, search and annotate them, and fetches the images themselves.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs, print.rs)                     │
//! │  - Parses arguments, renders the gallery, exit codes        │
//! │  - The ONLY place that knows about stdout/stderr            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Picks the source per read, loads the catalog             │
//! │  - Owns the token cache and the description store           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs, catalog.rs)                  │
//! │  - Operates on a loaded Vec<Diagram>, returns CmdResult     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Sources (source/)             Infrastructure               │
//! │  - LocalRegistrySource         - http.rs: HttpClient trait  │
//! │  - RemoteRepositorySource      - store/: KeyValueStore      │
//! │                                - clock.rs: Clock trait      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Source selection
//!
//! When all remote repository settings are present the remote source serves
//! every read; otherwise the local registry does. The check runs on each read
//! (see [`source::select_source`]).
//!
//! ## Failure policy
//!
//! Catalog reads either return the whole filtered catalog or fail with
//! [`error::GalleryError::Fetch`] / [`error::GalleryError::Auth`]. A document
//! whose name cannot be parsed is dropped from the listing, and a broken or
//! missing description store reads as "no descriptions". Neither reaches the
//! caller.
//!
//! ## Testing Strategy
//!
//! Network, clock and storage are all behind traits. Unit tests use
//! `test_utils::MockHttpClient`, `test_utils::ManualClock` and
//! `store::memory::MemoryStore`; the binary is covered by `tests/` using a
//! registry written to a temporary directory.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Operations over a loaded catalog
//! - [`catalog`]: Grouping, search and lookup
//! - [`source`]: Local registry and remote repository sources
//! - [`descriptions`]: User description overrides
//! - [`store`]: Client-local key-value storage
//! - [`model`]: `Diagram` and `DiagramRegistry`
//! - [`config`]: Layered configuration
//! - [`http`]: Transport trait and resource locations
//! - [`launcher`]: Handing an image to the system viewer
//! - [`error`]: Error types

pub mod api;
pub mod catalog;
pub mod clock;
pub mod commands;
pub mod config;
pub mod descriptions;
pub mod error;
pub mod http;
pub mod launcher;
pub mod model;
pub mod source;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
