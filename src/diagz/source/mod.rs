//! # Catalog sources
//!
//! Two interchangeable adapters produce the same `Vec<Diagram>`:
//!
//! - [`local::LocalRegistrySource`]: the static `diagram-registry.json` plus an
//!   image folder, on disk or behind a web root.
//! - [`remote::RemoteRepositorySource`]: a CMIS document repository behind
//!   OAuth2 client credentials.
//!
//! Exactly one of them serves a catalog read. [`select_source`] makes the
//! choice from configuration alone and is evaluated on every read, so a config
//! change is picked up by the next read without rebuilding anything.

use crate::config::GalleryConfig;
use crate::model::Diagram;
use std::fmt;

pub mod auth;
pub mod local;
pub mod remote;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Local,
    Remote,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Local => f.write_str("local registry"),
            SourceKind::Remote => f.write_str("remote repository"),
        }
    }
}

pub fn is_configured(config: &GalleryConfig) -> bool {
    config.remote.is_configured()
}

pub fn select_source(config: &GalleryConfig) -> SourceKind {
    if is_configured(config) {
        SourceKind::Remote
    } else {
        SourceKind::Local
    }
}

/// The URL a viewer should load: the pre-resolved one when the source set it,
/// otherwise the local image path.
pub fn resolve_image_url(diagram: &Diagram, local: &local::LocalRegistrySource) -> String {
    match &diagram.image_url {
        Some(url) => url.clone(),
        None => local.image_url(diagram),
    }
}
