//! # Configuration
//!
//! Configuration is loaded with [`confique`], layering environment variables
//! over an optional TOML file over compiled defaults.
//!
//! ## Resolution order
//!
//! 1. **Environment variables**: `DIAGZ_REGISTRY_ROOT`, `DIAGZ_DMS_API_URL`, ...
//! 2. **Config file**: `diagz.toml` in the OS config directory, or in
//!    `$DIAGZ_HOME` when that is set.
//! 3. **Compiled defaults**.
//!
//! ## Available settings
//!
//! | Key | Env | Default |
//! |-----|-----|---------|
//! | `registry.root` | `DIAGZ_REGISTRY_ROOT` | `.` |
//! | `registry.file` | `DIAGZ_REGISTRY_FILE` | `diagram-registry.json` |
//! | `registry.image_dir` | `DIAGZ_IMAGE_DIR` | `png_files` |
//! | `remote.api_url` | `DIAGZ_DMS_API_URL` | - |
//! | `remote.client_id` | `DIAGZ_DMS_CLIENT_ID` | - |
//! | `remote.client_secret` | `DIAGZ_DMS_CLIENT_SECRET` | - |
//! | `remote.token_url` | `DIAGZ_DMS_XSUAA_URL` | - |
//! | `remote.repository_id` | `DIAGZ_DMS_REPOSITORY_ID` | - |
//!
//! The remote repository is used whenever the first four remote settings are
//! all present and non-empty; otherwise the local registry is read.

use crate::error::{GalleryError, Result};
use confique::Config;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "diagz.toml";

#[derive(Config, Debug, Clone, PartialEq, Eq)]
pub struct GalleryConfig {
    #[config(nested)]
    pub registry: RegistryConfig,

    #[config(nested)]
    pub remote: RemoteConfig,
}

/// Where the static registry document and its images live.
#[derive(Config, Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Directory or http(s) base URL holding the registry and image folder.
    #[config(env = "DIAGZ_REGISTRY_ROOT", default = ".")]
    pub root: String,

    #[config(env = "DIAGZ_REGISTRY_FILE", default = "diagram-registry.json")]
    pub file: String,

    #[config(env = "DIAGZ_IMAGE_DIR", default = "png_files")]
    pub image_dir: String,
}

/// Remote document repository access (OAuth2 client credentials).
#[derive(Config, Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    #[config(env = "DIAGZ_DMS_API_URL")]
    pub api_url: Option<String>,

    #[config(env = "DIAGZ_DMS_CLIENT_ID")]
    pub client_id: Option<String>,

    #[config(env = "DIAGZ_DMS_CLIENT_SECRET")]
    pub client_secret: Option<String>,

    /// Token issuer base URL; `/oauth/token` is appended.
    #[config(env = "DIAGZ_DMS_XSUAA_URL")]
    pub token_url: Option<String>,

    #[config(env = "DIAGZ_DMS_REPOSITORY_ID")]
    pub repository_id: Option<String>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            registry: RegistryConfig::default(),
            remote: RemoteConfig::default(),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            root: ".".to_string(),
            file: "diagram-registry.json".to_string(),
            image_dir: "png_files".to_string(),
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            client_id: None,
            client_secret: None,
            token_url: None,
            repository_id: None,
        }
    }
}

fn non_empty(value: &Option<String>) -> &str {
    value.as_deref().map(str::trim).unwrap_or_default()
}

impl RemoteConfig {
    pub fn is_configured(&self) -> bool {
        !self.api_url().is_empty()
            && !self.client_id().is_empty()
            && !self.client_secret().is_empty()
            && !self.token_url().is_empty()
    }

    pub fn api_url(&self) -> &str {
        non_empty(&self.api_url).trim_end_matches('/')
    }

    pub fn client_id(&self) -> &str {
        non_empty(&self.client_id)
    }

    pub fn client_secret(&self) -> &str {
        non_empty(&self.client_secret)
    }

    pub fn token_url(&self) -> &str {
        non_empty(&self.token_url).trim_end_matches('/')
    }

    pub fn repository_id(&self) -> &str {
        non_empty(&self.repository_id)
    }
}

impl GalleryConfig {
    /// Load from environment and `dir/diagz.toml` (missing file is fine).
    pub fn load(dir: &Path) -> Result<Self> {
        GalleryConfig::builder()
            .env()
            .file(config_file(dir))
            .load()
            .map_err(|e| GalleryError::Config(e.to_string()))
    }
}

pub fn config_file(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE_NAME)
}
