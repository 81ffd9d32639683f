//! # API Facade
//!
//! [`GalleryApi`] is the single entry point for every gallery operation. It
//! owns the pieces that must outlive one call:
//!
//! - the configuration, consulted on every catalog read to pick a source
//! - both sources, so the remote token cache survives between reads
//! - the description store and the HTTP client
//!
//! Each method loads the catalog from the selected source and hands it to the
//! matching function in `commands/`. Nothing here prints or exits.
//!
//! ## Generic over storage and transport
//!
//! `GalleryApi<K: KeyValueStore, H: HttpClient>`:
//! - Production: `GalleryApi<FileStore, ReqwestClient>`
//! - Testing: `GalleryApi<MemoryStore, MockHttpClient>`

use crate::clock::{Clock, SystemClock};
use crate::commands::{self, CmdResult, GalleryPaths};
use crate::config::GalleryConfig;
use crate::descriptions::DescriptionStore;
use crate::error::Result;
use crate::http::HttpClient;
use crate::model::Diagram;
use crate::source::local::LocalRegistrySource;
use crate::source::remote::RemoteRepositorySource;
use crate::source::{select_source, SourceKind};
use crate::store::KeyValueStore;
use std::path::Path;
use std::rc::Rc;
use tracing::debug;

pub struct GalleryApi<K: KeyValueStore, H: HttpClient> {
    config: GalleryConfig,
    local: LocalRegistrySource,
    remote: RemoteRepositorySource,
    descriptions: DescriptionStore<K>,
    http: H,
    paths: GalleryPaths,
    clock: Rc<dyn Clock>,
}

impl<K: KeyValueStore, H: HttpClient> GalleryApi<K, H> {
    pub fn new(config: GalleryConfig, store: K, http: H, paths: GalleryPaths) -> Self {
        Self::with_clock(config, store, http, paths, Rc::new(SystemClock))
    }

    pub fn with_clock(
        config: GalleryConfig,
        store: K,
        http: H,
        paths: GalleryPaths,
        clock: Rc<dyn Clock>,
    ) -> Self {
        Self {
            local: LocalRegistrySource::new(&config.registry),
            remote: RemoteRepositorySource::with_clock(
                config.remote.clone(),
                Box::new(clock.clone()),
            ),
            config,
            descriptions: DescriptionStore::new(store),
            http,
            paths,
            clock,
        }
    }

    /// Swap configuration. The remote source, and with it the cached token,
    /// is only rebuilt when the remote settings actually changed.
    pub fn set_config(&mut self, config: GalleryConfig) {
        self.local = LocalRegistrySource::new(&config.registry);
        if config.remote != self.config.remote {
            self.remote = RemoteRepositorySource::with_clock(
                config.remote.clone(),
                Box::new(self.clock.clone()),
            );
        }
        self.config = config;
    }

    pub fn source_kind(&self) -> SourceKind {
        select_source(&self.config)
    }

    /// One catalog read from whichever source the current config selects.
    pub fn load_catalog(&self) -> Result<Vec<Diagram>> {
        let kind = self.source_kind();
        debug!(source = %kind, "Loading catalog");
        match kind {
            SourceKind::Local => self.local.load_catalog(&self.http, &self.descriptions),
            SourceKind::Remote => self.remote.list_diagrams(&self.http),
        }
    }

    pub fn list_diagrams(&self, term: Option<&str>) -> Result<CmdResult> {
        let catalog = self.load_catalog()?;
        Ok(commands::list::run(catalog, term))
    }

    pub fn view_diagram(&self, id: &str) -> Result<CmdResult> {
        let catalog = self.load_catalog()?;
        commands::view::run(&catalog, id, &self.descriptions, &self.local)
    }

    pub fn describe_diagram(&self, id: &str, text: &str) -> Result<CmdResult> {
        let catalog = self.load_catalog()?;
        commands::describe::run(&catalog, id, text, &self.descriptions)
    }

    pub fn download_diagram(
        &self,
        id: &str,
        version: Option<&str>,
        dest: Option<&Path>,
    ) -> Result<CmdResult> {
        let catalog = self.load_catalog()?;
        commands::download::run(&self.http, &catalog, id, version, dest, &self.local)
    }

    pub fn open_target(&self, id: &str, version: Option<&str>) -> Result<CmdResult> {
        let catalog = self.load_catalog()?;
        commands::open::run(&catalog, id, version, &self.local)
    }

    pub fn source_info(&self) -> CmdResult {
        commands::source::run(&self.config, &self.local, &self.paths)
    }
}

pub use commands::{CmdMessage, DiagramDetail, MessageLevel, SourceInfo, VersionEntry};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RegistryConfig, RemoteConfig};
    use crate::store::memory::MemoryStore;
    use crate::test_utils::{ManualClock, MockHttpClient};
    use chrono::Duration;
    use std::path::PathBuf;

    const REGISTRY: &str = r#"{"nextId":3,"version":"1","created":"","lastUpdated":"",
        "diagrams":{
          "2":{"id":"2","name":"Ops","currentVersion":"v1","currentPngFile":"2_Ops_v1.svg",
               "category":"Operations","versions":["v1"],"status":"active"},
          "1":{"id":"1","name":"Ledger","currentVersion":"v2","currentPngFile":"1_Ledger_v2.svg",
               "category":"Finance","versions":["v2","v1"],"status":"active"}
        }}"#;

    const LISTING: &str = r#"{"objects":[
        {"succinctProperties":{"cmis:objectId":"o1","cmis:name":"5_Cloud_v3.svg",
         "cmis:creationDate":0,"cmis:lastModificationDate":0}}]}"#;

    fn paths() -> GalleryPaths {
        GalleryPaths {
            data_dir: PathBuf::from("/data"),
            config_dir: PathBuf::from("/config"),
        }
    }

    fn local_config() -> GalleryConfig {
        GalleryConfig {
            registry: RegistryConfig {
                root: "https://site".into(),
                ..Default::default()
            },
            remote: RemoteConfig::default(),
        }
    }

    fn remote_config() -> GalleryConfig {
        GalleryConfig {
            remote: RemoteConfig {
                api_url: Some("https://dms".into()),
                client_id: Some("id".into()),
                client_secret: Some("secret".into()),
                token_url: Some("https://auth".into()),
                repository_id: Some("r".into()),
            },
            ..local_config()
        }
    }

    fn api(config: GalleryConfig) -> GalleryApi<MemoryStore, MockHttpClient> {
        GalleryApi::new(config, MemoryStore::new(), MockHttpClient::new(), paths())
    }

    #[test]
    fn local_catalog_is_enriched() {
        let api = api(local_config());
        api.http.push_json(REGISTRY);

        let catalog = api.load_catalog().unwrap();
        assert_eq!(catalog[0].id, "1");
        assert_eq!(catalog[0].versions, vec!["v1", "v2"]);
        assert_eq!(catalog[0].description.as_deref(), Some("Finance"));
        assert!(catalog[0].version_urls.is_some());
    }

    #[test]
    fn remote_catalog_used_when_configured() {
        let api = api(remote_config());
        api.http.push_token("tok", 3600);
        api.http.push_json(LISTING);

        let result = api.list_diagrams(None).unwrap();
        assert_eq!(result.listed_diagrams.len(), 1);
        assert_eq!(result.groups[0].category, "General");
        assert_eq!(api.http.requests()[0].url, "https://auth/oauth/token");
    }

    #[test]
    fn describe_then_view_shows_description() {
        let api = api(local_config());
        api.http.push_json(REGISTRY);
        api.http.push_json(REGISTRY);

        api.describe_diagram("2", "Runbooks").unwrap();
        let detail = api.view_diagram("2").unwrap().detail.unwrap();
        assert_eq!(detail.description, "Runbooks");
        assert_eq!(detail.image_url, "https://site/png_files/2_Ops_v1.svg");
    }

    #[test]
    fn failed_read_propagates() {
        let api = api(local_config());
        api.http.push_status(503, "Service Unavailable", "");
        let err = api.list_diagrams(None).unwrap_err();
        assert!(err.is_retryable());
    }

    #[test]
    fn config_change_switches_source_on_next_read() {
        let mut api = api(local_config());
        assert_eq!(api.source_kind(), SourceKind::Local);
        api.set_config(remote_config());
        assert_eq!(api.source_kind(), SourceKind::Remote);

        api.http.push_token("tok", 3600);
        api.http.push_json(LISTING);
        assert_eq!(api.load_catalog().unwrap()[0].id, "5");
    }

    #[test]
    fn unchanged_remote_settings_keep_cached_token() {
        let clock = Rc::new(ManualClock::new());
        let mut api = GalleryApi::with_clock(
            remote_config(),
            MemoryStore::new(),
            MockHttpClient::new(),
            paths(),
            clock.clone(),
        );
        api.http.push_token("tok", 3600);
        api.http.push_json(LISTING);
        api.http.push_json(LISTING);

        api.load_catalog().unwrap();
        let mut same_remote = remote_config();
        same_remote.registry.root = "/elsewhere".into();
        api.set_config(same_remote);
        clock.advance(Duration::minutes(10));
        api.load_catalog().unwrap();

        assert_eq!(api.http.request_count(), 3);
    }
}
