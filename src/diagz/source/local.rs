//! Static registry source.
//!
//! Reads `diagram-registry.json` from a directory or web root, keeps only
//! active entries and enriches them with description overrides and the
//! locations of every historical version image.

use crate::config::RegistryConfig;
use crate::descriptions::DescriptionStore;
use crate::error::Result;
use crate::http::{fetch_location, HttpClient, Location};
use crate::model::{sort_by_id, sort_versions, Diagram, DiagramRegistry};
use crate::store::KeyValueStore;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalRegistrySource {
    root: Location,
    registry_file: String,
    image_dir: String,
}

impl LocalRegistrySource {
    pub fn new(config: &RegistryConfig) -> Self {
        Self {
            root: Location::parse(&config.root),
            registry_file: config.file.clone(),
            image_dir: config.image_dir.clone(),
        }
    }

    pub fn registry_location(&self) -> Location {
        self.root.join(&self.registry_file)
    }

    pub fn image_base(&self) -> Location {
        self.root.join(&self.image_dir)
    }

    pub fn fetch_registry<H: HttpClient + ?Sized>(&self, http: &H) -> Result<DiagramRegistry> {
        let location = self.registry_location();
        debug!(%location, "Reading diagram registry");
        let bytes = fetch_location(http, &location)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Active diagrams, ascending by numeric id.
    pub fn list_diagrams<H: HttpClient + ?Sized>(&self, http: &H) -> Result<Vec<Diagram>> {
        let registry = self.fetch_registry(http)?;
        let mut diagrams: Vec<Diagram> = registry
            .diagrams
            .into_values()
            .filter(Diagram::is_active)
            .collect();
        sort_by_id(&mut diagrams);
        Ok(diagrams)
    }

    pub fn enrich<K: KeyValueStore>(
        &self,
        diagrams: Vec<Diagram>,
        descriptions: &DescriptionStore<K>,
    ) -> Vec<Diagram> {
        let overrides = descriptions.load_all();
        diagrams
            .into_iter()
            .map(|mut diagram| {
                let saved = overrides
                    .get(&diagram.id)
                    .filter(|text| !text.is_empty())
                    .cloned();
                diagram.description = Some(saved.unwrap_or_else(|| diagram.category.clone()));

                if !diagram.current_version.is_empty()
                    && !diagram.has_version(&diagram.current_version)
                {
                    diagram.versions.push(diagram.current_version.clone());
                }
                sort_versions(&mut diagram.versions);

                let urls: BTreeMap<String, String> = diagram
                    .versions
                    .iter()
                    .map(|v| (v.clone(), self.version_image_url(&diagram, v)))
                    .collect();
                diagram.version_urls = Some(urls);
                diagram
            })
            .collect()
    }

    pub fn load_catalog<H: HttpClient + ?Sized, K: KeyValueStore>(
        &self,
        http: &H,
        descriptions: &DescriptionStore<K>,
    ) -> Result<Vec<Diagram>> {
        let diagrams = self.list_diagrams(http)?;
        Ok(self.enrich(diagrams, descriptions))
    }

    pub fn image_url(&self, diagram: &Diagram) -> String {
        self.image_base().join(&diagram.current_png_file).to_string()
    }

    /// `{image base}/{id}_{name}_{version}.{ext}`
    pub fn version_image_url(&self, diagram: &Diagram, version: &str) -> String {
        let file = format!(
            "{}_{}_{}.{}",
            diagram.id,
            diagram.name,
            version,
            diagram.asset_extension()
        );
        self.image_base().join(&file).to_string()
    }
}
