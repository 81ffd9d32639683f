use crate::commands::helpers::require_diagram;
use crate::commands::{CmdResult, DiagramDetail, VersionEntry};
use crate::descriptions::DescriptionStore;
use crate::error::Result;
use crate::model::Diagram;
use crate::source::local::LocalRegistrySource;
use crate::source::resolve_image_url;
use crate::store::KeyValueStore;

pub fn run<K: KeyValueStore>(
    catalog: &[Diagram],
    id: &str,
    descriptions: &DescriptionStore<K>,
    local: &LocalRegistrySource,
) -> Result<CmdResult> {
    let diagram = require_diagram(catalog, id)?;

    let description = descriptions
        .load(&diagram.id)
        .or_else(|| diagram.description.clone().filter(|d| !d.is_empty()))
        .unwrap_or_else(|| diagram.category.clone());

    let versions = diagram
        .versions
        .iter()
        .map(|tag| VersionEntry {
            tag: tag.clone(),
            url: diagram
                .version_urls
                .as_ref()
                .and_then(|urls| urls.get(tag))
                .cloned(),
            is_current: *tag == diagram.current_version,
        })
        .collect();

    let detail = DiagramDetail {
        diagram: diagram.clone(),
        image_url: resolve_image_url(diagram, local),
        description,
        versions,
    };
    Ok(CmdResult::default().with_detail(detail))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::helpers::fixtures::{diagram, versioned};
    use crate::config::RegistryConfig;
    use crate::error::GalleryError;
    use crate::store::memory::MemoryStore;

    fn local() -> LocalRegistrySource {
        LocalRegistrySource::new(&RegistryConfig {
            root: "https://h".into(),
            ..Default::default()
        })
    }

    #[test]
    fn detail_lists_versions_with_urls() {
        let catalog = vec![versioned("5", "Flow", "https://h")];
        let store = DescriptionStore::new(MemoryStore::new());

        let result = run(&catalog, "5", &store, &local()).unwrap();
        let detail = result.detail.unwrap();
        assert_eq!(detail.image_url, "https://h/png_files/5_Flow_v2.svg");
        assert_eq!(detail.versions.len(), 2);
        assert!(!detail.versions[0].is_current);
        assert!(detail.versions[1].is_current);
        assert_eq!(
            detail.versions[0].url.as_deref(),
            Some("https://h/png_files/5_Flow_v1.svg")
        );
    }

    #[test]
    fn stored_description_wins_over_catalog() {
        let mut d = diagram("1", "A", "Finance");
        d.description = Some("from catalog".into());
        let store = DescriptionStore::new(MemoryStore::new());
        store.save("1", "from user");

        let detail = run(&[d], "1", &store, &local()).unwrap().detail.unwrap();
        assert_eq!(detail.description, "from user");
    }

    #[test]
    fn description_falls_back_to_category() {
        let store = DescriptionStore::new(MemoryStore::new());
        let detail = run(&[diagram("1", "A", "Finance")], "1", &store, &local())
            .unwrap()
            .detail
            .unwrap();
        assert_eq!(detail.description, "Finance");
        assert_eq!(detail.versions[0].url, None);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let store = DescriptionStore::new(MemoryStore::new());
        let err = run(&[], "9", &store, &local()).unwrap_err();
        assert!(matches!(err, GalleryError::DiagramNotFound(_)));
    }
}
