use crate::commands::{CmdMessage, CmdResult, GalleryPaths, SourceInfo};
use crate::config::{config_file, GalleryConfig};
use crate::source::local::LocalRegistrySource;
use crate::source::{select_source, SourceKind};

/// Report which source a catalog read would use right now.
pub fn run(config: &GalleryConfig, local: &LocalRegistrySource, paths: &GalleryPaths) -> CmdResult {
    let kind = select_source(config);
    let info = SourceInfo {
        kind,
        config: config.clone(),
        registry_location: local.registry_location().to_string(),
        config_file: config_file(&paths.config_dir),
        data_dir: paths.data_dir.clone(),
    };

    let mut result = CmdResult::default();
    if kind == SourceKind::Local && has_partial_remote(config) {
        result.add_message(CmdMessage::warning(
            "Remote repository settings are incomplete; using the local registry.",
        ));
    }
    result.with_source(info)
}

fn has_partial_remote(config: &GalleryConfig) -> bool {
    let remote = &config.remote;
    [
        remote.api_url(),
        remote.client_id(),
        remote.client_secret(),
        remote.token_url(),
    ]
    .iter()
    .any(|v| !v.is_empty())
}
