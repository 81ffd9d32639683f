use crate::catalog::find_diagram;
use crate::error::{GalleryError, Result};
use crate::model::Diagram;
use crate::source::local::LocalRegistrySource;
use crate::source::resolve_image_url;

pub fn require_diagram<'a>(catalog: &'a [Diagram], id: &str) -> Result<&'a Diagram> {
    find_diagram(catalog, id).ok_or_else(|| GalleryError::DiagramNotFound(id.to_string()))
}

/// An image to fetch or show: where it lives and the file name to save it as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTarget {
    pub location: String,
    pub file_name: String,
}

/// Resolve the current image, or a specific historical version.
pub fn resolve_target(
    diagram: &Diagram,
    version: Option<&str>,
    local: &LocalRegistrySource,
) -> Result<ImageTarget> {
    let current = || ImageTarget {
        location: resolve_image_url(diagram, local),
        file_name: diagram.current_png_file.clone(),
    };

    let Some(version) = version else {
        return Ok(current());
    };

    let historical = diagram
        .version_urls
        .as_ref()
        .and_then(|urls| urls.get(version));
    match historical {
        Some(url) => Ok(ImageTarget {
            location: url.clone(),
            file_name: format!(
                "{}_{}_{}.{}",
                diagram.id,
                diagram.name,
                version,
                diagram.asset_extension()
            ),
        }),
        None if version == diagram.current_version => Ok(current()),
        None => Err(GalleryError::VersionNotFound {
            id: diagram.id.clone(),
            version: version.to_string(),
        }),
    }
}
