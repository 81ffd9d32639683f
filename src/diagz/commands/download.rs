use crate::commands::helpers::{require_diagram, resolve_target};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{GalleryError, Result};
use crate::http::{fetch_location, HttpClient, Location};
use crate::model::Diagram;
use crate::source::local::LocalRegistrySource;
use std::fs;
use std::path::{Path, PathBuf};

/// Fetch the current (or a historical) image of a diagram to disk.
///
/// `dest` may be a directory, in which case the asset's own file name is used,
/// or a file path. Without `dest` the file lands in the working directory.
pub fn run<H: HttpClient + ?Sized>(
    http: &H,
    catalog: &[Diagram],
    id: &str,
    version: Option<&str>,
    dest: Option<&Path>,
    local: &LocalRegistrySource,
) -> Result<CmdResult> {
    let diagram = require_diagram(catalog, id)?;
    let target = resolve_target(diagram, version, local)?;
    let file_name = local_file_name(&target.file_name)?;

    let bytes = fetch_location(http, &Location::parse(&target.location))?;

    let path = match dest {
        Some(dest) if dest.is_dir() => dest.join(&file_name),
        Some(dest) => dest.to_path_buf(),
        None => PathBuf::from(&file_name),
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(GalleryError::Io)?;
    }
    fs::write(&path, &bytes).map_err(GalleryError::Io)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Downloaded {} ({} bytes) to {}",
        file_name,
        bytes.len(),
        path.display()
    )));
    Ok(result.with_written_paths(vec![path]))
}

/// The last component of an asset name. Registry names are not trusted to
/// stay inside the output directory.
fn local_file_name(asset: &str) -> Result<String> {
    Path::new(asset)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty() && name != "." && name != "..")
        .ok_or_else(|| GalleryError::Api(format!("Invalid image file name: {:?}", asset)))
}
