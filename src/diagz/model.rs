//! Core catalog types.
//!
//! A [`Diagram`] is the unit of content. Both sources produce the same shape so
//! the rest of the crate never needs to know where a diagram came from; the
//! only trace of the origin is which optional fields are filled in
//! (`versionUrls`/`drawioFile` for the local registry, `imageUrl` for the
//! remote repository).
//!
//! Ids are numeric strings without a fixed width ("2", "010", "10"), so every
//! ordering in the crate goes through [`numeric_id`] instead of comparing the
//! strings themselves. Version tags follow the same rule: "v2" sorts before
//! "v10".

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

pub const DEFAULT_CATEGORY: &str = "General";
pub const ACTIVE_STATUS: &str = "active";

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagram {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub original_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drawio_file: Option<String>,
    pub current_version: String,
    pub current_png_file: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub last_modified: String,
    #[serde(default)]
    pub versions: Vec<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_urls: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Diagram {
    pub fn is_active(&self) -> bool {
        self.status == ACTIVE_STATUS
    }

    pub fn numeric_id(&self) -> Option<u64> {
        numeric_id(&self.id)
    }

    /// The category to group under: the stored one, or "General" when blank.
    pub fn display_category(&self) -> &str {
        if self.category.trim().is_empty() {
            DEFAULT_CATEGORY
        } else {
            &self.category
        }
    }

    pub fn has_version(&self, version: &str) -> bool {
        self.versions.iter().any(|v| v == version)
    }

    /// Extension of the current asset, without the dot.
    pub fn asset_extension(&self) -> &str {
        match self.current_png_file.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => ext,
            _ => "svg",
        }
    }
}

/// The registry document maintained by the authoring pipeline. Read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramRegistry {
    #[serde(default)]
    pub next_id: u64,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub last_updated: String,
    #[serde(default)]
    pub diagrams: BTreeMap<String, Diagram>,
}

pub fn numeric_id(id: &str) -> Option<u64> {
    let trimmed = id.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

/// Numeric id order. Ids that are not numbers go after all numeric ones.
pub fn compare_ids(a: &str, b: &str) -> Ordering {
    match (numeric_id(a), numeric_id(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

pub fn sort_by_id(diagrams: &mut [Diagram]) {
    diagrams.sort_by(|a, b| compare_ids(&a.id, &b.id));
}

/// Integer after the leading non-digit prefix of a version tag ("v19" -> 19).
pub fn version_number(tag: &str) -> Option<u64> {
    let digits: String = tag
        .trim_start_matches(|c: char| !c.is_ascii_digit())
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

pub fn sort_versions(versions: &mut [String]) {
    versions.sort_by(|a, b| match (version_number(a), version_number(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    });
}
