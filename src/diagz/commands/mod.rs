use crate::catalog::CategoryGroup;
use crate::config::GalleryConfig;
use crate::model::Diagram;
use crate::source::SourceKind;
use std::path::PathBuf;

pub mod describe;
pub mod download;
pub mod helpers;
pub mod list;
pub mod open;
pub mod source;
pub mod view;

#[derive(Debug, Clone)]
pub struct GalleryPaths {
    /// Where client-local data (description overrides) is kept.
    pub data_dir: PathBuf,
    /// Where `diagz.toml` is looked up.
    pub config_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// One version row in the detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionEntry {
    pub tag: String,
    pub url: Option<String>,
    pub is_current: bool,
}

#[derive(Debug, Clone)]
pub struct DiagramDetail {
    pub diagram: Diagram,
    pub image_url: String,
    pub description: String,
    pub versions: Vec<VersionEntry>,
}

#[derive(Debug, Clone)]
pub struct SourceInfo {
    pub kind: SourceKind,
    pub config: GalleryConfig,
    pub registry_location: String,
    pub config_file: PathBuf,
    pub data_dir: PathBuf,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Size of the catalog before any filtering.
    pub total: usize,
    pub listed_diagrams: Vec<Diagram>,
    pub groups: Vec<CategoryGroup>,
    pub detail: Option<DiagramDetail>,
    pub written_paths: Vec<PathBuf>,
    pub targets: Vec<String>,
    pub source: Option<SourceInfo>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_diagrams(mut self, diagrams: Vec<Diagram>) -> Self {
        self.listed_diagrams = diagrams;
        self
    }

    pub fn with_groups(mut self, groups: Vec<CategoryGroup>) -> Self {
        self.groups = groups;
        self
    }

    pub fn with_detail(mut self, detail: DiagramDetail) -> Self {
        self.detail = Some(detail);
        self
    }

    pub fn with_written_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.written_paths = paths;
        self
    }

    pub fn with_targets(mut self, targets: Vec<String>) -> Self {
        self.targets = targets;
        self
    }

    pub fn with_source(mut self, source: SourceInfo) -> Self {
        self.source = Some(source);
        self
    }
}
