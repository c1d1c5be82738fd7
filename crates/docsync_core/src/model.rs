use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";
pub const NATIVE_DOCUMENT_MIME_TYPE: &str = "application/vnd.google-apps.document";
pub const FOREIGN_DOCUMENT_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Folder,
    /// The provider's own rich-text format, exportable as HTML.
    NativeDocument,
    /// An uploaded word-processor file that must be converted before export.
    ForeignDocument,
}

impl NodeKind {
    /// Maps a provider MIME type to a node kind. Unsupported types yield `None`.
    pub fn from_mime_type(mime_type: &str) -> Option<Self> {
        match mime_type {
            FOLDER_MIME_TYPE => Some(Self::Folder),
            NATIVE_DOCUMENT_MIME_TYPE => Some(Self::NativeDocument),
            FOREIGN_DOCUMENT_MIME_TYPE => Some(Self::ForeignDocument),
            _ => None,
        }
    }
}

/// One entry of a remote folder listing. Never mutated locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteNode {
    pub id: String,
    pub name: String,
    pub kind: NodeKind,
    pub modified: DateTime<Utc>,
}

/// Folder-name segments from the traversal root to the current folder.
///
/// Descending into a folder produces a new, extended context; the parent's
/// context is left untouched for its remaining siblings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PathContext {
    segments: Vec<String>,
}

impl PathContext {
    pub fn root() -> Self {
        Self::default()
    }

    /// Context for the subfolder `folder_name`. The name is kept as one
    /// path component: separators become `-` and dot-only names become `_`.
    pub fn child(&self, folder_name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(path_segment(folder_name));
        Self { segments }
    }

    /// Local directory for this context under `base`.
    pub fn dir_under(&self, base: &Path) -> PathBuf {
        let mut dir = base.to_path_buf();
        dir.extend(&self.segments);
        dir
    }

    /// Slash-joined image namespace for a document living in this context.
    pub fn image_namespace(&self, document_slug: &str) -> String {
        self.segments
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(document_slug))
            .collect::<Vec<_>>()
            .join("/")
    }
}

fn path_segment(folder_name: &str) -> String {
    let segment = folder_name.replace(['/', '\\'], "-");
    if segment.trim().chars().all(|c| c == '.') {
        return "_".repeat(segment.len().max(1));
    }
    segment
}
