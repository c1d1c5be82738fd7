use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// When the image cache is written back to disk during a traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CacheFlushPolicy {
    /// Save once, after the whole traversal. Entries assigned before an
    /// interruption are lost.
    #[default]
    EndOfTraversal,
    /// Save after every folder listing has been fully processed.
    EveryFolder,
}

/// Output layout and rendering options for one synchronization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub docs_dir: PathBuf,
    /// Output root for English documents; `None` keeps them in `docs_dir`.
    pub translated_docs_dir: Option<PathBuf>,
    pub images_dir: PathBuf,
    pub image_cache_file: PathBuf,
    /// Public URL prefix under which `images_dir` is served.
    pub image_url_prefix: String,
    pub root_label: String,
    /// `{label}` is replaced with the folder name.
    pub category_description: String,
    pub default_thumbnail: String,
    pub sample_max_chars: usize,
    pub empty_sample_placeholder: String,
    pub sidebar_position: u32,
    pub cache_flush: CacheFlushPolicy,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from("./docs"),
            translated_docs_dir: None,
            images_dir: PathBuf::from("./static/img"),
            image_cache_file: PathBuf::from("image_cache.json"),
            image_url_prefix: "/img".to_string(),
            root_label: "Documentation".to_string(),
            category_description: "Contents of {label}".to_string(),
            default_thumbnail: "default_thumbnail.png".to_string(),
            sample_max_chars: 200,
            empty_sample_placeholder: "No description available.".to_string(),
            sidebar_position: 1,
            cache_flush: CacheFlushPolicy::EndOfTraversal,
        }
    }
}
