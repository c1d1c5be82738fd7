//! Persistent mapping from source image URL to a local filename.
//!
//! Filenames are derived from the URL alone: `img_{n}.png` where `n` is the
//! first eight bytes of the URL's SHA-256 digest reduced modulo 10^8. Once a
//! URL has a filename it keeps it for as long as the cache file survives,
//! even if a later hash scheme or the local file changes.
//!
//! Two URLs can land on the same number. The collision is logged but not
//! resolved: both URLs share the filename and whichever image was
//! downloaded first occupies it.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::Path;

use sha2::{Digest, Sha256};
use sync_logging::{sync_info, sync_warn};

use crate::persist::{write_file_atomic, PersistError};

const FILENAME_MODULUS: u64 = 100_000_000;
const FILENAME_EXTENSION: &str = "png";

/// Deterministic filename for an image URL.
pub fn image_filename(url: &str) -> String {
    let digest = Sha256::digest(url.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    let number = u64::from_be_bytes(prefix) % FILENAME_MODULUS;
    format!("img_{number}.{FILENAME_EXTENSION}")
}

/// Result of [`ImageCache::lookup_or_assign`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub filename: String,
    /// `true` when the URL was not cached before and a download is due.
    pub is_new: bool,
}

#[derive(Debug, Default)]
pub struct ImageCache {
    entries: BTreeMap<String, String>,
    /// Runtime reverse index: filename -> first URL that claimed it.
    by_filename: HashMap<String, String>,
    dirty: bool,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the cache from `path`. A missing or malformed file yields an
    /// empty cache.
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Self::new(),
            Err(err) => {
                sync_warn!("Failed to read image cache {:?}: {}", path, err);
                return Self::new();
            }
        };

        let entries: BTreeMap<String, String> = match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(err) => {
                sync_warn!("Ignoring malformed image cache {:?}: {}", path, err);
                return Self::new();
            }
        };

        sync_info!("Loaded {} cached images from {:?}", entries.len(), path);
        Self::from_entries(entries)
    }

    fn from_entries(entries: BTreeMap<String, String>) -> Self {
        let mut by_filename = HashMap::with_capacity(entries.len());
        for (url, filename) in &entries {
            by_filename
                .entry(filename.clone())
                .or_insert_with(|| url.clone());
        }
        Self {
            entries,
            by_filename,
            dirty: false,
        }
    }

    /// Writes the cache to `path` if it changed since it was loaded or last
    /// saved. Returns whether a write happened.
    pub fn save(&mut self, path: &Path) -> Result<bool, PersistError> {
        if !self.dirty {
            return Ok(false);
        }
        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|err| PersistError::Io(io::Error::other(err)))?;
        write_file_atomic(path, json.as_bytes())?;
        self.dirty = false;
        sync_info!("Saved image cache with {} entries to {:?}", self.len(), path);
        Ok(true)
    }

    pub fn get(&self, url: &str) -> Option<&str> {
        self.entries.get(url).map(String::as_str)
    }

    /// Returns the filename for `url`, assigning a new one on a miss.
    pub fn lookup_or_assign(&mut self, url: &str) -> Assignment {
        if let Some(filename) = self.entries.get(url) {
            return Assignment {
                filename: filename.clone(),
                is_new: false,
            };
        }

        let filename = image_filename(url);
        match self.by_filename.get(&filename) {
            Some(owner) => {
                sync_warn!(
                    "Image filename {} already used by {}; {} will share it",
                    filename,
                    owner,
                    url
                );
            }
            None => {
                self.by_filename.insert(filename.clone(), url.to_string());
            }
        }
        self.entries.insert(url.to_string(), filename.clone());
        self.dirty = true;

        Assignment {
            filename,
            is_new: true,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    fn with_entries(entries: &[(&str, &str)]) -> Self {
        Self::from_entries(
            entries
                .iter()
                .map(|(url, name)| (url.to_string(), name.to_string()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_has_bounded_number_and_extension() {
        let name = image_filename("https://example.com/a.png");
        let number: u64 = name
            .strip_prefix("img_")
            .and_then(|rest| rest.strip_suffix(".png"))
            .and_then(|n| n.parse().ok())
            .expect("img_<n>.png");
        assert!(number < FILENAME_MODULUS);
        assert_eq!(name, image_filename("https://example.com/a.png"));
    }

    #[test]
    fn colliding_filename_is_shared_not_renamed() {
        let url = "https://example.com/new.png";
        let taken = image_filename(url);
        let mut cache = ImageCache::with_entries(&[("https://example.com/old.png", &taken)]);

        let assignment = cache.lookup_or_assign(url);
        assert!(assignment.is_new);
        assert_eq!(assignment.filename, taken);
        assert_eq!(cache.get("https://example.com/old.png"), Some(taken.as_str()));
    }
}
