use std::fmt;

/// Counters accumulated over one traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub folders_visited: usize,
    pub documents_written: usize,
    pub documents_unchanged: usize,
    pub documents_failed: usize,
    pub images_downloaded: usize,
    pub images_failed: usize,
    pub categories_written: usize,
    pub categories_unchanged: usize,
    pub cache_saved: bool,
}

impl SyncReport {
    /// Number of files this traversal replaced or created on disk, images included.
    pub fn files_written(&self) -> usize {
        self.documents_written
            + self.categories_written
            + self.images_downloaded
            + usize::from(self.cache_saved)
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "folders={} documents written={} unchanged={} failed={} images downloaded={} failed={} categories written={} unchanged={} cache_saved={}",
            self.folders_visited,
            self.documents_written,
            self.documents_unchanged,
            self.documents_failed,
            self.images_downloaded,
            self.images_failed,
            self.categories_written,
            self.categories_unchanged,
            self.cache_saved,
        )
    }
}
