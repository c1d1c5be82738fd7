use std::path::PathBuf;

/// Side effect requested by pure conversion code and executed by the synchronizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Download `url` to `target` unless a file already exists there.
    FetchImage { url: String, target: PathBuf },
}
