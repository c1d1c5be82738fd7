use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use sync_logging::sync_info;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("path has no parent directory or file name: {0:?}")]
    InvalidPath(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Whether a conditional write touched the disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Unchanged,
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    Ok(())
}

/// Atomically write content to `{dir}/{filename}` by writing a temp file then renaming.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        self.write_bytes(filename, content.as_bytes())
    }

    pub fn write_bytes(&self, filename: &str, content: &[u8]) -> Result<PathBuf, PersistError> {
        ensure_output_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content)?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}

/// Whole-file atomic replacement of `path`, creating parent directories as needed.
pub fn write_file_atomic(path: &Path, content: &[u8]) -> Result<(), PersistError> {
    let (dir, filename) = split_path(path)?;
    AtomicFileWriter::new(dir.to_path_buf()).write_bytes(filename, content)?;
    Ok(())
}

/// Write `content` to `path` unless the existing file already holds the same
/// text, ignoring leading and trailing whitespace.
pub fn save_if_changed(path: &Path, content: &str) -> Result<WriteOutcome, PersistError> {
    if let Ok(existing) = fs::read_to_string(path) {
        if existing.trim() == content.trim() {
            sync_info!("No changes: {}", path.display());
            return Ok(WriteOutcome::Unchanged);
        }
    }

    write_file_atomic(path, content.as_bytes())?;
    sync_info!("Saved: {}", path.display());
    Ok(WriteOutcome::Written)
}

fn split_path(path: &Path) -> Result<(&Path, &str), PersistError> {
    let invalid = || PersistError::InvalidPath(path.to_path_buf());
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(invalid)?;
    let dir = match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Path::new("."),
        Some(parent) => parent,
        None => return Err(invalid()),
    };
    Ok((dir, filename))
}
