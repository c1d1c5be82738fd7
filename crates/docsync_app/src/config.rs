use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use docsync_engine::{CacheFlushPolicy, SyncConfig, DEFAULT_API_BASE};
use serde::{Deserialize, Serialize};
use sync_logging::{sync_info, sync_warn};
use thiserror::Error;

use crate::cli::Cli;

pub const DEFAULT_CONFIG_FILENAME: &str = "docsync.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub root_folder_id: Option<String>,
    pub api_base: String,
    pub image_timeout_secs: u64,
    pub max_image_bytes: u64,
    pub sync: SyncConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            root_folder_id: None,
            api_base: DEFAULT_API_BASE.to_string(),
            image_timeout_secs: 10,
            max_image_bytes: 20 * 1024 * 1024,
            sync: SyncConfig::default(),
        }
    }
}

impl AppConfig {
    /// Reads `path`. A missing file is only an error when `required`.
    pub fn load(path: &Path, required: bool) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound && !required => {
                sync_warn!("No config file at {:?}; using defaults", path);
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config = ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        sync_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Loads the file named on the command line, or the default one, and
    /// applies the command-line overrides on top.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path, true)?,
            None => Self::load(Path::new(DEFAULT_CONFIG_FILENAME), false)?,
        };
        config.apply_overrides(cli);
        Ok(config)
    }

    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(id) = &cli.root_folder_id {
            self.root_folder_id = Some(id.clone());
        }
        if let Some(base) = &cli.api_base {
            self.api_base = base.clone();
        }
        if let Some(dir) = &cli.docs_dir {
            self.sync.docs_dir = dir.clone();
        }
        if let Some(dir) = &cli.translated_docs_dir {
            self.sync.translated_docs_dir = Some(dir.clone());
        }
        if let Some(dir) = &cli.images_dir {
            self.sync.images_dir = dir.clone();
        }
        if let Some(file) = &cli.image_cache {
            self.sync.image_cache_file = file.clone();
        }
        if cli.flush_every_folder {
            self.sync.cache_flush = CacheFlushPolicy::EveryFolder;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("docsync.ron");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"(
                root_folder_id: Some("folder-1"),
                sync: (
                    docs_dir: "site/docs",
                    translated_docs_dir: Some("site/i18n/en/docs"),
                    cache_flush: EveryFolder,
                ),
            )"#,
        );

        let config = AppConfig::load(&path, true).unwrap();

        assert_eq!(config.root_folder_id.as_deref(), Some("folder-1"));
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.sync.docs_dir, PathBuf::from("site/docs"));
        assert_eq!(
            config.sync.translated_docs_dir,
            Some(PathBuf::from("site/i18n/en/docs"))
        );
        assert_eq!(config.sync.cache_flush, CacheFlushPolicy::EveryFolder);
        assert_eq!(config.sync.images_dir, SyncConfig::default().images_dir);
    }

    #[test]
    fn missing_optional_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load(&dir.path().join("absent.ron"), false).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = AppConfig::load(&dir.path().join("absent.ron"), true).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "( sync: [ )");
        let err = AppConfig::load(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn command_line_overrides_file_values() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"(root_folder_id: Some("from-file"), sync: (docs_dir: "file/docs"))"#,
        );
        let cli = Cli::parse_from([
            "docsync",
            "--config",
            path.to_str().unwrap(),
            "--root-folder-id",
            "from-cli",
            "--images-dir",
            "cli/img",
        ]);

        let config = AppConfig::from_cli(&cli).unwrap();

        assert_eq!(config.root_folder_id.as_deref(), Some("from-cli"));
        assert_eq!(config.sync.docs_dir, PathBuf::from("file/docs"));
        assert_eq!(config.sync.images_dir, PathBuf::from("cli/img"));
        assert_eq!(config.sync.cache_flush, CacheFlushPolicy::EndOfTraversal);
    }
}
