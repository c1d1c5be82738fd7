use std::path::PathBuf;

use clap::Parser;

/// Mirror a Drive folder tree into an MDX documentation tree.
#[derive(Debug, Parser)]
#[command(name = "docsync", version)]
pub struct Cli {
    /// RON configuration file. Defaults to `docsync.ron` when present.
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Id of the remote folder to mirror.
    #[arg(long)]
    pub root_folder_id: Option<String>,

    /// OAuth access token for the Drive API.
    #[arg(long, env = "DOCSYNC_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    #[arg(long)]
    pub api_base: Option<String>,

    #[arg(long)]
    pub docs_dir: Option<PathBuf>,

    /// Output root for documents whose name ends in `_en`.
    #[arg(long)]
    pub translated_docs_dir: Option<PathBuf>,

    #[arg(long)]
    pub images_dir: Option<PathBuf>,

    #[arg(long)]
    pub image_cache: Option<PathBuf>,

    /// Also write the log to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log at debug level.
    #[arg(long, short)]
    pub verbose: bool,

    /// Save the image cache after every folder instead of once at the end.
    #[arg(long)]
    pub flush_every_folder: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_paths_and_flags() {
        let cli = Cli::try_parse_from([
            "docsync",
            "--root-folder-id",
            "abc",
            "--docs-dir",
            "site/docs",
            "--flush-every-folder",
            "-v",
        ])
        .expect("valid arguments");

        assert_eq!(cli.root_folder_id.as_deref(), Some("abc"));
        assert_eq!(cli.docs_dir, Some(PathBuf::from("site/docs")));
        assert!(cli.flush_every_folder);
        assert!(cli.verbose);
        assert_eq!(cli.config, None);
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(Cli::try_parse_from(["docsync", "--bogus"]).is_err());
    }
}
