mod cli;
mod config;

use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use docsync_core::NodeKind;
use docsync_engine::{DriveStore, FetchSettings, RemoteStore, ReqwestImageFetcher, Synchronizer};
use log::LevelFilter;
use sync_logging::{sync_info, LogDestination};

use crate::cli::Cli;
use crate::config::AppConfig;

// The traversal keeps one remote call in flight at a time.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let destination = match &cli.log_file {
        Some(path) => LogDestination::Both(path.clone()),
        None => LogDestination::Terminal,
    };
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    sync_logging::initialize(destination, level);

    run(cli).await
}

async fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::from_cli(&cli)?;

    let token = cli
        .access_token
        .clone()
        .context("no access token; pass --access-token or set DOCSYNC_ACCESS_TOKEN")?;
    let root_id = config
        .root_folder_id
        .clone()
        .context("no root folder id; pass --root-folder-id or set root_folder_id in the config")?;

    let store = DriveStore::new(&config.api_base, token).context("failed to build Drive client")?;
    let root = store
        .metadata(&root_id)
        .await
        .with_context(|| format!("failed to look up root folder {root_id}"))?;
    if root.kind != NodeKind::Folder {
        bail!("root {} ({}) is not a folder", root.name, root_id);
    }
    sync_info!("Synchronizing folder {} ({})", root.name, root_id);

    let settings = FetchSettings {
        request_timeout: Duration::from_secs(config.image_timeout_secs),
        max_bytes: config.max_image_bytes,
        ..FetchSettings::default()
    };
    let fetcher = ReqwestImageFetcher::new(settings).context("failed to build image client")?;

    let report = Synchronizer::new(&store, &fetcher, config.sync)
        .run(&root_id)
        .await?;
    sync_info!(
        "{} files written, {} documents failed, {} images failed",
        report.files_written(),
        report.documents_failed,
        report.images_failed
    );
    Ok(())
}
