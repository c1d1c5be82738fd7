//! Depth-first traversal of a remote folder tree into the local docs tree.
//!
//! One remote call is in flight at a time. Children are handled in listing
//! order and a subfolder is finished before its next sibling starts. The
//! image cache is owned by the traversal and handed down by `&mut`.
//!
//! A failure on one item is logged with the item's name and the traversal
//! moves on to the next sibling.

use std::path::{Path, PathBuf};

use docsync_core::{DocumentName, Effect, Language, NodeKind, PathContext, RemoteNode, SyncReport};
use futures_util::future::{FutureExt, LocalBoxFuture};
use sync_logging::{sync_error, sync_info, sync_warn};

use crate::category::{materialize_category, CategoryDescriptor};
use crate::config::{CacheFlushPolicy, SyncConfig};
use crate::convert::{convert_document, RenderContext};
use crate::extract::{document_sample, first_image_url};
use crate::fetch::{fetch_image, ImageFetcher};
use crate::frontmatter::FrontMatter;
use crate::image_cache::ImageCache;
use crate::persist::{ensure_output_dir, save_if_changed, PersistError, WriteOutcome};
use crate::remote::{RemoteError, RemoteStore};
use crate::FetchOutcome;

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("failed to prepare docs root {path:?}: {source}")]
    DocsRoot {
        path: PathBuf,
        #[source]
        source: PersistError,
    },
}

#[derive(Debug, thiserror::Error)]
enum DocumentError {
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

struct Traversal {
    cache: ImageCache,
    report: SyncReport,
}

pub struct Synchronizer<'a> {
    store: &'a dyn RemoteStore,
    fetcher: &'a dyn ImageFetcher,
    config: SyncConfig,
}

impl<'a> Synchronizer<'a> {
    pub fn new(store: &'a dyn RemoteStore, fetcher: &'a dyn ImageFetcher, config: SyncConfig) -> Self {
        Self {
            store,
            fetcher,
            config,
        }
    }

    /// Mirrors the folder `root_folder_id` into the configured docs tree.
    ///
    /// Only a failure to prepare the docs root is returned as an error;
    /// everything below it is recovered per item and counted in the report.
    pub async fn run(&self, root_folder_id: &str) -> Result<SyncReport, SyncError> {
        let docs_dir = &self.config.docs_dir;
        ensure_output_dir(docs_dir).map_err(|source| SyncError::DocsRoot {
            path: docs_dir.clone(),
            source,
        })?;

        let mut state = Traversal {
            cache: ImageCache::load(&self.config.image_cache_file),
            report: SyncReport::default(),
        };
        if state.cache.is_empty() {
            sync_info!("Starting with an empty image cache");
        }

        let root = CategoryDescriptor::new(&self.config.root_label, &self.config.category_description);
        self.record_category(docs_dir, &root, &mut state.report);

        self.process_folder(root_folder_id, &PathContext::root(), &mut state)
            .await;
        self.flush_cache(&mut state);

        sync_info!("Synchronization finished: {}", state.report);
        Ok(state.report)
    }

    fn process_folder<'s>(
        &'s self,
        folder_id: &'s str,
        path: &'s PathContext,
        state: &'s mut Traversal,
    ) -> LocalBoxFuture<'s, ()> {
        async move {
            state.report.folders_visited += 1;
            let children = match self.store.list_children(folder_id).await {
                Ok(children) => children,
                Err(err) => {
                    sync_error!("Failed to list folder {}: {}", folder_id, err);
                    return;
                }
            };

            for node in &children {
                match node.kind {
                    NodeKind::Folder => self.process_subfolder(node, path, state).await,
                    NodeKind::NativeDocument | NodeKind::ForeignDocument => {
                        self.process_document(node, path, state).await
                    }
                }
            }

            if self.config.cache_flush == CacheFlushPolicy::EveryFolder {
                self.flush_cache(state);
            }
        }
        .boxed_local()
    }

    async fn process_subfolder(&self, folder: &RemoteNode, parent: &PathContext, state: &mut Traversal) {
        let path = parent.child(&folder.name);
        let dir = path.dir_under(&self.config.docs_dir);
        if let Err(err) = ensure_output_dir(&dir) {
            sync_error!("Failed to create folder {}: {}", dir.display(), err);
            return;
        }

        let descriptor = CategoryDescriptor::new(&folder.name, &self.config.category_description);
        self.record_category(&dir, &descriptor, &mut state.report);

        self.process_folder(&folder.id, &path, state).await;
    }

    async fn process_document(&self, document: &RemoteNode, path: &PathContext, state: &mut Traversal) {
        let temporary_copy = match document.kind {
            NodeKind::ForeignDocument => {
                sync_info!("Converting {} to a native document", document.name);
                match self.store.convert_to_native(document).await {
                    Ok(copy_id) => Some(copy_id),
                    Err(err) => {
                        sync_error!("Failed to convert document {}: {}", document.name, err);
                        state.report.documents_failed += 1;
                        return;
                    }
                }
            }
            _ => None,
        };
        let export_id = temporary_copy.as_deref().unwrap_or(&document.id);

        match self.sync_document(document, export_id, path, state).await {
            Ok(WriteOutcome::Written) => state.report.documents_written += 1,
            Ok(WriteOutcome::Unchanged) => state.report.documents_unchanged += 1,
            Err(err) => {
                sync_error!("Failed to process document {}: {}", document.name, err);
                state.report.documents_failed += 1;
            }
        }

        if let Some(copy_id) = temporary_copy {
            match self.store.delete(&copy_id).await {
                Ok(()) => sync_info!("Removed temporary copy for {}", document.name),
                Err(err) => sync_warn!(
                    "Could not remove temporary copy for {}: {}",
                    document.name,
                    err
                ),
            }
        }
    }

    async fn sync_document(
        &self,
        document: &RemoteNode,
        export_id: &str,
        path: &PathContext,
        state: &mut Traversal,
    ) -> Result<WriteOutcome, DocumentError> {
        let name = DocumentName::from_display_name(&document.name);
        let output_root = match (name.language, &self.config.translated_docs_dir) {
            (Language::English, Some(dir)) => dir.as_path(),
            _ => self.config.docs_dir.as_path(),
        };
        let output_path = path.dir_under(output_root).join(name.output_filename());
        let namespace = path.image_namespace(&name.slug);
        let ctx = RenderContext {
            namespace: &namespace,
            url_prefix: &self.config.image_url_prefix,
            images_dir: &self.config.images_dir,
        };

        sync_info!("Downloading document: {}", document.name);
        let html = self.store.export_html(export_id).await?;

        let description = document_sample(
            &html,
            self.config.sample_max_chars,
            &self.config.empty_sample_placeholder,
        );

        // The thumbnail is fetched into this document's namespace even when
        // the URL was already cached by another document.
        let thumbnail = match first_image_url(&html) {
            Some(url) => {
                let assignment = state.cache.lookup_or_assign(&url);
                let reference = format!("{namespace}/{}", assignment.filename);
                let effect = Effect::FetchImage {
                    url,
                    target: ctx.image_path(&assignment.filename),
                };
                self.run_effect(effect, &mut state.report)
                    .await
                    .is_available()
                    .then_some(reference)
            }
            None => None,
        };

        let conversion = convert_document(&html, ctx, &mut state.cache);
        for effect in conversion.effects {
            self.run_effect(effect, &mut state.report).await;
        }

        let image = thumbnail.unwrap_or_else(|| self.config.default_thumbnail.clone());

        let front_matter = FrontMatter {
            title: name.title,
            description,
            date: document.modified.date_naive(),
            sidebar_position: self.config.sidebar_position,
            image,
        };
        let content = front_matter.render(&conversion.markup);

        Ok(save_if_changed(&output_path, &content)?)
    }

    async fn run_effect(&self, effect: Effect, report: &mut SyncReport) -> FetchOutcome {
        match effect {
            Effect::FetchImage { url, target } => {
                let outcome = fetch_image(self.fetcher, &url, &target).await;
                match outcome {
                    FetchOutcome::Downloaded => report.images_downloaded += 1,
                    FetchOutcome::AlreadyPresent => {}
                    FetchOutcome::Failed => report.images_failed += 1,
                }
                outcome
            }
        }
    }

    fn record_category(&self, dir: &Path, descriptor: &CategoryDescriptor, report: &mut SyncReport) {
        match materialize_category(dir, descriptor) {
            Ok(WriteOutcome::Written) => report.categories_written += 1,
            Ok(WriteOutcome::Unchanged) => report.categories_unchanged += 1,
            Err(err) => sync_error!("Failed to write category for {}: {}", dir.display(), err),
        }
    }

    fn flush_cache(&self, state: &mut Traversal) {
        match state.cache.save(&self.config.image_cache_file) {
            Ok(true) => state.report.cache_saved = true,
            Ok(false) => {}
            Err(err) => sync_error!(
                "Failed to save image cache {:?}: {}",
                self.config.image_cache_file,
                err
            ),
        }
    }
}
