//! Docsync engine: conversion pipeline, image handling and folder traversal.
mod category;
mod config;
mod convert;
mod drive;
mod extract;
mod fetch;
mod frontmatter;
mod image_cache;
mod links;
mod markup;
mod persist;
mod remote;
mod sync;
mod table;
mod types;

pub use category::{materialize_category, CategoryDescriptor, CategoryLink, CATEGORY_FILENAME};
pub use config::{CacheFlushPolicy, SyncConfig};
pub use convert::{convert_document, Conversion, RenderContext, Transducer};
pub use drive::{DriveStore, DEFAULT_API_BASE};
pub use extract::{document_sample, first_image_url};
pub use fetch::{fetch_image, FetchSettings, ImageFetcher, ReqwestImageFetcher};
pub use frontmatter::FrontMatter;
pub use image_cache::{image_filename, Assignment, ImageCache};
pub use links::{unwrap_redirect, video_id};
pub use markup::{
    color_from_style, parse_body, parse_fragment, Element, ElementKind, ListStyle, MarkupNode,
};
pub use persist::{
    ensure_output_dir, save_if_changed, write_file_atomic, AtomicFileWriter, PersistError,
    WriteOutcome,
};
pub use remote::{RemoteError, RemoteStore};
pub use sync::{SyncError, Synchronizer};
pub use table::render_table;
pub use types::{FailureKind, FetchError, FetchOutcome};
