//! Docsync core: pure data model shared by the engine and the binary.
mod effect;
mod model;
mod naming;
mod report;

pub use effect::Effect;
pub use model::{
    NodeKind, PathContext, RemoteNode, FOLDER_MIME_TYPE, FOREIGN_DOCUMENT_MIME_TYPE,
    NATIVE_DOCUMENT_MIME_TYPE,
};
pub use naming::{DocumentName, Language};
pub use report::SyncReport;
