use docsync_core::RemoteNode;

#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("remote returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("node {id} is not usable: {reason}")]
    InvalidNode { id: String, reason: String },
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RemoteError::Decode(err.to_string())
        } else {
            RemoteError::Transport(err.to_string())
        }
    }
}

/// The cloud storage provider, reduced to the calls a traversal needs.
#[async_trait::async_trait]
pub trait RemoteStore: Send + Sync {
    /// Children of a folder in the order the provider returns them.
    /// Trashed items and unsupported file types are left out.
    async fn list_children(&self, folder_id: &str) -> Result<Vec<RemoteNode>, RemoteError>;

    async fn metadata(&self, id: &str) -> Result<RemoteNode, RemoteError>;

    /// HTML export of a native document.
    async fn export_html(&self, document_id: &str) -> Result<String, RemoteError>;

    /// Creates a native-format copy of a foreign document and returns its id.
    async fn convert_to_native(&self, document: &RemoteNode) -> Result<String, RemoteError>;

    async fn delete(&self, id: &str) -> Result<(), RemoteError>;
}
