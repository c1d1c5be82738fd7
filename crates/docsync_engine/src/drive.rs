//! [`RemoteStore`] over the Drive v3 REST API.
//!
//! Authentication is not handled here: the store is given a ready OAuth
//! access token and sends it as a bearer token on every call.

use chrono::{DateTime, Utc};
use docsync_core::{NodeKind, RemoteNode, NATIVE_DOCUMENT_MIME_TYPE};
use serde::Deserialize;
use serde_json::json;
use sync_logging::{sync_debug, sync_warn};

use crate::remote::{RemoteError, RemoteStore};

pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com";
const FILE_FIELDS: &str = "id, name, mimeType, modifiedTime";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriveFile {
    id: String,
    name: String,
    mime_type: String,
    modified_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct CreatedFile {
    id: String,
}

impl DriveFile {
    fn into_node(self) -> Result<RemoteNode, RemoteError> {
        let kind = NodeKind::from_mime_type(&self.mime_type).ok_or_else(|| {
            RemoteError::InvalidNode {
                id: self.id.clone(),
                reason: format!("unsupported mime type {}", self.mime_type),
            }
        })?;
        let modified = self.modified_time.ok_or_else(|| RemoteError::InvalidNode {
            id: self.id.clone(),
            reason: "missing modifiedTime".to_string(),
        })?;
        Ok(RemoteNode {
            id: self.id,
            name: self.name,
            kind,
            modified,
        })
    }
}

#[derive(Debug, Clone)]
pub struct DriveStore {
    client: reqwest::Client,
    api_base: String,
    access_token: String,
}

impl DriveStore {
    pub fn new(api_base: &str, access_token: impl Into<String>) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        })
    }

    fn files_url(&self) -> String {
        format!("{}/drive/v3/files", self.api_base)
    }

    fn file_url(&self, id: &str) -> String {
        format!("{}/{id}", self.files_url())
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(RemoteError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait::async_trait]
impl RemoteStore for DriveStore {
    async fn list_children(&self, folder_id: &str) -> Result<Vec<RemoteNode>, RemoteError> {
        let query = format!("'{folder_id}' in parents and trashed=false");
        let fields = format!("nextPageToken, files({FILE_FIELDS})");
        let mut nodes = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut params = vec![("q", query.as_str()), ("fields", fields.as_str())];
            if let Some(token) = page_token.as_deref() {
                params.push(("pageToken", token));
            }

            let response = self
                .client
                .get(self.files_url())
                .bearer_auth(&self.access_token)
                .query(&params)
                .send()
                .await?;
            let page: FileList = Self::check(response).await?.json().await?;

            for file in page.files {
                let name = file.name.clone();
                match file.into_node() {
                    Ok(node) => nodes.push(node),
                    Err(RemoteError::InvalidNode { reason, .. }) => {
                        sync_debug!("Skipping {}: {}", name, reason);
                    }
                    Err(err) => sync_warn!("Skipping {}: {}", name, err),
                }
            }

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(nodes)
    }

    async fn metadata(&self, id: &str) -> Result<RemoteNode, RemoteError> {
        let response = self
            .client
            .get(self.file_url(id))
            .bearer_auth(&self.access_token)
            .query(&[("fields", FILE_FIELDS)])
            .send()
            .await?;
        let file: DriveFile = Self::check(response).await?.json().await?;
        file.into_node()
    }

    async fn export_html(&self, document_id: &str) -> Result<String, RemoteError> {
        let response = self
            .client
            .get(format!("{}/export", self.file_url(document_id)))
            .bearer_auth(&self.access_token)
            .query(&[("mimeType", "text/html")])
            .send()
            .await?;
        Ok(Self::check(response).await?.text().await?)
    }

    async fn convert_to_native(&self, document: &RemoteNode) -> Result<String, RemoteError> {
        let response = self
            .client
            .post(format!("{}/copy", self.file_url(&document.id)))
            .bearer_auth(&self.access_token)
            .json(&json!({
                "name": document.name,
                "mimeType": NATIVE_DOCUMENT_MIME_TYPE,
            }))
            .send()
            .await?;
        let created: CreatedFile = Self::check(response).await?.json().await?;
        Ok(created.id)
    }

    async fn delete(&self, id: &str) -> Result<(), RemoteError> {
        let response = self
            .client
            .delete(self.file_url(id))
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}
