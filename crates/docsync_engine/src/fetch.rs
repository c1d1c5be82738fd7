use std::path::Path;
use std::time::Duration;

use futures_util::StreamExt;
use sync_logging::{sync_debug, sync_error, sync_info};

use crate::persist::{ensure_output_dir, write_file_atomic};
use crate::{FailureKind, FetchError, FetchOutcome};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(10),
            max_bytes: 20 * 1024 * 1024,
        }
    }
}

/// Network half of image retrieval: one GET, no retries.
#[async_trait::async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn download(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestImageFetcher {
    client: reqwest::Client,
    settings: FetchSettings,
}

impl ReqwestImageFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { client, settings })
    }
}

#[async_trait::async_trait]
impl ImageFetcher for ReqwestImageFetcher {
    async fn download(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        Ok(bytes)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}

/// Downloads `url` to `local_path` unless a file is already there.
///
/// Failures are logged and reported as [`FetchOutcome::Failed`]; the caller
/// carries on without the image.
pub async fn fetch_image(fetcher: &dyn ImageFetcher, url: &str, local_path: &Path) -> FetchOutcome {
    if let Some(parent) = local_path.parent() {
        if let Err(err) = ensure_output_dir(parent) {
            sync_error!("Failed to create image directory {:?}: {}", parent, err);
            return FetchOutcome::Failed;
        }
    }

    if local_path.exists() {
        sync_debug!("Image already present: {}", local_path.display());
        return FetchOutcome::AlreadyPresent;
    }

    let bytes = match fetcher.download(url).await {
        Ok(bytes) => bytes,
        Err(err) => {
            sync_error!("Failed to download image from {}: {}", url, err);
            return FetchOutcome::Failed;
        }
    };

    match write_file_atomic(local_path, &bytes) {
        Ok(()) => {
            sync_info!("Saved image: {}", local_path.display());
            FetchOutcome::Downloaded
        }
        Err(err) => {
            sync_error!("Failed to write image {}: {}", local_path.display(), err);
            FetchOutcome::Failed
        }
    }
}
