use backon::{ExponentialBuilder, Retryable};
use reqwest::Client;
use std::io::Cursor;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("File not found (404): {0}")]
    NotFound(String),

    #[error("Server error (5xx): {0}")]
    ServerError(String),

    #[error("Unexpected response: {0}")]
    UnexpectedStatus(String),
}

impl DownloadError {
    /// Worth retrying: server errors, timeouts and connection failures
    pub fn is_transient(&self) -> bool {
        match self {
            DownloadError::ServerError(_) => true,
            DownloadError::HttpError(e) => e.is_timeout() || e.is_connect(),
            DownloadError::NotFound(_) | DownloadError::UnexpectedStatus(_) => false,
        }
    }
}

/// HTTP downloader for the BFPO source documents
#[derive(Clone)]
pub struct SourceDownloader {
    client: Client,
    max_retries: usize,
    min_retry_delay: Duration,
}

impl SourceDownloader {
    pub fn new(timeout: Duration) -> Result<Self, DownloadError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            max_retries: 2,
            min_retry_delay: Duration::from_millis(500),
        })
    }

    /// Number of retries after the first attempt for transient failures
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_min_retry_delay(mut self, delay: Duration) -> Self {
        self.min_retry_delay = delay;
        self
    }

    /// Download a page as text
    pub async fn download_text(&self, url: &str) -> Result<String, DownloadError> {
        let bytes = self.download_bytes(url).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Download a file as raw bytes, retrying transient failures
    pub async fn download_bytes(&self, url: &str) -> Result<Vec<u8>, DownloadError> {
        info!("Downloading {}", url);

        let backoff = ExponentialBuilder::default()
            .with_min_delay(self.min_retry_delay)
            .with_max_times(self.max_retries);

        (|| self.download_once(url))
            .retry(backoff)
            .when(DownloadError::is_transient)
            .notify(|err, delay| {
                warn!("Download of {} failed ({}), retrying in {:?}", url, err, delay);
            })
            .await
    }

    async fn download_once(&self, url: &str) -> Result<Vec<u8>, DownloadError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();

        if status.is_success() {
            let bytes = response.bytes().await?;
            debug!("Downloaded {url} ({} bytes)", bytes.len());
            Ok(bytes.to_vec())
        } else if status.as_u16() == 404 {
            Err(DownloadError::NotFound(format!("{url} not found on server")))
        } else if status.is_server_error() {
            Err(DownloadError::ServerError(format!(
                "Server error {status} while downloading {url}"
            )))
        } else {
            // Other 4xx, and 1xx/3xx responses reqwest did not follow
            Err(DownloadError::UnexpectedStatus(format!(
                "Status {status} while downloading {url}"
            )))
        }
    }
}

/// Wrap downloaded bytes for in-memory workbook parsing
pub fn bytes_to_cursor(bytes: Vec<u8>) -> Cursor<Vec<u8>> {
    Cursor::new(bytes)
}
