use crate::importers::downloader::DownloadError;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Failed to download BFPO page: {0}")]
    Download(#[from] DownloadError),
    #[error("No BFPO sections found in page")]
    NoSections,
}
