use tracing::{debug, error, instrument};

use crate::fetch_error::FetchError;
use crate::importers::SourceDownloader;
use crate::sections::{parse_sections, PageSections};

/// Fetches the GOV.UK BFPO listing and splits it into sections
#[derive(Clone)]
pub struct BfpoPageFetcher {
    downloader: SourceDownloader,
    url: String,
}

impl BfpoPageFetcher {
    pub fn new(downloader: SourceDownloader, url: String) -> Self {
        Self { downloader, url }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn fetch_sections(&self) -> Result<PageSections, FetchError> {
        debug!("Sending HTTP request for BFPO page");
        let html = self.downloader.download_text(&self.url).await?;
        debug!("Retrieved HTML content, size: {} bytes", html.len());

        self.parse_html(&html)
    }

    /// Sections of an already-fetched page; fails only when none are present
    #[instrument(skip(self, html), fields(html_size = html.len()))]
    pub fn parse_html(&self, html: &str) -> Result<PageSections, FetchError> {
        let page = parse_sections(html);

        if page.sections.is_empty() {
            error!("No BFPO sections found in page");
            debug!(
                "HTML preview (first 500 chars): {}",
                html.chars().take(500).collect::<String>()
            );
            return Err(FetchError::NoSections);
        }

        debug!(
            "Found {} of {} sections",
            page.sections.len(),
            page.sections.len() + page.missing.len()
        );
        Ok(page)
    }
}
