#![allow(dead_code)]

use std::time::Duration;

use bfpo_scraper::address::AddressNormalizer;
use bfpo_scraper::fetcher::BfpoPageFetcher;
use bfpo_scraper::importers::SourceDownloader;
use bfpo_scraper::location::LocationInferencer;
use bfpo_scraper::services::BfpoImportService;

/// Snapshot-shaped copy of the GOV.UK page: all nine sections, one short row
pub const SAMPLE_PAGE: &str = include_str!("fixtures/find_a_bfpo_number.html");

pub const SAMPLE_PAGE_RECORDS: usize = 14;

/// Two column groups; four complete entries and one without a BFPO number
pub const SAMPLE_WORKBOOK: &[u8] = include_bytes!("fixtures/fcdo_bfpo_indicators.xlsx");

pub const SAMPLE_WORKBOOK_PATH: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/fcdo_bfpo_indicators.xlsx"
);

pub const SAMPLE_WORKBOOK_RECORDS: usize = 4;

/// Downloader with no retry delay worth waiting for in tests
pub fn test_downloader(max_retries: usize) -> SourceDownloader {
    SourceDownloader::new(Duration::from_secs(5))
        .expect("Failed to build HTTP client")
        .with_max_retries(max_retries)
        .with_min_retry_delay(Duration::from_millis(10))
}

pub fn test_service(page_url: String) -> BfpoImportService {
    let downloader = test_downloader(0);
    let fetcher = BfpoPageFetcher::new(downloader.clone(), page_url);
    BfpoImportService::new(
        fetcher,
        downloader,
        AddressNormalizer::default(),
        LocationInferencer::fcdo_default(),
    )
}
