use std::path::PathBuf;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::address::{
    AddressNormalizer, AddressRecord, BfpoType, RawAddress, ISOLATED_DETACHMENT_BFPO,
    ISOLATED_DETACHMENT_POSTCODE,
};
use crate::collector::{CountryStats, RecordCollector};
use crate::fetch_error::FetchError;
use crate::fetcher::BfpoPageFetcher;
use crate::importers::fcdo_importer::{extract_rows, FcdoRow};
use crate::importers::{FcdoImporter, SheetGrid, SourceDownloader};
use crate::location::LocationInferencer;
use crate::sections::{PageSections, Section};

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Primary source failed: {0}")]
    Fetch(#[from] FetchError),
}

/// Where the FCDO spreadsheet comes from for this run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FcdoSource {
    /// Pre-downloaded file given on the command line
    LocalFile(PathBuf),
    /// Fetch from the configured URL
    Download(String),
    Skip,
}

/// Outcome of one import run
#[derive(Debug, Clone, Default)]
pub struct ImportSummary {
    /// Finalized records in output order
    pub records: Vec<AddressRecord>,
    pub stats: CountryStats,
    pub gov_uk_records: usize,
    pub fcdo_records: usize,
    pub skipped_rows: usize,
    pub missing_sections: Vec<Section>,
    /// Set when the FCDO spreadsheet could not be used
    pub fcdo_unavailable: Option<String>,
    pub duration_secs: f64,
}

/// Runs one batch pass over both BFPO sources
pub struct BfpoImportService {
    page_fetcher: BfpoPageFetcher,
    downloader: SourceDownloader,
    normalizer: AddressNormalizer,
    fcdo_inferencer: LocationInferencer,
    naval_party_inferencer: LocationInferencer,
}

impl BfpoImportService {
    pub fn new(
        page_fetcher: BfpoPageFetcher,
        downloader: SourceDownloader,
        normalizer: AddressNormalizer,
        fcdo_inferencer: LocationInferencer,
    ) -> Self {
        Self {
            page_fetcher,
            downloader,
            normalizer,
            fcdo_inferencer,
            naval_party_inferencer: LocationInferencer::naval_party_default(),
        }
    }

    pub fn with_naval_party_inferencer(mut self, inferencer: LocationInferencer) -> Self {
        self.naval_party_inferencer = inferencer;
        self
    }

    pub fn normalizer(&self) -> &AddressNormalizer {
        &self.normalizer
    }

    /// Fetch and normalize both sources
    ///
    /// Only a failure of the GOV.UK page is fatal; an unusable spreadsheet
    /// is logged and contributes nothing.
    #[instrument(skip(self))]
    pub async fn run(&self, fcdo: FcdoSource) -> Result<ImportSummary, ImportError> {
        let start_time = Instant::now();
        let mut collector = RecordCollector::new();
        let mut summary = ImportSummary::default();

        info!("Scraping GOV.UK BFPO locations from {}", self.page_fetcher.url());
        let page = self.page_fetcher.fetch_sections().await?;
        let (added, skipped) = self.ingest_sections(&page, &mut collector);
        summary.gov_uk_records = added;
        summary.skipped_rows += skipped;
        summary.missing_sections = page.missing.clone();
        info!("✓ Scraped {} BFPO addresses from GOV.UK", added);

        match self.load_fcdo_grid(&fcdo).await {
            Ok(Some(grid)) => {
                let (added, skipped) = self.ingest_fcdo_grid(&grid, &mut collector);
                summary.fcdo_records = added;
                summary.skipped_rows += skipped;
                info!("✓ Parsed {} FCDO locations", added);
            }
            Ok(None) => {
                info!("FCDO source disabled for this run");
                summary.fcdo_unavailable = Some("skipped".to_string());
            }
            Err(reason) => {
                warn!("⚠ Skipping FCDO data: {}", reason);
                summary.fcdo_unavailable = Some(reason);
            }
        }

        summary.records = collector.finalize();
        summary.stats = CountryStats::from_records(&summary.records);
        summary.duration_secs = start_time.elapsed().as_secs_f64();

        Ok(summary)
    }

    /// Map every section row to a record; returns (added, skipped)
    pub fn ingest_sections(
        &self,
        page: &PageSections,
        collector: &mut RecordCollector,
    ) -> (usize, usize) {
        let mut added = 0;
        let mut skipped = 0;

        for section_rows in &page.sections {
            let section = section_rows.section;
            let before = added;

            for row in &section_rows.rows {
                match self.build_section_record(section, row) {
                    Some(record) => {
                        collector.add(record);
                        added += 1;
                    }
                    None => {
                        debug!("Skipping malformed {} row: {:?}", section, row);
                        skipped += 1;
                    }
                }
            }

            debug!("{}: {} addresses", section, added - before);
        }

        (added, skipped)
    }

    /// Record for one row of a page section, or `None` when the row is unusable
    pub fn build_section_record(&self, section: Section, row: &[String]) -> Option<AddressRecord> {
        if row.len() < section.min_cells() {
            return None;
        }

        let location = row[0].as_str();
        if location.trim().is_empty() {
            return None;
        }

        // Detachments: Location | Box number, all routed via BFPO 105
        let (bfpo_num, postcode, box_num) = match section {
            Section::IsolatedDetachments => (
                ISOLATED_DETACHMENT_BFPO,
                ISOLATED_DETACHMENT_POSTCODE,
                Some(row[1].as_str()),
            ),
            _ => (row[1].as_str(), row[2].as_str(), None),
        };

        if bfpo_num.trim().is_empty() || box_num.is_some_and(|b| b.trim().is_empty()) {
            return None;
        }

        let (country, bfpo_type) = match section {
            Section::Germany => (Some("Germany"), BfpoType::Static),
            Section::UnitedKingdom => (Some("United Kingdom"), BfpoType::Static),
            Section::RestOfEurope | Section::RestOfWorld => (Some(row[3].as_str()), BfpoType::Static),
            Section::Ships => (None, BfpoType::Ship),
            Section::NavalParties => (
                self.naval_party_inferencer.infer_country(location),
                BfpoType::NavalParty,
            ),
            Section::Operations => (None, BfpoType::Operation),
            Section::Exercises => (None, BfpoType::Exercise),
            Section::IsolatedDetachments => (Some("Germany"), BfpoType::Detachment),
        };

        let raw = RawAddress::new(bfpo_num, location, bfpo_type)
            .postcode(Some(postcode))
            .country(country)
            .box_num(box_num);
        Some(self.normalizer.build(raw))
    }

    /// Map every FCDO group entry to a record; returns (added, skipped)
    pub fn ingest_fcdo_grid(
        &self,
        grid: &SheetGrid,
        collector: &mut RecordCollector,
    ) -> (usize, usize) {
        let extract = extract_rows(grid);
        info!("Found {} column groups", extract.groups);

        let mut added = 0;
        for row in &extract.rows {
            collector.add(self.build_fcdo_record(row));
            added += 1;
        }

        (added, extract.skipped)
    }

    pub fn build_fcdo_record(&self, row: &FcdoRow) -> AddressRecord {
        let country = self.fcdo_inferencer.infer_country(&row.location);
        let raw = RawAddress::new(&row.bfpo_num, &row.location, BfpoType::Fcdo)
            .postcode(row.postcode.as_deref())
            .country(country);
        self.normalizer.build(raw)
    }

    /// `Ok(None)` when skipped, `Err(reason)` when the spreadsheet is unusable
    async fn load_fcdo_grid(&self, source: &FcdoSource) -> Result<Option<SheetGrid>, String> {
        match source {
            FcdoSource::Skip => Ok(None),
            FcdoSource::LocalFile(path) => {
                info!("Using pre-downloaded FCDO file: {}", path.display());
                if !path.exists() {
                    return Err(format!("FCDO file not found: {}", path.display()));
                }
                FcdoImporter::open_path(path)
                    .map(Some)
                    .map_err(|e| format!("Error parsing FCDO file: {e}"))
            }
            FcdoSource::Download(url) => {
                info!("Downloading FCDO spreadsheet");
                let bytes = self
                    .downloader
                    .download_bytes(url)
                    .await
                    .map_err(|e| format!("Error downloading FCDO spreadsheet from {url}: {e}"))?;
                info!("✓ Downloaded FCDO spreadsheet ({} bytes)", bytes.len());
                FcdoImporter::from_bytes(bytes)
                    .map(Some)
                    .map_err(|e| format!("Error parsing FCDO spreadsheet: {e}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn service() -> BfpoImportService {
        let downloader = SourceDownloader::new(Duration::from_secs(5)).unwrap();
        let fetcher = BfpoPageFetcher::new(downloader.clone(), String::new());
        BfpoImportService::new(
            fetcher,
            downloader,
            AddressNormalizer::default(),
            LocationInferencer::fcdo_default(),
        )
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_naval_party_ottawa() {
        let record = service()
            .build_section_record(Section::NavalParties, &row(&["Ottawa", "005", "K1N 1A1"]))
            .unwrap();

        assert_eq!(record.bfpo_num(), "BFPO 005");
        assert_eq!(record.location(), "Ottawa");
        assert_eq!(record.postcode(), Some("K1N 1A1"));
        assert_eq!(record.country(), Some("Canada"));
        assert_eq!(record.country_code(), Some("CA"));
        assert_eq!(record.bfpo_type(), BfpoType::NavalParty);
        assert_eq!(record.box_num(), None);
    }

    #[test]
    fn test_rest_of_world_uses_country_column() {
        let record = service()
            .build_section_record(
                Section::RestOfWorld,
                &row(&["Ascension Island", "677", "BF1 1AA", "Ascension"]),
            )
            .unwrap();
        assert_eq!(record.country_code(), Some("AC"));
    }

    #[test]
    fn test_short_rows_are_skipped() {
        let service = service();
        assert!(service
            .build_section_record(Section::RestOfEurope, &row(&["Brussels", "49", "BF1 1AA"]))
            .is_none());
        assert!(service
            .build_section_record(Section::IsolatedDetachments, &row(&["Outpost"]))
            .is_none());
    }

    #[test]
    fn test_blank_bfpo_is_skipped() {
        assert!(service()
            .build_section_record(Section::Ships, &row(&["HMS Example", " ", "BF1 4AA"]))
            .is_none());
    }

    #[test]
    fn test_blank_box_number_is_skipped() {
        assert!(service()
            .build_section_record(Section::IsolatedDetachments, &row(&["Outpost", ""]))
            .is_none());
    }

    #[test]
    fn test_isolated_detachment() {
        let record = service()
            .build_section_record(Section::IsolatedDetachments, &row(&["Outpost Alpha", "2001"]))
            .unwrap();

        assert_eq!(record.bfpo_num(), "BFPO 105");
        assert_eq!(record.box_num(), Some("2001"));
        assert_eq!(record.postcode(), Some("BF1 0AX"));
        assert_eq!(record.country_code(), Some("DE"));
        assert_eq!(record.bfpo_type(), BfpoType::Detachment);
    }

    #[test]
    fn test_fcdo_record_infers_country() {
        let record = service().build_fcdo_record(&FcdoRow {
            location: "British Embassy Paris".to_string(),
            bfpo_num: "5062".to_string(),
            postcode: None,
        });
        assert_eq!(record.bfpo_num(), "BFPO 5062");
        assert_eq!(record.country(), Some("France"));
        assert_eq!(record.country_code(), Some("FR"));
        assert_eq!(record.postcode(), None);
        assert_eq!(record.bfpo_type(), BfpoType::Fcdo);
    }
}
