// Source importers: HTTP downloads and the FCDO spreadsheet

pub mod downloader;
pub mod fcdo_importer;

// Re-export commonly used items
pub use downloader::{DownloadError, SourceDownloader};
pub use fcdo_importer::{FcdoImporter, FcdoRow, SheetError, SheetGrid};
