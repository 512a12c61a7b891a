pub mod bfpo_import_service;

pub use bfpo_import_service::{BfpoImportService, FcdoSource, ImportError, ImportSummary};
