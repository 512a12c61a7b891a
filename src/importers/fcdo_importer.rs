use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use super::downloader::bytes_to_cursor;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Failed to open workbook: {0}")]
    WorkbookOpen(String),

    #[error("Workbook has no worksheets")]
    NoWorksheet,

    #[error("Worksheet has no header row")]
    EmptySheet,
}

/// Column names of the first group; later groups carry `.1`, `.2`, ... suffixes
pub const LOCATION_COLUMN: &str = "Location";
pub const BFPO_COLUMN: &str = "BFPO No";
pub const POSTCODE_COLUMN: &str = "Postcode";

/// Worksheet as text cells keyed by header name
///
/// Repeated header names are disambiguated with `.N` suffixes in order of
/// appearance ("Location", "Location.1", ...); blank headers become
/// "Unnamed: <col>". Blank cells and literal "nan" are absent.
#[derive(Debug, Clone, Default)]
pub struct SheetGrid {
    columns: HashMap<String, usize>,
    rows: Vec<Vec<Option<String>>>,
}

impl SheetGrid {
    /// Build a grid from raw header names and data rows
    pub fn new<S: AsRef<str>>(headers: &[S], rows: Vec<Vec<Option<String>>>) -> Self {
        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut columns = HashMap::new();

        for (idx, header) in headers.iter().enumerate() {
            let base = header.as_ref().trim();
            let base = if base.is_empty() {
                format!("Unnamed: {idx}")
            } else {
                base.to_string()
            };

            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{base}.{count}")
            };
            *count += 1;

            columns.insert(name, idx);
        }

        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(|c| c.and_then(clean_text)).collect())
            .collect();

        Self { columns, rows }
    }

    /// First row of the range is the header
    pub fn from_range(range: &Range<Data>) -> Result<Self, SheetError> {
        let mut rows = range.rows();
        let header_row = rows.next().ok_or(SheetError::EmptySheet)?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell_text(cell).unwrap_or_default())
            .collect();

        let data = rows
            .map(|row| row.iter().map(cell_text).collect())
            .collect();

        Ok(Self::new(&headers, data))
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let col = *self.columns.get(column)?;
        self.rows.get(row)?.get(col)?.as_deref()
    }
}

/// One (Location, BFPO No, Postcode) column triple
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnGroup {
    pub location: String,
    pub bfpo_no: String,
    pub postcode: String,
}

impl ColumnGroup {
    fn numbered(suffix: Option<usize>) -> Self {
        let name = |base: &str| match suffix {
            Some(n) => format!("{base}.{n}"),
            None => base.to_string(),
        };
        Self {
            location: name(LOCATION_COLUMN),
            bfpo_no: name(BFPO_COLUMN),
            postcode: name(POSTCODE_COLUMN),
        }
    }

    fn is_present(&self, grid: &SheetGrid) -> bool {
        grid.has_column(&self.location)
            && grid.has_column(&self.bfpo_no)
            && grid.has_column(&self.postcode)
    }
}

/// Column groups present in the grid
///
/// The unsuffixed group is included when complete. Numbered groups are
/// scanned from `.1` upwards and the scan stops at the first incomplete one,
/// so a gap in the numbering hides every later group.
pub fn detect_column_groups(grid: &SheetGrid) -> Vec<ColumnGroup> {
    let mut groups = Vec::new();

    let first = ColumnGroup::numbered(None);
    if first.is_present(grid) {
        groups.push(first);
    }

    for n in 1.. {
        let group = ColumnGroup::numbered(Some(n));
        if !group.is_present(grid) {
            break;
        }
        groups.push(group);
    }

    groups
}

/// One FCDO entry read from a column group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FcdoRow {
    pub location: String,
    pub bfpo_num: String,
    pub postcode: Option<String>,
}

/// Entries from every row and column group, in row-major then group order
#[derive(Debug, Clone, Default)]
pub struct FcdoExtract {
    pub rows: Vec<FcdoRow>,
    pub groups: usize,
    /// Group cells with some content but a missing location or BFPO number
    pub skipped: usize,
}

pub fn extract_rows(grid: &SheetGrid) -> FcdoExtract {
    let groups = detect_column_groups(grid);
    debug!("Found {} column groups", groups.len());

    let mut extract = FcdoExtract {
        groups: groups.len(),
        ..Default::default()
    };

    for row in 0..grid.height() {
        for group in &groups {
            let location = grid.cell(row, &group.location);
            let bfpo_num = grid.cell(row, &group.bfpo_no);
            let postcode = grid.cell(row, &group.postcode);

            match (location, bfpo_num) {
                (Some(location), Some(bfpo_num)) => extract.rows.push(FcdoRow {
                    location: location.to_string(),
                    bfpo_num: bfpo_num.to_string(),
                    postcode: postcode.map(str::to_string),
                }),
                (None, None) if postcode.is_none() => {}
                _ => extract.skipped += 1,
            }
        }
    }

    extract
}

/// Reader for the FCDO BFPO indicator list
pub struct FcdoImporter;

impl FcdoImporter {
    /// Open a workbook from disk; the format is detected from the extension
    pub fn open_path(path: &Path) -> Result<SheetGrid, SheetError> {
        info!("Opening FCDO workbook: {}", path.display());
        let mut workbook =
            open_workbook_auto(path).map_err(|e| SheetError::WorkbookOpen(e.to_string()))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or(SheetError::NoWorksheet)?
            .map_err(|e| SheetError::WorkbookOpen(e.to_string()))?;

        Self::grid_from_range(&range)
    }

    /// Decode a downloaded workbook held in memory
    pub fn from_bytes(bytes: Vec<u8>) -> Result<SheetGrid, SheetError> {
        let mut workbook = open_workbook_auto_from_rs(bytes_to_cursor(bytes))
            .map_err(|e| SheetError::WorkbookOpen(e.to_string()))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or(SheetError::NoWorksheet)?
            .map_err(|e| SheetError::WorkbookOpen(e.to_string()))?;

        Self::grid_from_range(&range)
    }

    fn grid_from_range(range: &Range<Data>) -> Result<SheetGrid, SheetError> {
        let grid = SheetGrid::from_range(range)?;
        info!("Loaded FCDO spreadsheet with {} rows", grid.height());
        Ok(grid)
    }
}

fn clean_text(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == "nan" {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty | Data::Error(_) => return None,
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.is_finite() && f.fract() == 0.0 => format!("{f:.0}"),
        Data::Float(f) => f.to_string(),
        other => other.to_string(),
    };
    clean_text(text)
}
