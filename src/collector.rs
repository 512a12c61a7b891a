use std::collections::BTreeSet;

use crate::address::AddressRecord;
use crate::utils::bfpo_sort_key;

/// Append-only accumulator for records from every source in a run
///
/// Records are never merged or deduplicated; the same BFPO number from two
/// sources yields two entries.
#[derive(Debug, Default)]
pub struct RecordCollector {
    records: Vec<AddressRecord>,
}

impl RecordCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, record: AddressRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn stats(&self) -> CountryStats {
        CountryStats::from_records(&self.records)
    }

    /// Records in output order: ascending BFPO number, non-numeric last,
    /// insertion order kept among equal keys
    pub fn finalize(mut self) -> Vec<AddressRecord> {
        // sort_by_key is stable
        self.records.sort_by_key(|r| bfpo_sort_key(r.bfpo_num()));
        self.records
    }
}

impl Extend<AddressRecord> for RecordCollector {
    fn extend<T: IntoIterator<Item = AddressRecord>>(&mut self, iter: T) {
        self.records.extend(iter);
    }
}

/// Country enrichment coverage for the run-end summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountryStats {
    pub total: usize,
    pub with_country: usize,
    pub with_code: usize,
    /// Distinct country names that did not resolve, sorted
    pub unresolved: BTreeSet<String>,
}

impl CountryStats {
    pub fn from_records(records: &[AddressRecord]) -> Self {
        let mut stats = CountryStats {
            total: records.len(),
            ..Default::default()
        };

        for record in records {
            if let Some(country) = record.country() {
                stats.with_country += 1;
                match record.country_code() {
                    Some(_) => stats.with_code += 1,
                    None => {
                        stats.unresolved.insert(country.to_string());
                    }
                }
            }
        }

        stats
    }

    pub fn unmapped(&self) -> usize {
        self.with_country - self.with_code
    }
}
