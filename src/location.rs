use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::config::ConfigError;

const FCDO_PATTERNS: &str = include_str!("../data/location_patterns.toml");
const NAVAL_PARTY_PATTERNS: &str = include_str!("../data/naval_party_patterns.toml");

/// One substring -> country rule
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LocationPattern {
    pub contains: String,
    pub country: String,
}

#[derive(Debug, Deserialize)]
struct PatternFile {
    #[serde(default, rename = "pattern")]
    patterns: Vec<LocationPattern>,
}

/// Infers a country from a location description by substring match
///
/// Patterns are tested case-insensitively in table order and the first hit
/// wins. Table order is significant: a specific substring ("limassol") must
/// come before any shorter one it contains ("lima").
#[derive(Debug, Clone)]
pub struct LocationInferencer {
    /// (lower-cased needle, country)
    patterns: Vec<(String, String)>,
}

impl LocationInferencer {
    pub fn new(patterns: Vec<LocationPattern>) -> Self {
        Self {
            patterns: patterns
                .into_iter()
                .map(|p| (p.contains.to_lowercase(), p.country))
                .collect(),
        }
    }

    /// City and post names used by FCDO spreadsheet locations
    pub fn fcdo_default() -> Self {
        Self::from_toml_str(FCDO_PATTERNS).expect("bundled location_patterns.toml is valid")
    }

    /// Naval party locations on the GOV.UK page
    pub fn naval_party_default() -> Self {
        Self::from_toml_str(NAVAL_PARTY_PATTERNS)
            .expect("bundled naval_party_patterns.toml is valid")
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let file: PatternFile = toml::from_str(source)?;
        Ok(Self::new(file.patterns))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        debug!("Loading location patterns from {}", path.display());
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn infer_country(&self, location: &str) -> Option<&str> {
        let location = location.to_lowercase();

        self.patterns
            .iter()
            .find(|(needle, _)| location.contains(needle.as_str()))
            .map(|(_, country)| country.as_str())
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
