use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use crate::config::ConfigError;

const DEFAULT_OVERRIDES: &str = include_str!("../../data/country_overrides.toml");

#[derive(Debug, Deserialize)]
struct OverridesFile {
    #[serde(default)]
    overrides: HashMap<String, String>,
}

/// Country names resolved by fixed policy rather than by catalog lookup
///
/// Covers informal or historical names ("Holland"), names the catalog has since
/// renamed ("Turkey") and synthetic placeholders ("Africa"). Keys match exactly.
#[derive(Debug, Clone, Default)]
pub struct CountryOverrides {
    entries: HashMap<String, String>,
}

impl CountryOverrides {
    /// Table bundled with the crate
    pub fn bundled() -> Self {
        Self::from_toml_str(DEFAULT_OVERRIDES).expect("bundled country_overrides.toml is valid")
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let file: OverridesFile = toml::from_str(source)?;
        Self::from_entries(file.overrides)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        debug!("Loading country overrides from {}", path.display());
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn from_entries<I, K, V>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut table = HashMap::new();
        for (name, code) in entries {
            let name = name.into();
            let code = code.into();
            if code.len() != 2 || !code.chars().all(|c| c.is_ascii_uppercase()) {
                return Err(ConfigError::InvalidCountryCode { name, code });
            }
            table.insert(name, code);
        }
        Ok(Self { entries: table })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains_code(&self, code: &str) -> bool {
        self.entries.values().any(|c| c == code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
