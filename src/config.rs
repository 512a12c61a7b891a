use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::country::CountryOverrides;
use crate::location::LocationInferencer;

pub const DEFAULT_GOV_UK_BFPO_URL: &str = "https://www.gov.uk/bfpo/find-a-bfpo-number";
pub const DEFAULT_FCDO_ODS_URL: &str = "https://assets.publishing.service.gov.uk/media/5f3f87ae8fa8f5371bb55f64/20200820-Foreign__Commonwealth_and_Development_Office_BFPO_Indicator_List_v2.ods";
pub const DEFAULT_OUTPUT_FILE: &str = "bfpo_config.xml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid country code '{code}' for '{name}' (expected two upper-case letters)")]
    InvalidCountryCode { name: String, code: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub gov_uk_bfpo_url: String,
    pub fcdo_ods_url: String,
    pub output_file: PathBuf,
    pub http_timeout_secs: u64,
    pub http_retries: usize,
    pub country_overrides_file: Option<PathBuf>,
    pub location_patterns_file: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            gov_uk_bfpo_url: env::var("GOV_UK_BFPO_URL")
                .unwrap_or_else(|_| DEFAULT_GOV_UK_BFPO_URL.to_string()),
            fcdo_ods_url: env::var("FCDO_ODS_URL")
                .unwrap_or_else(|_| DEFAULT_FCDO_ODS_URL.to_string()),
            output_file: env::var("BFPO_OUTPUT_FILE")
                .unwrap_or_else(|_| DEFAULT_OUTPUT_FILE.to_string())
                .into(),
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
            http_retries: env::var("HTTP_RETRIES")
                .unwrap_or_else(|_| "2".to_string())
                .parse()
                .unwrap_or(2),
            country_overrides_file: env::var("COUNTRY_OVERRIDES_FILE").ok().map(PathBuf::from),
            location_patterns_file: env::var("LOCATION_PATTERNS_FILE").ok().map(PathBuf::from),
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Override table from `COUNTRY_OVERRIDES_FILE`, or the bundled one
    pub fn country_overrides(&self) -> Result<CountryOverrides, ConfigError> {
        match &self.country_overrides_file {
            Some(path) => CountryOverrides::from_file(path),
            None => Ok(CountryOverrides::bundled()),
        }
    }

    /// FCDO inference table from `LOCATION_PATTERNS_FILE`, or the bundled one
    pub fn location_inferencer(&self) -> Result<LocationInferencer, ConfigError> {
        match &self.location_patterns_file {
            Some(path) => LocationInferencer::from_file(path),
            None => Ok(LocationInferencer::fcdo_default()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            gov_uk_bfpo_url: DEFAULT_GOV_UK_BFPO_URL.to_string(),
            fcdo_ods_url: DEFAULT_FCDO_ODS_URL.to_string(),
            output_file: DEFAULT_OUTPUT_FILE.into(),
            http_timeout_secs: 30,
            http_retries: 2,
            country_overrides_file: None,
            location_patterns_file: None,
        }
    }
}
