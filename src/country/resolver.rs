use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, warn};

use super::catalog::{self, Country, COUNTRIES};
use super::matcher::{NameMatcher, StrsimMatcher};
use super::overrides::CountryOverrides;
use crate::utils::title_case;

/// Resolves free-text country names to ISO 3166-1 alpha-2 codes
///
/// Resolution order, first hit wins:
/// 1. override table (exact key)
/// 2. catalog short name (exact, case-sensitive)
/// 3. fuzzy match over all catalog names via the configured [`NameMatcher`]
/// 4. upper / lower / title case variants against catalog common names
///
/// A miss is logged and counted, never an error.
pub struct CountryCodeResolver {
    overrides: CountryOverrides,
    matcher: Box<dyn NameMatcher>,
    catalog: &'static [Country],
    unresolved: AtomicUsize,
}

impl CountryCodeResolver {
    pub fn new(overrides: CountryOverrides) -> Self {
        Self::with_matcher(overrides, Box::new(StrsimMatcher::default()))
    }

    pub fn with_matcher(overrides: CountryOverrides, matcher: Box<dyn NameMatcher>) -> Self {
        Self {
            overrides,
            matcher,
            catalog: COUNTRIES,
            unresolved: AtomicUsize::new(0),
        }
    }

    pub fn resolve(&self, country_name: &str) -> Option<String> {
        if country_name.trim().is_empty() {
            return None;
        }

        if let Some(code) = self.overrides.get(country_name) {
            debug!("Resolved '{}' via override table: {}", country_name, code);
            return Some(code.to_string());
        }

        if let Some(country) = self.catalog.iter().find(|c| c.name == country_name) {
            return Some(country.alpha2.to_string());
        }

        if let Some(country) = self.matcher.best_match(country_name, self.catalog) {
            return Some(country.alpha2.to_string());
        }

        let variants = [
            country_name.to_uppercase(),
            country_name.to_lowercase(),
            title_case(country_name),
        ];
        for variant in &variants {
            if let Some(country) = self
                .catalog
                .iter()
                .find(|c| c.common_name == Some(variant.as_str()))
            {
                debug!(
                    "Resolved '{}' via common name '{}': {}",
                    country_name, variant, country.alpha2
                );
                return Some(country.alpha2.to_string());
            }
        }

        self.unresolved.fetch_add(1, Ordering::Relaxed);
        warn!("Could not map country '{}' to ISO code", country_name);
        None
    }

    /// Two-character code that is either an override value or an assigned ISO code
    pub fn is_valid_code(&self, code: &str) -> bool {
        if code.chars().count() != 2 {
            return false;
        }

        if self.overrides.contains_code(code) {
            return true;
        }

        catalog::by_alpha2(code).is_some()
    }

    /// Number of `resolve` calls that found no code
    pub fn unresolved_count(&self) -> usize {
        self.unresolved.load(Ordering::Relaxed)
    }
}

impl Default for CountryCodeResolver {
    fn default() -> Self {
        Self::new(CountryOverrides::bundled())
    }
}

impl std::fmt::Debug for CountryCodeResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountryCodeResolver")
            .field("overrides", &self.overrides.len())
            .field("unresolved", &self.unresolved_count())
            .finish()
    }
}
