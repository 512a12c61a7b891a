use super::catalog::Country;

/// Approximate name matching over the country catalog
///
/// Implementations rank catalog entries against a free-text query and return
/// the best candidate, or `None` when nothing is close enough. The resolver
/// only relies on "top-ranked candidate or nothing", so scoring and thresholds
/// are left to the implementation.
pub trait NameMatcher: Send + Sync {
    fn best_match(&self, query: &str, catalog: &'static [Country]) -> Option<&'static Country>;
}

/// Default matcher: substring containment plus normalized Levenshtein similarity
#[derive(Debug, Clone)]
pub struct StrsimMatcher {
    threshold: f64,
}

/// Substring hits score in (SUBSTRING_BASE, SUBSTRING_BASE + 0.09], tighter fits higher.
const SUBSTRING_BASE: f64 = 0.9;
const MIN_SUBSTRING_LEN: usize = 4;

impl StrsimMatcher {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    fn score(query: &str, candidate: &str) -> f64 {
        let candidate = normalize(candidate);

        if query == candidate {
            return 1.0;
        }

        let similarity = strsim::normalized_levenshtein(query, &candidate);

        if query.chars().count() >= MIN_SUBSTRING_LEN && candidate.contains(query) {
            let fit = query.chars().count() as f64 / candidate.chars().count() as f64;
            return similarity.max(SUBSTRING_BASE + 0.09 * fit);
        }

        similarity
    }
}

impl Default for StrsimMatcher {
    fn default() -> Self {
        Self::new(0.85)
    }
}

impl NameMatcher for StrsimMatcher {
    fn best_match(&self, query: &str, catalog: &'static [Country]) -> Option<&'static Country> {
        let query = normalize(query);
        if query.is_empty() {
            return None;
        }

        let mut best: Option<(&'static Country, f64)> = None;

        for country in catalog {
            let score = country
                .names()
                .map(|name| Self::score(&query, name))
                .fold(0.0_f64, f64::max);

            // Strictly greater keeps the earliest catalog entry on ties
            if score >= self.threshold && best.map_or(true, |(_, s)| score > s) {
                best = Some((country, score));
            }
        }

        if let Some((country, score)) = best {
            tracing::debug!(
                "Fuzzy matched '{}' to '{}' ({}) with score {:.3}",
                query,
                country.name,
                country.alpha2,
                score
            );
        }

        best.map(|(country, _)| country)
    }
}

/// Lower-case and collapse runs of whitespace
fn normalize(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
