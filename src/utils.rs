/// Shared helpers for BFPO number handling
///
/// BFPO numbers arrive in several shapes: bare digits ("15"), already prefixed
/// ("BFPO 15"), lower-cased ("bfpo 15"), or as aliases for exercises and
/// operations ("EXERCISE-A"). These helpers put them into the single canonical
/// "BFPO <value>" form and derive the sort key used for the output document.
use regex::Regex;
use std::sync::LazyLock;

/// Literal prefix every canonical BFPO number starts with.
pub const BFPO_PREFIX: &str = "BFPO ";

/// Sort key for BFPO numbers that are not purely numeric; above every real number.
pub const NON_NUMERIC_SORT_KEY: u64 = u64::MAX;

static PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^bfpo\s*").expect("static BFPO prefix regex"));

/// Put a raw BFPO number into canonical "BFPO <value>" form
///
/// The prefix check is case-insensitive and idempotent: an existing prefix is
/// normalised rather than doubled.
///
/// # Examples
///
/// ```
/// use bfpo_scraper::utils::canonical_bfpo_number;
///
/// assert_eq!(canonical_bfpo_number("15"), "BFPO 15");
/// assert_eq!(canonical_bfpo_number("bfpo 15"), "BFPO 15");
/// assert_eq!(canonical_bfpo_number("BFPO 15"), "BFPO 15");
/// assert_eq!(canonical_bfpo_number("  005 "), "BFPO 005");
/// ```
pub fn canonical_bfpo_number(raw: &str) -> String {
    let trimmed = raw.trim();
    let remainder = PREFIX_RE.replace(trimmed, "");
    format!("{BFPO_PREFIX}{}", remainder.trim())
}

/// Sort key for a canonical BFPO number
///
/// Numeric values sort by their integer value; anything else (exercise and
/// operation aliases) gets [`NON_NUMERIC_SORT_KEY`] so it lands after the
/// numbered entries.
///
/// # Examples
///
/// ```
/// use bfpo_scraper::utils::{bfpo_sort_key, NON_NUMERIC_SORT_KEY};
///
/// assert_eq!(bfpo_sort_key("BFPO 105"), 105);
/// assert_eq!(bfpo_sort_key("BFPO 005"), 5);
/// assert_eq!(bfpo_sort_key("BFPO EXERCISE-A"), NON_NUMERIC_SORT_KEY);
/// assert!(bfpo_sort_key("BFPO 5062") < bfpo_sort_key("BFPO EXERCISE-A"));
/// ```
pub fn bfpo_sort_key(bfpo_num: &str) -> u64 {
    let value = bfpo_num.replace(BFPO_PREFIX, "");
    let value = value.trim();

    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
        return NON_NUMERIC_SORT_KEY;
    }

    value.parse::<u64>().unwrap_or(NON_NUMERIC_SORT_KEY)
}

/// Python-style title casing: first letter of each alphabetic run upper-cased,
/// the rest lower-cased
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_word_start = true;

    for c in value.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_bare_number() {
        assert_eq!(canonical_bfpo_number("15"), "BFPO 15");
    }

    #[test]
    fn test_canonical_lowercase_prefix() {
        assert_eq!(canonical_bfpo_number("bfpo 15"), "BFPO 15");
    }

    #[test]
    fn test_canonical_is_idempotent() {
        let once = canonical_bfpo_number("22");
        assert_eq!(canonical_bfpo_number(&once), once);
    }

    #[test]
    fn test_canonical_prefix_without_space() {
        assert_eq!(canonical_bfpo_number("BFPO105"), "BFPO 105");
    }

    #[test]
    fn test_canonical_keeps_alias_text() {
        assert_eq!(canonical_bfpo_number("EXERCISE-A"), "BFPO EXERCISE-A");
    }

    #[test]
    fn test_sort_key_leading_zeros() {
        assert_eq!(bfpo_sort_key("BFPO 005"), 5);
    }

    #[test]
    fn test_sort_key_non_numeric() {
        assert_eq!(bfpo_sort_key("BFPO 123A"), NON_NUMERIC_SORT_KEY);
        assert_eq!(bfpo_sort_key("BFPO "), NON_NUMERIC_SORT_KEY);
    }

    #[test]
    fn test_sort_key_aliases_after_four_digit_numbers() {
        assert_eq!(bfpo_sort_key("BFPO 5062"), 5062);
        assert!(bfpo_sort_key("BFPO 9999") < bfpo_sort_key("BFPO EXERCISE-A"));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("south korea"), "South Korea");
        assert_eq!(title_case("SOUTH KOREA"), "South Korea");
        assert_eq!(title_case("guinea-bissau"), "Guinea-Bissau");
    }
}
