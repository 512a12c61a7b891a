// Country code resolution
//
// Maps the free-text country names found in BFPO listings onto ISO 3166-1
// alpha-2 codes:
// - catalog: the ISO 3166-1 name catalog
// - overrides: policy table for names the catalog does not cover
// - matcher: swappable approximate-match strategy
// - resolver: the ordered resolution pipeline

pub mod catalog;
pub mod matcher;
pub mod overrides;
pub mod resolver;

pub use catalog::Country;
pub use matcher::{NameMatcher, StrsimMatcher};
pub use overrides::CountryOverrides;
pub use resolver::CountryCodeResolver;
