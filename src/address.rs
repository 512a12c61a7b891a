use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::country::CountryCodeResolver;
use crate::utils::canonical_bfpo_number;

/// Postcode shared by every isolated detachment (all routed via BFPO 105)
pub const ISOLATED_DETACHMENT_POSTCODE: &str = "BF1 0AX";

/// Parent BFPO number for isolated detachment box numbers
pub const ISOLATED_DETACHMENT_BFPO: &str = "105";

/// Kind of BFPO destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BfpoType {
    Static,
    Ship,
    NavalParty,
    Operation,
    Exercise,
    Detachment,
    Fcdo,
}

impl BfpoType {
    pub const ALL: [BfpoType; 7] = [
        BfpoType::Static,
        BfpoType::Ship,
        BfpoType::NavalParty,
        BfpoType::Operation,
        BfpoType::Exercise,
        BfpoType::Detachment,
        BfpoType::Fcdo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BfpoType::Static => "static",
            BfpoType::Ship => "ship",
            BfpoType::NavalParty => "navalparty",
            BfpoType::Operation => "operation",
            BfpoType::Exercise => "exercise",
            BfpoType::Detachment => "detachment",
            BfpoType::Fcdo => "fcdo",
        }
    }
}

impl fmt::Display for BfpoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown BFPO type: {0}")]
pub struct UnknownBfpoType(pub String);

impl FromStr for BfpoType {
    type Err = UnknownBfpoType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BfpoType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownBfpoType(s.to_string()))
    }
}

/// Canonical BFPO address, one per source row
///
/// Only [`AddressNormalizer::build`] creates these, so the field invariants
/// (prefixed number, no empty optionals, code only with a country, box number
/// only on detachments) hold for every instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRecord {
    bfpo_num: String,
    box_num: Option<String>,
    location: String,
    postcode: Option<String>,
    country: Option<String>,
    country_code: Option<String>,
    bfpo_type: BfpoType,
}

impl AddressRecord {
    pub fn bfpo_num(&self) -> &str {
        &self.bfpo_num
    }

    pub fn box_num(&self) -> Option<&str> {
        self.box_num.as_deref()
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn postcode(&self) -> Option<&str> {
        self.postcode.as_deref()
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn country_code(&self) -> Option<&str> {
        self.country_code.as_deref()
    }

    pub fn bfpo_type(&self) -> BfpoType {
        self.bfpo_type
    }
}

/// Raw per-source input for one address
#[derive(Debug, Clone, Copy)]
pub struct RawAddress<'a> {
    pub bfpo_num: &'a str,
    pub location: &'a str,
    pub postcode: Option<&'a str>,
    pub country: Option<&'a str>,
    pub bfpo_type: BfpoType,
    pub box_num: Option<&'a str>,
}

impl<'a> RawAddress<'a> {
    pub fn new(bfpo_num: &'a str, location: &'a str, bfpo_type: BfpoType) -> Self {
        Self {
            bfpo_num,
            location,
            postcode: None,
            country: None,
            bfpo_type,
            box_num: None,
        }
    }

    pub fn postcode(mut self, postcode: Option<&'a str>) -> Self {
        self.postcode = postcode;
        self
    }

    pub fn country(mut self, country: Option<&'a str>) -> Self {
        self.country = country;
        self
    }

    pub fn box_num(mut self, box_num: Option<&'a str>) -> Self {
        self.box_num = box_num;
        self
    }
}

/// Builds [`AddressRecord`]s and enriches them with country codes
#[derive(Debug, Clone)]
pub struct AddressNormalizer {
    resolver: Arc<CountryCodeResolver>,
}

impl AddressNormalizer {
    pub fn new(resolver: Arc<CountryCodeResolver>) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &CountryCodeResolver {
        &self.resolver
    }

    /// Normalise one raw address
    ///
    /// Never fails: callers decide whether a row is usable before calling.
    pub fn build(&self, raw: RawAddress<'_>) -> AddressRecord {
        let country = non_empty(raw.country);
        let country_code = country
            .as_deref()
            .and_then(|name| self.resolver.resolve(name));

        let box_num = match raw.bfpo_type {
            BfpoType::Detachment => non_empty(raw.box_num),
            _ => None,
        };

        AddressRecord {
            bfpo_num: canonical_bfpo_number(raw.bfpo_num),
            box_num,
            location: raw.location.trim().to_string(),
            postcode: non_empty(raw.postcode),
            country,
            country_code,
            bfpo_type: raw.bfpo_type,
        }
    }
}

impl Default for AddressNormalizer {
    fn default() -> Self {
        Self::new(Arc::new(CountryCodeResolver::default()))
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
