/// ISO 3166-1 country catalog
///
/// English short names follow the ISO 3166 Maintenance Agency list. `common_name`
/// carries the widely used shorter form where one exists, and `official_name`
/// the long form where it differs from the short name. Both are used by the
/// fuzzy matcher; only `common_name` is used for the case-variant retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    pub alpha2: &'static str,
    pub name: &'static str,
    pub common_name: Option<&'static str>,
    pub official_name: Option<&'static str>,
}

impl Country {
    const fn new(alpha2: &'static str, name: &'static str) -> Self {
        Self {
            alpha2,
            name,
            common_name: None,
            official_name: None,
        }
    }

    const fn common(self, common_name: &'static str) -> Self {
        Self {
            common_name: Some(common_name),
            ..self
        }
    }

    const fn official(self, official_name: &'static str) -> Self {
        Self {
            official_name: Some(official_name),
            ..self
        }
    }

    /// All names a country is known by, short name first
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        std::iter::once(self.name)
            .chain(self.common_name)
            .chain(self.official_name)
    }
}

/// Look up a catalog entry by its alpha-2 code (case-insensitive)
pub fn by_alpha2(code: &str) -> Option<&'static Country> {
    COUNTRIES
        .iter()
        .find(|c| c.alpha2.eq_ignore_ascii_case(code))
}

pub static COUNTRIES: &[Country] = &[
    Country::new("AF", "Afghanistan").official("Islamic Republic of Afghanistan"),
    Country::new("AX", "Åland Islands"),
    Country::new("AL", "Albania").official("Republic of Albania"),
    Country::new("DZ", "Algeria").official("People's Democratic Republic of Algeria"),
    Country::new("AS", "American Samoa"),
    Country::new("AD", "Andorra").official("Principality of Andorra"),
    Country::new("AO", "Angola").official("Republic of Angola"),
    Country::new("AI", "Anguilla"),
    Country::new("AQ", "Antarctica"),
    Country::new("AG", "Antigua and Barbuda"),
    Country::new("AR", "Argentina").official("Argentine Republic"),
    Country::new("AM", "Armenia").official("Republic of Armenia"),
    Country::new("AW", "Aruba"),
    Country::new("AU", "Australia"),
    Country::new("AT", "Austria").official("Republic of Austria"),
    Country::new("AZ", "Azerbaijan").official("Republic of Azerbaijan"),
    Country::new("BS", "Bahamas").official("Commonwealth of the Bahamas"),
    Country::new("BH", "Bahrain").official("Kingdom of Bahrain"),
    Country::new("BD", "Bangladesh").official("People's Republic of Bangladesh"),
    Country::new("BB", "Barbados"),
    Country::new("BY", "Belarus").official("Republic of Belarus"),
    Country::new("BE", "Belgium").official("Kingdom of Belgium"),
    Country::new("BZ", "Belize"),
    Country::new("BJ", "Benin").official("Republic of Benin"),
    Country::new("BM", "Bermuda"),
    Country::new("BT", "Bhutan").official("Kingdom of Bhutan"),
    Country::new("BO", "Bolivia, Plurinational State of")
        .common("Bolivia")
        .official("Plurinational State of Bolivia"),
    Country::new("BQ", "Bonaire, Sint Eustatius and Saba"),
    Country::new("BA", "Bosnia and Herzegovina").official("Republic of Bosnia and Herzegovina"),
    Country::new("BW", "Botswana").official("Republic of Botswana"),
    Country::new("BV", "Bouvet Island"),
    Country::new("BR", "Brazil").official("Federative Republic of Brazil"),
    Country::new("IO", "British Indian Ocean Territory"),
    Country::new("BN", "Brunei Darussalam").common("Brunei"),
    Country::new("BG", "Bulgaria").official("Republic of Bulgaria"),
    Country::new("BF", "Burkina Faso"),
    Country::new("BI", "Burundi").official("Republic of Burundi"),
    Country::new("CV", "Cabo Verde")
        .common("Cape Verde")
        .official("Republic of Cabo Verde"),
    Country::new("KH", "Cambodia").official("Kingdom of Cambodia"),
    Country::new("CM", "Cameroon").official("Republic of Cameroon"),
    Country::new("CA", "Canada"),
    Country::new("KY", "Cayman Islands"),
    Country::new("CF", "Central African Republic"),
    Country::new("TD", "Chad").official("Republic of Chad"),
    Country::new("CL", "Chile").official("Republic of Chile"),
    Country::new("CN", "China").official("People's Republic of China"),
    Country::new("CX", "Christmas Island"),
    Country::new("CC", "Cocos (Keeling) Islands"),
    Country::new("CO", "Colombia").official("Republic of Colombia"),
    Country::new("KM", "Comoros").official("Union of the Comoros"),
    Country::new("CG", "Congo").official("Republic of the Congo"),
    Country::new("CD", "Congo, The Democratic Republic of the")
        .common("DR Congo")
        .official("Democratic Republic of the Congo"),
    Country::new("CK", "Cook Islands"),
    Country::new("CR", "Costa Rica").official("Republic of Costa Rica"),
    Country::new("CI", "Côte d'Ivoire")
        .common("Ivory Coast")
        .official("Republic of Côte d'Ivoire"),
    Country::new("HR", "Croatia").official("Republic of Croatia"),
    Country::new("CU", "Cuba").official("Republic of Cuba"),
    Country::new("CW", "Curaçao"),
    Country::new("CY", "Cyprus").official("Republic of Cyprus"),
    Country::new("CZ", "Czechia")
        .common("Czech Republic")
        .official("Czech Republic"),
    Country::new("DK", "Denmark").official("Kingdom of Denmark"),
    Country::new("DJ", "Djibouti").official("Republic of Djibouti"),
    Country::new("DM", "Dominica").official("Commonwealth of Dominica"),
    Country::new("DO", "Dominican Republic"),
    Country::new("EC", "Ecuador").official("Republic of Ecuador"),
    Country::new("EG", "Egypt").official("Arab Republic of Egypt"),
    Country::new("SV", "El Salvador").official("Republic of El Salvador"),
    Country::new("GQ", "Equatorial Guinea").official("Republic of Equatorial Guinea"),
    Country::new("ER", "Eritrea").official("the State of Eritrea"),
    Country::new("EE", "Estonia").official("Republic of Estonia"),
    Country::new("SZ", "Eswatini")
        .common("Swaziland")
        .official("Kingdom of Eswatini"),
    Country::new("ET", "Ethiopia").official("Federal Democratic Republic of Ethiopia"),
    Country::new("FK", "Falkland Islands (Malvinas)").common("Falkland Islands"),
    Country::new("FO", "Faroe Islands"),
    Country::new("FJ", "Fiji").official("Republic of Fiji"),
    Country::new("FI", "Finland").official("Republic of Finland"),
    Country::new("FR", "France").official("French Republic"),
    Country::new("GF", "French Guiana"),
    Country::new("PF", "French Polynesia"),
    Country::new("TF", "French Southern Territories"),
    Country::new("GA", "Gabon").official("Gabonese Republic"),
    Country::new("GM", "Gambia").official("Republic of the Gambia"),
    Country::new("GE", "Georgia"),
    Country::new("DE", "Germany").official("Federal Republic of Germany"),
    Country::new("GH", "Ghana").official("Republic of Ghana"),
    Country::new("GI", "Gibraltar"),
    Country::new("GR", "Greece").official("Hellenic Republic"),
    Country::new("GL", "Greenland"),
    Country::new("GD", "Grenada"),
    Country::new("GP", "Guadeloupe"),
    Country::new("GU", "Guam"),
    Country::new("GT", "Guatemala").official("Republic of Guatemala"),
    Country::new("GG", "Guernsey"),
    Country::new("GN", "Guinea").official("Republic of Guinea"),
    Country::new("GW", "Guinea-Bissau").official("Republic of Guinea-Bissau"),
    Country::new("GY", "Guyana").official("Republic of Guyana"),
    Country::new("HT", "Haiti").official("Republic of Haiti"),
    Country::new("HM", "Heard Island and McDonald Islands"),
    Country::new("VA", "Holy See (Vatican City State)").common("Vatican"),
    Country::new("HN", "Honduras").official("Republic of Honduras"),
    Country::new("HK", "Hong Kong")
        .official("Hong Kong Special Administrative Region of China"),
    Country::new("HU", "Hungary"),
    Country::new("IS", "Iceland").official("Republic of Iceland"),
    Country::new("IN", "India").official("Republic of India"),
    Country::new("ID", "Indonesia").official("Republic of Indonesia"),
    Country::new("IR", "Iran, Islamic Republic of")
        .common("Iran")
        .official("Islamic Republic of Iran"),
    Country::new("IQ", "Iraq").official("Republic of Iraq"),
    Country::new("IE", "Ireland"),
    Country::new("IM", "Isle of Man"),
    Country::new("IL", "Israel").official("State of Israel"),
    Country::new("IT", "Italy").official("Italian Republic"),
    Country::new("JM", "Jamaica"),
    Country::new("JP", "Japan"),
    Country::new("JE", "Jersey"),
    Country::new("JO", "Jordan").official("Hashemite Kingdom of Jordan"),
    Country::new("KZ", "Kazakhstan").official("Republic of Kazakhstan"),
    Country::new("KE", "Kenya").official("Republic of Kenya"),
    Country::new("KI", "Kiribati").official("Republic of Kiribati"),
    Country::new("KP", "Korea, Democratic People's Republic of")
        .common("North Korea")
        .official("Democratic People's Republic of Korea"),
    Country::new("KR", "Korea, Republic of").common("South Korea"),
    Country::new("KW", "Kuwait").official("State of Kuwait"),
    Country::new("KG", "Kyrgyzstan").official("Kyrgyz Republic"),
    Country::new("LA", "Lao People's Democratic Republic").common("Laos"),
    Country::new("LV", "Latvia").official("Republic of Latvia"),
    Country::new("LB", "Lebanon").official("Lebanese Republic"),
    Country::new("LS", "Lesotho").official("Kingdom of Lesotho"),
    Country::new("LR", "Liberia").official("Republic of Liberia"),
    Country::new("LY", "Libya").official("State of Libya"),
    Country::new("LI", "Liechtenstein").official("Principality of Liechtenstein"),
    Country::new("LT", "Lithuania").official("Republic of Lithuania"),
    Country::new("LU", "Luxembourg").official("Grand Duchy of Luxembourg"),
    Country::new("MO", "Macao").official("Macao Special Administrative Region of China"),
    Country::new("MG", "Madagascar").official("Republic of Madagascar"),
    Country::new("MW", "Malawi").official("Republic of Malawi"),
    Country::new("MY", "Malaysia"),
    Country::new("MV", "Maldives").official("Republic of Maldives"),
    Country::new("ML", "Mali").official("Republic of Mali"),
    Country::new("MT", "Malta").official("Republic of Malta"),
    Country::new("MH", "Marshall Islands").official("Republic of the Marshall Islands"),
    Country::new("MQ", "Martinique"),
    Country::new("MR", "Mauritania").official("Islamic Republic of Mauritania"),
    Country::new("MU", "Mauritius").official("Republic of Mauritius"),
    Country::new("YT", "Mayotte"),
    Country::new("MX", "Mexico").official("United Mexican States"),
    Country::new("FM", "Micronesia, Federated States of")
        .common("Micronesia")
        .official("Federated States of Micronesia"),
    Country::new("MD", "Moldova, Republic of")
        .common("Moldova")
        .official("Republic of Moldova"),
    Country::new("MC", "Monaco").official("Principality of Monaco"),
    Country::new("MN", "Mongolia"),
    Country::new("ME", "Montenegro"),
    Country::new("MS", "Montserrat"),
    Country::new("MA", "Morocco").official("Kingdom of Morocco"),
    Country::new("MZ", "Mozambique").official("Republic of Mozambique"),
    Country::new("MM", "Myanmar")
        .common("Burma")
        .official("Republic of Myanmar"),
    Country::new("NA", "Namibia").official("Republic of Namibia"),
    Country::new("NR", "Nauru").official("Republic of Nauru"),
    Country::new("NP", "Nepal").official("Federal Democratic Republic of Nepal"),
    Country::new("NL", "Netherlands").official("Kingdom of the Netherlands"),
    Country::new("NC", "New Caledonia"),
    Country::new("NZ", "New Zealand"),
    Country::new("NI", "Nicaragua").official("Republic of Nicaragua"),
    Country::new("NE", "Niger").official("Republic of the Niger"),
    Country::new("NG", "Nigeria").official("Federal Republic of Nigeria"),
    Country::new("NU", "Niue"),
    Country::new("NF", "Norfolk Island"),
    Country::new("MK", "North Macedonia").official("Republic of North Macedonia"),
    Country::new("MP", "Northern Mariana Islands")
        .official("Commonwealth of the Northern Mariana Islands"),
    Country::new("NO", "Norway").official("Kingdom of Norway"),
    Country::new("OM", "Oman").official("Sultanate of Oman"),
    Country::new("PK", "Pakistan").official("Islamic Republic of Pakistan"),
    Country::new("PW", "Palau").official("Republic of Palau"),
    Country::new("PS", "Palestine, State of")
        .common("Palestine")
        .official("the State of Palestine"),
    Country::new("PA", "Panama").official("Republic of Panama"),
    Country::new("PG", "Papua New Guinea").official("Independent State of Papua New Guinea"),
    Country::new("PY", "Paraguay").official("Republic of Paraguay"),
    Country::new("PE", "Peru").official("Republic of Peru"),
    Country::new("PH", "Philippines").official("Republic of the Philippines"),
    Country::new("PN", "Pitcairn"),
    Country::new("PL", "Poland").official("Republic of Poland"),
    Country::new("PT", "Portugal").official("Portuguese Republic"),
    Country::new("PR", "Puerto Rico"),
    Country::new("QA", "Qatar").official("State of Qatar"),
    Country::new("RE", "Réunion"),
    Country::new("RO", "Romania"),
    Country::new("RU", "Russian Federation").common("Russia"),
    Country::new("RW", "Rwanda").official("Rwandese Republic"),
    Country::new("BL", "Saint Barthélemy"),
    Country::new("SH", "Saint Helena, Ascension and Tristan da Cunha"),
    Country::new("KN", "Saint Kitts and Nevis"),
    Country::new("LC", "Saint Lucia"),
    Country::new("MF", "Saint Martin (French part)"),
    Country::new("PM", "Saint Pierre and Miquelon"),
    Country::new("VC", "Saint Vincent and the Grenadines"),
    Country::new("WS", "Samoa").official("Independent State of Samoa"),
    Country::new("SM", "San Marino").official("Republic of San Marino"),
    Country::new("ST", "Sao Tome and Principe")
        .official("Democratic Republic of Sao Tome and Principe"),
    Country::new("SA", "Saudi Arabia").official("Kingdom of Saudi Arabia"),
    Country::new("SN", "Senegal").official("Republic of Senegal"),
    Country::new("RS", "Serbia").official("Republic of Serbia"),
    Country::new("SC", "Seychelles").official("Republic of Seychelles"),
    Country::new("SL", "Sierra Leone").official("Republic of Sierra Leone"),
    Country::new("SG", "Singapore").official("Republic of Singapore"),
    Country::new("SX", "Sint Maarten (Dutch part)"),
    Country::new("SK", "Slovakia").official("Slovak Republic"),
    Country::new("SI", "Slovenia").official("Republic of Slovenia"),
    Country::new("SB", "Solomon Islands"),
    Country::new("SO", "Somalia").official("Federal Republic of Somalia"),
    Country::new("ZA", "South Africa").official("Republic of South Africa"),
    Country::new("GS", "South Georgia and the South Sandwich Islands"),
    Country::new("SS", "South Sudan").official("Republic of South Sudan"),
    Country::new("ES", "Spain").official("Kingdom of Spain"),
    Country::new("LK", "Sri Lanka").official("Democratic Socialist Republic of Sri Lanka"),
    Country::new("SD", "Sudan").official("Republic of the Sudan"),
    Country::new("SR", "Suriname").official("Republic of Suriname"),
    Country::new("SJ", "Svalbard and Jan Mayen"),
    Country::new("SE", "Sweden").official("Kingdom of Sweden"),
    Country::new("CH", "Switzerland").official("Swiss Confederation"),
    Country::new("SY", "Syrian Arab Republic").common("Syria"),
    Country::new("TW", "Taiwan, Province of China").common("Taiwan"),
    Country::new("TJ", "Tajikistan").official("Republic of Tajikistan"),
    Country::new("TZ", "Tanzania, United Republic of")
        .common("Tanzania")
        .official("United Republic of Tanzania"),
    Country::new("TH", "Thailand").official("Kingdom of Thailand"),
    Country::new("TL", "Timor-Leste")
        .common("East Timor")
        .official("Democratic Republic of Timor-Leste"),
    Country::new("TG", "Togo").official("Togolese Republic"),
    Country::new("TK", "Tokelau"),
    Country::new("TO", "Tonga").official("Kingdom of Tonga"),
    Country::new("TT", "Trinidad and Tobago").official("Republic of Trinidad and Tobago"),
    Country::new("TN", "Tunisia").official("Republic of Tunisia"),
    Country::new("TR", "Türkiye").official("Republic of Türkiye"),
    Country::new("TM", "Turkmenistan"),
    Country::new("TC", "Turks and Caicos Islands"),
    Country::new("TV", "Tuvalu"),
    Country::new("UG", "Uganda").official("Republic of Uganda"),
    Country::new("UA", "Ukraine"),
    Country::new("AE", "United Arab Emirates"),
    Country::new("GB", "United Kingdom")
        .official("United Kingdom of Great Britain and Northern Ireland"),
    Country::new("US", "United States").official("United States of America"),
    Country::new("UM", "United States Minor Outlying Islands"),
    Country::new("UY", "Uruguay").official("Eastern Republic of Uruguay"),
    Country::new("UZ", "Uzbekistan").official("Republic of Uzbekistan"),
    Country::new("VU", "Vanuatu").official("Republic of Vanuatu"),
    Country::new("VE", "Venezuela, Bolivarian Republic of")
        .common("Venezuela")
        .official("Bolivarian Republic of Venezuela"),
    Country::new("VN", "Viet Nam")
        .common("Vietnam")
        .official("Socialist Republic of Viet Nam"),
    Country::new("VG", "Virgin Islands, British").official("British Virgin Islands"),
    Country::new("VI", "Virgin Islands, U.S.").official("Virgin Islands of the United States"),
    Country::new("WF", "Wallis and Futuna"),
    Country::new("EH", "Western Sahara"),
    Country::new("YE", "Yemen").official("Republic of Yemen"),
    Country::new("ZM", "Zambia").official("Republic of Zambia"),
    Country::new("ZW", "Zimbabwe").official("Republic of Zimbabwe"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_has_all_assigned_codes() {
        assert_eq!(COUNTRIES.len(), 249);
    }

    #[test]
    fn test_alpha2_codes_are_unique_and_well_formed() {
        let mut seen = HashSet::new();
        for country in COUNTRIES {
            assert_eq!(country.alpha2.len(), 2, "{}", country.name);
            assert!(country.alpha2.chars().all(|c| c.is_ascii_uppercase()));
            assert!(seen.insert(country.alpha2), "duplicate {}", country.alpha2);
        }
    }

    #[test]
    fn test_by_alpha2_case_insensitive() {
        assert_eq!(by_alpha2("de").map(|c| c.name), Some("Germany"));
        assert!(by_alpha2("ZZ").is_none());
    }

    #[test]
    fn test_names_order() {
        let korea = by_alpha2("KR").unwrap();
        let names: Vec<_> = korea.names().collect();
        assert_eq!(names, vec!["Korea, Republic of", "South Korea"]);
    }
}
