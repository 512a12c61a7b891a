use scraper::{ElementRef, Html, Selector};
use std::fmt;
use tracing::{debug, warn};

/// The logical sections of the GOV.UK "Find a BFPO number" page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Germany,
    UnitedKingdom,
    RestOfEurope,
    RestOfWorld,
    Ships,
    NavalParties,
    Operations,
    Exercises,
    IsolatedDetachments,
}

impl Section {
    /// Page order, which is also processing order
    pub const ALL: [Section; 9] = [
        Section::Germany,
        Section::UnitedKingdom,
        Section::RestOfEurope,
        Section::RestOfWorld,
        Section::Ships,
        Section::NavalParties,
        Section::Operations,
        Section::Exercises,
        Section::IsolatedDetachments,
    ];

    pub fn heading_tag(&self) -> &'static str {
        match self {
            Section::IsolatedDetachments => "h3",
            _ => "h2",
        }
    }

    pub fn heading_id(&self) -> &'static str {
        match self {
            Section::Germany => "germany-bfpo-locations",
            Section::UnitedKingdom => "uk-bfpo-locations",
            Section::RestOfEurope => "rest-of-europe-bfpo-locations",
            Section::RestOfWorld => "rest-of-the-world-bfpo-locations",
            Section::Ships => "hm-ships",
            Section::NavalParties => "naval-parties",
            Section::Operations => "operations",
            Section::Exercises => "exercises",
            Section::IsolatedDetachments => "isolated-detachments-box-numbers",
        }
    }

    /// Heading text fragments used when the id is missing; all must occur
    pub fn heading_keywords(&self) -> &'static [&'static str] {
        match self {
            Section::Germany => &["Germany", "BFPO"],
            Section::UnitedKingdom => &["UK", "BFPO"],
            Section::RestOfEurope => &["Rest of Europe"],
            Section::RestOfWorld => &["Rest of the world"],
            Section::Ships => &["HM Ships"],
            Section::NavalParties => &["Naval parties"],
            Section::Operations => &["Operations"],
            Section::Exercises => &["Exercises"],
            Section::IsolatedDetachments => &["Isolated detachments"],
        }
    }

    /// Cells a row needs before it is mapped to an address
    pub fn min_cells(&self) -> usize {
        match self {
            Section::RestOfEurope | Section::RestOfWorld => 4,
            Section::IsolatedDetachments => 2,
            _ => 3,
        }
    }

    fn heading_matches_text(&self, text: &str) -> bool {
        self.heading_keywords().iter().all(|k| text.contains(k))
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Germany => "Germany BFPO locations",
            Section::UnitedKingdom => "UK BFPO locations",
            Section::RestOfEurope => "Rest of Europe BFPO locations",
            Section::RestOfWorld => "Rest of the world BFPO locations",
            Section::Ships => "HM Ships",
            Section::NavalParties => "Naval parties",
            Section::Operations => "Operations",
            Section::Exercises => "Exercises",
            Section::IsolatedDetachments => "Isolated detachments",
        };
        f.write_str(name)
    }
}

/// Header-stripped text rows of one section's table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRows {
    pub section: Section,
    pub rows: Vec<Vec<String>>,
}

/// Everything extracted from one copy of the page
#[derive(Debug, Clone, Default)]
pub struct PageSections {
    pub sections: Vec<SectionRows>,
    /// Sections whose heading could not be found
    pub missing: Vec<Section>,
}

impl PageSections {
    pub fn rows_for(&self, section: Section) -> Option<&[Vec<String>]> {
        self.sections
            .iter()
            .find(|s| s.section == section)
            .map(|s| s.rows.as_slice())
    }
}

/// Locate every known section in the page and pull out its table rows
///
/// A section is found by heading id, falling back to heading text; its rows
/// come from the first `<table>` after the heading in document order.
pub fn parse_sections(html: &str) -> PageSections {
    debug!("Parsing BFPO page ({} bytes)", html.len());
    let document = Html::parse_document(html);
    let selector = Selector::parse("h2, h3, table").unwrap();

    // Document order
    let elements: Vec<ElementRef> = document.select(&selector).collect();

    let mut page = PageSections::default();

    for section in Section::ALL {
        let Some(heading_idx) = find_heading(&elements, section) else {
            warn!("Could not find {} section", section);
            page.missing.push(section);
            continue;
        };

        let table = elements[heading_idx + 1..]
            .iter()
            .find(|el| el.value().name() == "table");

        let rows = match table {
            Some(table) => table_rows(table),
            None => {
                debug!("No table follows the {} heading", section);
                Vec::new()
            }
        };

        debug!("Section {}: {} rows", section, rows.len());
        page.sections.push(SectionRows { section, rows });
    }

    page
}

fn find_heading(elements: &[ElementRef], section: Section) -> Option<usize> {
    let tag = section.heading_tag();
    let is_heading = |el: &ElementRef| el.value().name() == tag;

    elements
        .iter()
        .position(|el| is_heading(el) && el.value().id() == Some(section.heading_id()))
        .or_else(|| {
            elements.iter().position(|el| {
                is_heading(el) && section.heading_matches_text(&el.text().collect::<String>())
            })
        })
}

/// Text cells of every row except the header row; rows without cells are dropped
fn table_rows(table: &ElementRef) -> Vec<Vec<String>> {
    let row_selector = Selector::parse("tr").unwrap();
    let cell_selector = Selector::parse("td, th").unwrap();

    table
        .select(&row_selector)
        .skip(1)
        .map(|tr| {
            tr.select(&cell_selector)
                .map(|cell| cell.text().map(str::trim).collect::<String>())
                .collect::<Vec<_>>()
        })
        .filter(|cells| !cells.is_empty())
        .collect()
}
