// Section extraction from a full copy of the GOV.UK page

mod common;

use bfpo_scraper::sections::{parse_sections, Section};

#[test]
fn test_all_sections_found_in_page_order() {
    let page = parse_sections(common::SAMPLE_PAGE);

    let found: Vec<Section> = page.sections.iter().map(|s| s.section).collect();
    assert_eq!(found, Section::ALL.to_vec());
    assert!(page.missing.is_empty());
}

#[test]
fn test_header_rows_are_stripped() {
    let page = parse_sections(common::SAMPLE_PAGE);

    for section in &page.sections {
        for row in &section.rows {
            assert_ne!(row[0], "Location", "header leaked into {}", section.section);
        }
    }
}

#[test]
fn test_row_counts() {
    let page = parse_sections(common::SAMPLE_PAGE);

    assert_eq!(page.rows_for(Section::Germany).unwrap().len(), 3);
    assert_eq!(page.rows_for(Section::IsolatedDetachments).unwrap().len(), 2);
    assert_eq!(page.rows_for(Section::RestOfWorld).unwrap().len(), 2);
    assert_eq!(page.rows_for(Section::Exercises).unwrap().len(), 1);
}

#[test]
fn test_germany_table_is_not_confused_with_detachments() {
    let page = parse_sections(common::SAMPLE_PAGE);

    let germany = page.rows_for(Section::Germany).unwrap();
    assert_eq!(germany[0], vec!["Sennelager", "16", "BF1 2AU"]);

    let detachments = page.rows_for(Section::IsolatedDetachments).unwrap();
    assert_eq!(detachments[0], vec!["Outpost Alpha", "2001"]);
}

#[test]
fn test_renamed_heading_ids_fall_back_to_text() {
    let html = common::SAMPLE_PAGE
        .replace("id=\"hm-ships\"", "id=\"ships-2024\"")
        .replace("id=\"germany-bfpo-locations\"", "");

    let page = parse_sections(&html);
    assert!(page.missing.is_empty());
    assert_eq!(page.rows_for(Section::Ships).unwrap()[0][0], "HMS Albion");
    assert_eq!(page.rows_for(Section::Germany).unwrap()[0][0], "Sennelager");
}

#[test]
fn test_removed_section_is_reported_missing() {
    let html = common::SAMPLE_PAGE.replace(
        "<h2 id=\"operations\">Operations</h2>",
        "<h2 id=\"ops\">Deployments</h2>",
    );

    let page = parse_sections(&html);
    assert_eq!(page.missing, vec![Section::Operations]);
    assert_eq!(page.sections.len(), 8);
}
