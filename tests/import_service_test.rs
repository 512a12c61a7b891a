// End-to-end import runs against a mocked GOV.UK page

mod common;

use bfpo_scraper::address::BfpoType;
use bfpo_scraper::collector::RecordCollector;
use bfpo_scraper::importers::SheetGrid;
use bfpo_scraper::sections::parse_sections;
use bfpo_scraper::services::{FcdoSource, ImportError};
use bfpo_scraper::xml_output;
use chrono::NaiveDate;
use mockito::Server;

const PAGE_PATH: &str = "/bfpo/find-a-bfpo-number";

async fn page_server() -> (mockito::ServerGuard, mockito::Mock) {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", PAGE_PATH)
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(common::SAMPLE_PAGE)
        .create_async()
        .await;
    (server, mock)
}

#[tokio::test]
async fn test_run_without_fcdo() {
    let (server, mock) = page_server().await;
    let service = common::test_service(format!("{}{}", server.url(), PAGE_PATH));

    let summary = service.run(FcdoSource::Skip).await.unwrap();

    assert_eq!(summary.records.len(), common::SAMPLE_PAGE_RECORDS);
    assert_eq!(summary.gov_uk_records, common::SAMPLE_PAGE_RECORDS);
    assert_eq!(summary.fcdo_records, 0);
    assert_eq!(summary.skipped_rows, 1);
    assert!(summary.missing_sections.is_empty());
    assert_eq!(summary.fcdo_unavailable.as_deref(), Some("skipped"));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_records_sorted_by_bfpo_number() {
    let (server, _mock) = page_server().await;
    let service = common::test_service(format!("{}{}", server.url(), PAGE_PATH));

    let summary = service.run(FcdoSource::Skip).await.unwrap();
    let numbers: Vec<&str> = summary.records.iter().map(|r| r.bfpo_num()).collect();

    assert_eq!(
        numbers,
        vec![
            "BFPO 3",
            "BFPO 005",
            "BFPO 16",
            "BFPO 22",
            "BFPO 52",
            "BFPO 105",
            "BFPO 105",
            "BFPO 140",
            "BFPO 204",
            "BFPO 485",
            "BFPO 655",
            "BFPO 677",
            "BFPO 678",
            "BFPO EXERCISE-A",
        ]
    );

    // Detachments keep page order
    assert_eq!(summary.records[5].location(), "Outpost Alpha");
    assert_eq!(summary.records[5].box_num(), Some("2001"));
    assert_eq!(summary.records[6].location(), "Outpost Bravo");
}

#[tokio::test]
async fn test_country_statistics() {
    let (server, _mock) = page_server().await;
    let service = common::test_service(format!("{}{}", server.url(), PAGE_PATH));

    let summary = service.run(FcdoSource::Skip).await.unwrap();

    assert_eq!(summary.stats.total, 14);
    assert_eq!(summary.stats.with_country, 11);
    assert_eq!(summary.stats.with_code, 10);
    assert_eq!(summary.stats.unmapped(), 1);
    assert!(summary.stats.unresolved.contains("Not-A-Real-Country"));
}

#[tokio::test]
async fn test_section_specific_mapping() {
    let (server, _mock) = page_server().await;
    let service = common::test_service(format!("{}{}", server.url(), PAGE_PATH));

    let summary = service.run(FcdoSource::Skip).await.unwrap();
    let find = |location: &str| {
        summary
            .records
            .iter()
            .find(|r| r.location() == location)
            .unwrap_or_else(|| panic!("no record for {location}"))
    };

    let brunssum = find("Brunssum");
    assert_eq!(brunssum.country(), Some("Holland"));
    assert_eq!(brunssum.country_code(), Some("NL"));

    let diego_garcia = find("NP 1002 Diego Garcia");
    assert_eq!(diego_garcia.bfpo_type(), BfpoType::NavalParty);
    assert_eq!(diego_garcia.country_code(), Some("IO"));

    let albion = find("HMS Albion");
    assert_eq!(albion.bfpo_type(), BfpoType::Ship);
    assert_eq!(albion.country(), None);

    assert_eq!(find("Northwood").country_code(), Some("GB"));
    assert_eq!(find("Op Shader").bfpo_type(), BfpoType::Operation);
}

#[tokio::test]
async fn test_missing_fcdo_file_is_not_fatal() {
    let (server, _mock) = page_server().await;
    let service = common::test_service(format!("{}{}", server.url(), PAGE_PATH));

    let summary = service
        .run(FcdoSource::LocalFile("/nonexistent/fcdo.ods".into()))
        .await
        .unwrap();

    assert_eq!(summary.records.len(), common::SAMPLE_PAGE_RECORDS);
    let reason = summary.fcdo_unavailable.unwrap();
    assert!(reason.contains("not found"), "{reason}");
}

#[tokio::test]
async fn test_fcdo_download_failure_is_not_fatal() {
    let (mut server, _mock) = page_server().await;
    let fcdo_mock = server
        .mock("GET", "/fcdo.ods")
        .with_status(404)
        .create_async()
        .await;

    let service = common::test_service(format!("{}{}", server.url(), PAGE_PATH));
    let summary = service
        .run(FcdoSource::Download(format!("{}/fcdo.ods", server.url())))
        .await
        .unwrap();

    assert_eq!(summary.fcdo_records, 0);
    assert_eq!(summary.records.len(), common::SAMPLE_PAGE_RECORDS);
    assert!(summary.fcdo_unavailable.is_some());

    fcdo_mock.assert_async().await;
}

#[tokio::test]
async fn test_fcdo_unexpected_status_is_not_fatal() {
    let (mut server, _mock) = page_server().await;
    let fcdo_mock = server
        .mock("GET", "/fcdo.ods")
        .with_status(304)
        .create_async()
        .await;

    let service = common::test_service(format!("{}{}", server.url(), PAGE_PATH));
    let summary = service
        .run(FcdoSource::Download(format!("{}/fcdo.ods", server.url())))
        .await
        .unwrap();

    assert_eq!(summary.records.len(), common::SAMPLE_PAGE_RECORDS);
    let reason = summary.fcdo_unavailable.unwrap();
    assert!(reason.contains("304"), "{reason}");

    fcdo_mock.assert_async().await;
}

#[tokio::test]
async fn test_fcdo_workbook_merged_with_page() {
    let (server, _mock) = page_server().await;
    let service = common::test_service(format!("{}{}", server.url(), PAGE_PATH));

    let summary = service
        .run(FcdoSource::LocalFile(common::SAMPLE_WORKBOOK_PATH.into()))
        .await
        .unwrap();

    assert_eq!(summary.fcdo_unavailable, None);
    assert_eq!(summary.fcdo_records, common::SAMPLE_WORKBOOK_RECORDS);
    assert_eq!(
        summary.records.len(),
        common::SAMPLE_PAGE_RECORDS + common::SAMPLE_WORKBOOK_RECORDS
    );
    // One short page row, one FCDO entry without a number
    assert_eq!(summary.skipped_rows, 2);

    let tail: Vec<(&str, Option<&str>)> = summary.records[12..]
        .iter()
        .map(|r| (r.bfpo_num(), r.country_code()))
        .collect();
    assert_eq!(
        tail,
        vec![
            ("BFPO 678", None),
            ("BFPO 5001", Some("CY")),
            ("BFPO 5062", Some("FR")),
            ("BFPO 5065", Some("IT")),
            ("BFPO 5080", Some("JP")),
            ("BFPO EXERCISE-A", None),
        ]
    );

    let paris = &summary.records[14];
    assert_eq!(paris.location(), "British Embassy Paris");
    assert_eq!(paris.postcode(), Some("BF1 5AA"));
    assert_eq!(paris.bfpo_type(), BfpoType::Fcdo);
    assert_eq!(summary.records[15].postcode(), None);
}

#[tokio::test]
async fn test_downloaded_fcdo_workbook() {
    let (mut server, _mock) = page_server().await;
    let fcdo_mock = server
        .mock("GET", "/fcdo.xlsx")
        .with_status(200)
        .with_body(common::SAMPLE_WORKBOOK)
        .create_async()
        .await;

    let service = common::test_service(format!("{}{}", server.url(), PAGE_PATH));
    let summary = service
        .run(FcdoSource::Download(format!("{}/fcdo.xlsx", server.url())))
        .await
        .unwrap();

    assert_eq!(summary.fcdo_unavailable, None);
    assert_eq!(summary.fcdo_records, common::SAMPLE_WORKBOOK_RECORDS);
    assert_eq!(summary.stats.with_code, 10 + common::SAMPLE_WORKBOOK_RECORDS);
    assert_eq!(
        summary.records.last().map(|r| r.bfpo_num()),
        Some("BFPO EXERCISE-A")
    );

    fcdo_mock.assert_async().await;
}

#[test]
fn test_ingest_grid_after_page_sections() {
    let service = common::test_service(String::new());
    let mut collector = RecordCollector::new();

    let page = parse_sections(common::SAMPLE_PAGE);
    let (page_added, _) = service.ingest_sections(&page, &mut collector);

    let grid = SheetGrid::new(
        &["Location", "BFPO No", "Postcode"],
        vec![
            vec![Some("British Embassy Washington".into()), Some("5090".into()), None],
            vec![Some("Unlisted Mission".into()), Some("4321".into()), None],
        ],
    );
    let (fcdo_added, skipped) = service.ingest_fcdo_grid(&grid, &mut collector);
    assert_eq!((fcdo_added, skipped), (2, 0));

    let records = collector.finalize();
    assert_eq!(records.len(), page_added + 2);

    let numbers: Vec<&str> = records[records.len() - 3..]
        .iter()
        .map(|r| r.bfpo_num())
        .collect();
    assert_eq!(numbers, vec!["BFPO 4321", "BFPO 5090", "BFPO EXERCISE-A"]);

    assert_eq!(records[records.len() - 3].country(), None);
    assert_eq!(records[records.len() - 2].country_code(), Some("US"));
}

#[tokio::test]
async fn test_page_failure_is_fatal() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", PAGE_PATH)
        .with_status(500)
        .create_async()
        .await;

    let service = common::test_service(format!("{}{}", server.url(), PAGE_PATH));
    let result = service.run(FcdoSource::Skip).await;

    assert!(matches!(result, Err(ImportError::Fetch(_))));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_generated_document_reads_back() {
    let (server, _mock) = page_server().await;
    let service = common::test_service(format!("{}{}", server.url(), PAGE_PATH));
    let summary = service.run(FcdoSource::Skip).await.unwrap();

    let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    let resolver = service.normalizer().resolver();
    let xml = xml_output::to_xml_string(&summary.records, resolver, date).unwrap();
    let parsed = xml_output::parse_document(&xml).unwrap();

    assert_eq!(parsed.len(), summary.records.len());
    for (record, address) in summary.records.iter().zip(&parsed) {
        assert_eq!(address.bfpo_num, record.bfpo_num());
        assert_eq!(address.location, record.location());
        assert_eq!(address.bfpo_type, record.bfpo_type().as_str());
        assert_eq!(address.country_code.as_deref(), record.country_code());
    }
}

#[tokio::test]
async fn test_write_file() {
    let (server, _mock) = page_server().await;
    let service = common::test_service(format!("{}{}", server.url(), PAGE_PATH));
    let summary = service.run(FcdoSource::Skip).await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bfpo_addresses.xml");
    let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

    xml_output::write_file(&path, &summary.records, service.normalizer().resolver(), date)
        .unwrap();

    let xml = std::fs::read_to_string(&path).unwrap();
    assert!(xml.contains("Last Updated: 2025-03-01"));
    assert!(xml.contains("<Type>navalparty</Type>"));
    assert_eq!(
        xml_output::parse_document(&xml).unwrap().len(),
        common::SAMPLE_PAGE_RECORDS
    );
}
