use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bfpo_scraper::address::AddressNormalizer;
use bfpo_scraper::collector::CountryStats;
use bfpo_scraper::config::Config;
use bfpo_scraper::country::CountryCodeResolver;
use bfpo_scraper::fetcher::BfpoPageFetcher;
use bfpo_scraper::importers::SourceDownloader;
use bfpo_scraper::services::{BfpoImportService, FcdoSource};
use bfpo_scraper::xml_output;

#[derive(Parser, Debug)]
#[command(name = "bfpo-scraper")]
#[command(about = "Scrape BFPO addresses from GOV.UK and the FCDO list into an XML config", long_about = None)]
struct Cli {
    /// Pre-downloaded FCDO BFPO indicator list (.ods); downloaded when omitted
    fcdo_file: Option<PathBuf>,

    /// Output XML file
    #[arg(short, long, env = "BFPO_OUTPUT_FILE")]
    output: Option<PathBuf>,

    /// Leave out the FCDO spreadsheet entirely
    #[arg(long)]
    skip_fcdo: bool,
}

#[tokio::main(flavor = "current_thread")]
#[instrument]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if it exists (ignore errors if not found)
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,bfpo_scraper=debug")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();
    info!("Starting BFPO scraper with config: {:?}", config);

    let resolver = Arc::new(CountryCodeResolver::new(config.country_overrides()?));
    let normalizer = AddressNormalizer::new(resolver.clone());

    let downloader =
        SourceDownloader::new(config.http_timeout())?.with_max_retries(config.http_retries);
    let fetcher = BfpoPageFetcher::new(downloader.clone(), config.gov_uk_bfpo_url.clone());
    let service = BfpoImportService::new(
        fetcher,
        downloader,
        normalizer,
        config.location_inferencer()?,
    );

    let fcdo_source = match (cli.skip_fcdo, cli.fcdo_file) {
        (true, _) => FcdoSource::Skip,
        (false, Some(path)) => FcdoSource::LocalFile(path),
        (false, None) => FcdoSource::Download(config.fcdo_ods_url.clone()),
    };

    let summary = service.run(fcdo_source).await?;

    if let Some(reason) = &summary.fcdo_unavailable {
        warn!("FCDO data not included ({})", reason);
        warn!("To include it, download the file manually and pass its path: {}", config.fcdo_ods_url);
    }

    let output = cli.output.unwrap_or(config.output_file);
    let today = chrono::Local::now().date_naive();
    xml_output::write_file(&output, &summary.records, &resolver, today)?;

    info!(
        "✓ Generated XML with {} BFPO addresses ({} GOV.UK, {} FCDO, {} rows skipped) in {:.1}s",
        summary.records.len(),
        summary.gov_uk_records,
        summary.fcdo_records,
        summary.skipped_rows,
        summary.duration_secs
    );
    log_country_stats(&summary.stats);
    info!("✓ Complete! Generated: {}", output.display());

    Ok(())
}

fn log_country_stats(stats: &CountryStats) {
    info!("Country code statistics:");
    info!("  Total addresses: {}", stats.total);
    info!("  Addresses with country name: {}", stats.with_country);
    info!("  Addresses with country code: {}", stats.with_code);

    if stats.unmapped() > 0 {
        warn!("  ⚠ Unmapped countries: {}", stats.unmapped());
        let names: Vec<&str> = stats.unresolved.iter().map(String::as_str).collect();
        warn!("  Unmapped country names: {}", names.join(", "));
    }
}
