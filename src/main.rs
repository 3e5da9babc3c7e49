use clap::Parser;
use skill_diff::output::{self, LocalStorage};
use skill_diff::utils::error::ScoutError;
use skill_diff::utils::{logger, validation::Validate};
use skill_diff::{create_default_scraper, CliConfig, ScoutConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting skill-diff job link discovery");
    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.validate().and_then(|_| cli.resolve()) {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    if let Err(e) = run(&cli, config).await {
        exit_with(&e);
    }

    Ok(())
}

async fn run(cli: &CliConfig, config: ScoutConfig) -> skill_diff::Result<()> {
    let scraper = Arc::new(create_default_scraper(&config)?);
    tracing::info!(
        "🔧 Fetchers: {:?}, parsers: {:?}, concurrency: {}",
        scraper.fetcher_names(),
        scraper.parser_names(),
        config.concurrent_requests()
    );

    let reports = Arc::clone(&scraper)
        .discover_many(&cli.urls, config.concurrent_requests())
        .await;
    scraper.cleanup().await;

    let total: usize = reports.iter().map(|r| r.links.len()).sum();
    tracing::info!("✅ Found {} job links across {} pages", total, reports.len());

    let format = config.output_format();
    match config.output_path() {
        Some(path) => {
            let storage = LocalStorage::new(path.to_string());
            let written = output::write_reports(&storage, path, &reports, format).await?;
            tracing::info!("📁 Output saved to: {}", written);
            println!("📁 Output saved to: {}", written);
        }
        None => {
            print!("{}", output::render(&reports, format)?);
        }
    }

    Ok(())
}

fn exit_with(e: &ScoutError) -> ! {
    tracing::error!(
        "❌ skill-diff failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.exit_code())
}
