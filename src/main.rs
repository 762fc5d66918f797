//! Market data cache - command line entry point
//!
//! Fetches sectors or news articles through the cached service and prints them as
//! JSON on stdout. Logs go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use market_data_cache::{
    ApiClient, AsyncApiClient, AsyncApiClientImpl, CacheTtls, Config, MarketDataService,
    RequestCache,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "market-data-cache", version, about = "Cached market-data lookups", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Print the list of market sectors
    Sectors,
    /// Print one or more news articles by ID
    News {
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;

    // RUST_LOG wins over LOG_LEVEL when both are set
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Using market-data API at {}", config.api_base_url);

    let http = AsyncApiClientImpl::new(ApiClient::new(&config));
    let client = Arc::new(http.clone()) as Arc<dyn AsyncApiClient>;
    let ttls = CacheTtls::from(&config);
    let service = MarketDataService::new(client, RequestCache::new(), ttls);

    info!(
        "Cache TTLs: sectors {}s, news {}s",
        ttls.sectors.as_secs(),
        ttls.news.as_secs()
    );

    let output = match &cli.command {
        Command::Sectors => {
            let sectors = service.sectors().await?;
            serde_json::to_string_pretty(sectors.as_ref())?
        }
        Command::News { ids } => {
            let articles = service.news_articles(ids).await?;
            let articles: Vec<_> = articles.iter().map(|a| a.as_ref()).collect();
            serde_json::to_string_pretty(&articles)?
        }
    };

    println!("{}", output);

    let cache = service.cache().metrics().summary();
    let http = http.inner().metrics().summary();
    info!(
        hits = cache.hits,
        misses = cache.misses,
        fills = cache.fills,
        fill_errors = cache.fill_errors,
        http_requests = http.http_requests_total,
        http_avg_ms = http.http_duration_avg_ms,
        "Done"
    );

    Ok(())
}
