use stock_sniper::analyzer::classifier::{Classifier, HuggingFaceClassifier};
use stock_sniper::analyzer::AnalyzerImpl;
use stock_sniper::config::{load_config_or_default, Credentials};
use stock_sniper::finance::YahooFinanceProvider;
use stock_sniper::narrative::{GeminiGenerator, NarrativeGenerator};
use stock_sniper::pipeline::TickerPipeline;
use stock_sniper::scraper::fetcher::build_http_client;
use stock_sniper::scraper::ScraperImpl;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Credentials may come from a local .env file
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Panic occurred: {:?}", panic_info);
    }));

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config = match load_config_or_default(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error ({}): {}", config_path, e);
            return;
        }
    };
    for warning in config.warnings() {
        warn!("Config: {}", warning);
    }
    let credentials = Credentials::from_env();

    let client = match build_http_client() {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create HTTP client: {}", e);
            return;
        }
    };

    let scraper = ScraperImpl::from_credentials(&client, &config, &credentials);
    let finance = match YahooFinanceProvider::new() {
        Ok(provider) => Box::new(provider),
        Err(e) => {
            error!("Failed to create Yahoo Finance client: {}", e);
            return;
        }
    };

    let classifier: Option<Box<dyn Classifier>> = if config.sentiment_model.trim().is_empty() {
        warn!("No sentiment model configured, sentiment scores will be zero");
        None
    } else {
        Some(Box::new(HuggingFaceClassifier::new(
            client.clone(),
            &config.sentiment_model,
            credentials.hf_api_token.clone(),
        )))
    };
    let analyzer = AnalyzerImpl::new(&config, classifier);

    let narrator = match &credentials.gemini_api_key {
        Some(key) => Some(NarrativeGenerator::new(Box::new(GeminiGenerator::new(
            client.clone(),
            key.clone(),
            config.gemini_model.clone(),
        )))),
        None => {
            info!("GEMINI_API_KEY not configured, skipping narrative analysis");
            None
        }
    };

    let pipeline = TickerPipeline::new(config, scraper, finance, analyzer, narrator);
    info!("Tickers to process: {}", pipeline.config().tickers.len());

    for report in pipeline.run().await {
        println!("{}", report);
    }

    info!("Finished.");
}
