use crate::config::{AppConfig, Credentials};
use crate::model::{ScrapedData, SourceKind};
use crate::scraper::{NewsScraper, RedditScraper, SourceScraper, WebScraper};

use reqwest::Client;
use tracing::{info, warn};

pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) StockSniper/0.1";

pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder().user_agent(BROWSER_USER_AGENT).build()
}

/// Runs every configured source for a ticker, one after another.
pub struct ScraperImpl {
    sources: Vec<Box<dyn SourceScraper>>,
}

impl ScraperImpl {
    pub fn new(sources: Vec<Box<dyn SourceScraper>>) -> Self {
        Self { sources }
    }

    /// Reddit and NewsAPI are only enabled when their credentials are present.
    /// Web search needs none and is always on.
    pub fn from_credentials(client: &Client, config: &AppConfig, credentials: &Credentials) -> Self {
        let mut sources: Vec<Box<dyn SourceScraper>> = Vec::new();

        match &credentials.reddit {
            Some(reddit) => sources.push(Box::new(RedditScraper::new(
                client.clone(),
                reddit.clone(),
                &config.subreddits,
                config.reddit_limit,
            ))),
            None => info!("Reddit credentials not configured, skipping Reddit"),
        }

        match &credentials.newsapi_key {
            Some(key) => sources.push(Box::new(NewsScraper::new(
                client.clone(),
                key.clone(),
                config.news_page_size,
            ))),
            None => info!("NEWSAPI_KEY not configured, skipping news"),
        }

        sources.push(Box::new(WebScraper::new(client.clone())));

        Self { sources }
    }

    pub fn enabled_sources(&self) -> Vec<SourceKind> {
        self.sources.iter().map(|s| s.kind()).collect()
    }

    /// A failing source is logged and contributes nothing.
    pub async fn scrape(&self, ticker: &str) -> ScrapedData {
        let mut data = ScrapedData::default();
        for source in &self.sources {
            let kind = source.kind();
            match source.scrape(ticker).await {
                Ok(items) => {
                    info!("{} {} items for {}", items.len(), kind, ticker);
                    data.items_mut(kind).extend(items);
                }
                Err(e) => warn!("{} scrape error for {}: {}", kind, ticker, e),
            }
        }
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RedditCredentials;
    use crate::model::{ScrapedItem, ScraperError};

    struct FixedSource(SourceKind, Vec<&'static str>);

    #[async_trait::async_trait]
    impl SourceScraper for FixedSource {
        fn kind(&self) -> SourceKind {
            self.0
        }

        async fn scrape(&self, _ticker: &str) -> Result<Vec<ScrapedItem>, ScraperError> {
            Ok(self.1.iter().map(|t| ScrapedItem::new(self.0, *t)).collect())
        }
    }

    struct FailingSource;

    #[async_trait::async_trait]
    impl SourceScraper for FailingSource {
        fn kind(&self) -> SourceKind {
            SourceKind::Reddit
        }

        async fn scrape(&self, _ticker: &str) -> Result<Vec<ScrapedItem>, ScraperError> {
            Err(ScraperError::HttpError("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn failing_sources_degrade_to_empty() {
        let scraper = ScraperImpl::new(vec![
            Box::new(FailingSource),
            Box::new(FixedSource(SourceKind::News, vec!["headline"])),
            Box::new(FixedSource(SourceKind::Web, vec!["one", "two"])),
        ]);
        let data = scraper.scrape("AAPL").await;
        assert_eq!(data.count(SourceKind::Reddit), 0);
        assert_eq!(data.count(SourceKind::News), 1);
        assert_eq!(data.count(SourceKind::Web), 2);
    }

    #[test]
    fn only_web_is_enabled_without_credentials() {
        let client = build_http_client().unwrap();
        let scraper = ScraperImpl::from_credentials(&client, &AppConfig::default(), &Credentials::default());
        assert_eq!(scraper.enabled_sources(), vec![SourceKind::Web]);
    }

    #[test]
    fn credentials_enable_reddit_and_news() {
        let client = build_http_client().unwrap();
        let credentials = Credentials {
            reddit: Some(RedditCredentials {
                client_id: "id".into(),
                client_secret: "secret".into(),
                user_agent: "test/1.0".into(),
            }),
            newsapi_key: Some("key".into()),
            ..Credentials::default()
        };
        let scraper = ScraperImpl::from_credentials(&client, &AppConfig::default(), &credentials);
        assert_eq!(
            scraper.enabled_sources(),
            vec![SourceKind::Reddit, SourceKind::News, SourceKind::Web]
        );
    }
}
