// DuckDuckGo HTML search, no credentials needed
use crate::model::{ScrapedItem, ScraperError, SourceKind};
use crate::parser::{DuckDuckGoParser, Parser};
use crate::scraper::SourceScraper;

use reqwest::Client;

const SEARCH_URL: &str = "https://html.duckduckgo.com/html/";

pub struct WebScraper {
    client: Client,
    parser: DuckDuckGoParser,
}

impl WebScraper {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            parser: DuckDuckGoParser::new(),
        }
    }

    fn build_query(ticker: &str) -> String {
        format!("{} stock news", ticker)
    }
}

#[async_trait::async_trait]
impl SourceScraper for WebScraper {
    fn kind(&self) -> SourceKind {
        SourceKind::Web
    }

    async fn scrape(&self, ticker: &str) -> Result<Vec<ScrapedItem>, ScraperError> {
        let response = self
            .client
            .get(SEARCH_URL)
            .query(&[("q", Self::build_query(ticker))])
            .send()
            .await
            .map_err(|e| ScraperError::HttpError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ScraperError::InvalidResponse(format!(
                "search returned {}",
                response.status()
            )));
        }

        let html = response
            .text()
            .await
            .map_err(|e| ScraperError::HttpError(e.to_string()))?;
        Ok(self.parser.parse(&html)?)
    }
}
