use crate::model::{ScrapedItem, ScraperError, SourceKind};

#[async_trait::async_trait]
pub trait SourceScraper: Send + Sync {
    fn kind(&self) -> SourceKind;
    async fn scrape(&self, ticker: &str) -> Result<Vec<ScrapedItem>, ScraperError>;
}
