// NewsAPI article search
use crate::model::{ScrapedItem, ScraperError, SourceKind};
use crate::scraper::SourceScraper;
use crate::utils::parse_datetime;

use reqwest::Client;
use serde::Deserialize;

const EVERYTHING_URL: &str = "https://newsapi.org/v2/everything";

#[derive(Debug, Deserialize)]
struct NewsResponse {
    status: String,
    message: Option<String>,
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Article {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    published_at: Option<String>,
}

pub struct NewsScraper {
    client: Client,
    api_key: String,
    page_size: u32,
}

impl NewsScraper {
    pub fn new(client: Client, api_key: String, page_size: u32) -> Self {
        Self {
            client,
            api_key,
            page_size,
        }
    }

    pub fn parse_articles(body: &str) -> Result<Vec<ScrapedItem>, ScraperError> {
        let response: NewsResponse =
            serde_json::from_str(body).map_err(|e| ScraperError::InvalidResponse(e.to_string()))?;
        if response.status != "ok" {
            return Err(ScraperError::InvalidResponse(
                response.message.unwrap_or(response.status),
            ));
        }

        Ok(response
            .articles
            .into_iter()
            .filter_map(|article| {
                let title = article.title?;
                let mut item = ScrapedItem::new(SourceKind::News, title);
                if let Some(description) = article.description.filter(|d| !d.trim().is_empty()) {
                    item = item.with_body(description);
                }
                item.url = article.url;
                item.published_at = article.published_at.as_deref().and_then(parse_datetime);
                Some(item)
            })
            .collect())
    }
}

#[async_trait::async_trait]
impl SourceScraper for NewsScraper {
    fn kind(&self) -> SourceKind {
        SourceKind::News
    }

    async fn scrape(&self, ticker: &str) -> Result<Vec<ScrapedItem>, ScraperError> {
        let response = self
            .client
            .get(EVERYTHING_URL)
            .header("X-Api-Key", &self.api_key)
            .query(&[
                ("q", ticker.to_string()),
                ("language", "en".to_string()),
                ("sortBy", "publishedAt".to_string()),
                ("pageSize", self.page_size.to_string()),
            ])
            .send()
            .await
            .map_err(|e| ScraperError::HttpError(e.to_string()))?;

        // Error statuses still carry a JSON body with a message.
        let body = response
            .text()
            .await
            .map_err(|e| ScraperError::HttpError(e.to_string()))?;
        Self::parse_articles(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_articles_and_skips_untitled() {
        let body = r#"{
            "status": "ok",
            "totalResults": 3,
            "articles": [
                {"title": "Apple beats estimates", "description": "Revenue up 8%", "url": "https://news.example/1", "publishedAt": "2024-05-02T20:30:00Z"},
                {"title": null, "description": "orphan", "url": null, "publishedAt": null},
                {"title": "Apple event", "description": "", "url": "https://news.example/2", "publishedAt": "bad"}
            ]
        }"#;
        let items = NewsScraper::parse_articles(body).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].body.as_deref(), Some("Revenue up 8%"));
        assert!(items[0].published_at.is_some());
        assert_eq!(items[1].body, None);
        assert!(items[1].published_at.is_none());
    }

    #[test]
    fn error_status_surfaces_message() {
        let body = r#"{"status": "error", "code": "apiKeyInvalid", "message": "Your API key is invalid."}"#;
        let err = NewsScraper::parse_articles(body).unwrap_err();
        assert!(err.to_string().contains("API key is invalid"));
    }
}
