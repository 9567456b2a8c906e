// Reddit search over the configured subreddits (application-only OAuth)
use crate::config::RedditCredentials;
use crate::model::{ScrapedItem, ScraperError, SourceKind};
use crate::scraper::SourceScraper;
use crate::utils::from_unix_seconds;

use reqwest::header::USER_AGENT;
use reqwest::{Client, Request};
use serde::Deserialize;

const TOKEN_HOST: &str = "https://www.reddit.com";
const SEARCH_HOST: &str = "https://oauth.reddit.com";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
struct Child {
    data: Post,
}

#[derive(Debug, Deserialize)]
struct Post {
    title: String,
    #[serde(default)]
    selftext: String,
    score: Option<i64>,
    url: Option<String>,
    created_utc: Option<f64>,
}

pub struct RedditScraper {
    client: Client,
    credentials: RedditCredentials,
    token_url: String,
    search_url: String,
    limit: u32,
}

impl RedditScraper {
    pub fn new(client: Client, credentials: RedditCredentials, subreddits: &str, limit: u32) -> Self {
        Self::with_hosts(client, credentials, TOKEN_HOST, SEARCH_HOST, subreddits, limit)
    }

    fn with_hosts(
        client: Client,
        credentials: RedditCredentials,
        token_host: &str,
        search_host: &str,
        subreddits: &str,
        limit: u32,
    ) -> Self {
        Self {
            client,
            credentials,
            token_url: format!("{}/api/v1/access_token", token_host),
            search_url: format!("{}/r/{}/search", search_host, subreddits),
            limit,
        }
    }

    fn token_request(&self) -> Result<Request, ScraperError> {
        self.client
            .post(&self.token_url)
            .header(USER_AGENT, &self.credentials.user_agent)
            .basic_auth(&self.credentials.client_id, Some(&self.credentials.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .build()
            .map_err(|e| ScraperError::HttpError(e.to_string()))
    }

    fn search_request(&self, token: &str, ticker: &str) -> Result<Request, ScraperError> {
        self.client
            .get(&self.search_url)
            .header(USER_AGENT, &self.credentials.user_agent)
            .bearer_auth(token)
            .query(&[
                ("q", format!("${}", ticker)),
                ("restrict_sr", "true".to_string()),
                ("limit", self.limit.to_string()),
            ])
            .build()
            .map_err(|e| ScraperError::HttpError(e.to_string()))
    }

    async fn execute(&self, request: Request, what: &str) -> Result<String, ScraperError> {
        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| ScraperError::HttpError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ScraperError::InvalidResponse(format!(
                "{} returned {}",
                what,
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| ScraperError::HttpError(e.to_string()))
    }

    pub fn parse_token(body: &str) -> Result<String, ScraperError> {
        let token: TokenResponse =
            serde_json::from_str(body).map_err(|e| ScraperError::InvalidResponse(e.to_string()))?;
        Ok(token.access_token)
    }

    /// Maps a search listing body into scraped items.
    pub fn parse_listing(body: &str) -> Result<Vec<ScrapedItem>, ScraperError> {
        let listing: Listing =
            serde_json::from_str(body).map_err(|e| ScraperError::InvalidResponse(e.to_string()))?;
        Ok(listing
            .data
            .children
            .into_iter()
            .map(|child| {
                let post = child.data;
                let mut item = ScrapedItem::new(SourceKind::Reddit, post.title);
                if !post.selftext.trim().is_empty() {
                    item = item.with_body(post.selftext);
                }
                item.score = post.score;
                item.url = post.url;
                item.published_at = post.created_utc.and_then(from_unix_seconds);
                item
            })
            .collect())
    }
}

#[async_trait::async_trait]
impl SourceScraper for RedditScraper {
    fn kind(&self) -> SourceKind {
        SourceKind::Reddit
    }

    async fn scrape(&self, ticker: &str) -> Result<Vec<ScrapedItem>, ScraperError> {
        let body = self.execute(self.token_request()?, "token request").await?;
        let token = Self::parse_token(&body)?;

        let body = self.execute(self.search_request(&token, ticker)?, "search").await?;
        Self::parse_listing(&body)
    }
}
