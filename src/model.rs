// Core structs: ScrapedItem, FinancialMetrics, Scores, Decision
use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Reddit,
    News,
    Web,
}

impl SourceKind {
    pub const ALL: [SourceKind; 3] = [SourceKind::Reddit, SourceKind::News, SourceKind::Web];

    pub fn name(&self) -> &'static str {
        match self {
            SourceKind::Reddit => "reddit",
            SourceKind::News => "news",
            SourceKind::Web => "web",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One scraped post, article or search result, normalized across sources.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapedItem {
    pub source: SourceKind,
    pub title: String,
    pub body: Option<String>,
    pub score: Option<i64>,
    pub url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl ScrapedItem {
    pub fn new(source: SourceKind, title: impl Into<String>) -> Self {
        Self {
            source,
            title: title.into(),
            body: None,
            score: None,
            url: None,
            published_at: None,
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Everything scraped for one ticker, grouped by source.
#[derive(Debug, Clone, Default)]
pub struct ScrapedData {
    pub reddit: Vec<ScrapedItem>,
    pub news: Vec<ScrapedItem>,
    pub web: Vec<ScrapedItem>,
}

impl ScrapedData {
    pub fn items(&self, kind: SourceKind) -> &[ScrapedItem] {
        match kind {
            SourceKind::Reddit => &self.reddit,
            SourceKind::News => &self.news,
            SourceKind::Web => &self.web,
        }
    }

    pub fn items_mut(&mut self, kind: SourceKind) -> &mut Vec<ScrapedItem> {
        match kind {
            SourceKind::Reddit => &mut self.reddit,
            SourceKind::News => &mut self.news,
            SourceKind::Web => &mut self.web,
        }
    }

    pub fn count(&self, kind: SourceKind) -> usize {
        self.items(kind).len()
    }

    /// Up to `per_source` non-empty titles from each source, reddit first.
    pub fn sample_titles(&self, per_source: usize) -> Vec<&str> {
        SourceKind::ALL
            .iter()
            .flat_map(|kind| self.items(*kind).iter().take(per_source))
            .map(|item| item.title.trim())
            .filter(|title| !title.is_empty())
            .collect()
    }

    /// Flattens non-empty titles and bodies of all items into sentiment inputs.
    pub fn texts(&self) -> Vec<String> {
        let mut texts = Vec::new();
        for kind in SourceKind::ALL {
            for item in self.items(kind) {
                if !item.title.trim().is_empty() {
                    texts.push(item.title.clone());
                }
                if let Some(body) = item.body.as_deref().filter(|b| !b.trim().is_empty()) {
                    texts.push(body.to_string());
                }
            }
        }
        texts
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FinancialMetrics {
    pub pe: Option<f64>,
    pub eps: Option<f64>,
    pub market_cap: Option<f64>,
    /// Fractional change of the close over the last 5 trading days.
    pub momentum: Option<f64>,
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Scores {
    pub sentiment: f64,
    pub fundamentals: f64,
}

impl Scores {
    pub fn total(&self) -> f64 {
        self.sentiment + self.fundamentals
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Buy,
    Sell,
    Hold,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Buy => "BUY",
            Decision::Sell => "SELL",
            Decision::Hold => "HOLD",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label and confidence returned by a sentiment classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    pub confidence: f64,
}

impl Classification {
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }

    pub fn is_positive(&self) -> bool {
        self.label.eq_ignore_ascii_case("positive")
    }

    /// Positive confidence stays positive, every other label is negated.
    pub fn signed_score(&self) -> f64 {
        if self.is_positive() {
            self.confidence
        } else {
            -self.confidence
        }
    }
}

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    HttpError(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error(transparent)]
    Parse(#[from] ParserError),
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("HTML parse error: {0}")]
    HtmlParseError(String),
}

#[derive(Debug, Error)]
pub enum FinanceError {
    #[error("HTTP error: {0}")]
    HttpError(String),
    #[error("bad response: {0}")]
    BadResponse(String),
}

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("HTTP error: {0}")]
    HttpError(String),
    #[error("API error: {0}")]
    ApiError(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("network error: {0}")]
    NetworkError(String),
    #[error("API error: {0}")]
    ApiError(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
