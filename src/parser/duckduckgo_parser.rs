// DuckDuckGo-specific HTML parsing
use crate::model::{ParserError, ScrapedItem, SourceKind};
use ::scraper::{Html, Selector};

pub trait Parser {
    fn parse(&self, html: &str) -> Result<Vec<ScrapedItem>, ParserError>;
}

pub struct DuckDuckGoParser;

impl DuckDuckGoParser {
    pub fn new() -> Self {
        Self
    }

    /// Result links are protocol-relative (`//duckduckgo.com/l/?uddg=...`).
    fn absolute_link(href: &str) -> String {
        if href.starts_with("//") {
            format!("https:{}", href)
        } else {
            href.to_string()
        }
    }
}

impl Default for DuckDuckGoParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for DuckDuckGoParser {
    fn parse(&self, html: &str) -> Result<Vec<ScrapedItem>, ParserError> {
        let document = Html::parse_document(html);
        let title_selector =
            Selector::parse(".result__title a").map_err(|e| ParserError::HtmlParseError(e.to_string()))?;

        let mut results = Vec::new();
        for anchor in document.select(&title_selector) {
            let title = anchor
                .text()
                .collect::<String>()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ");
            if title.is_empty() {
                continue;
            }

            let mut item = ScrapedItem::new(SourceKind::Web, title);
            item.url = anchor.value().attr("href").map(Self::absolute_link);
            results.push(item);
        }

        Ok(results)
    }
}
