use crate::finance::{momentum, FinanceProvider};
use crate::model::{FinanceError, FinancialMetrics};
use crate::scraper::fetcher::BROWSER_USER_AGENT;

use reqwest::{Client, Request};
use serde::Deserialize;
use tracing::warn;

const COOKIE_URL: &str = "https://fc.yahoo.com";
const CRUMB_URL: &str = "https://query1.finance.yahoo.com/v1/test/getcrumb";
const QUOTE_URL: &str = "https://query1.finance.yahoo.com/v7/finance/quote";
const CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

// Minimal response structs (only what we need)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteEnvelope {
    quote_response: QuoteResponse,
}

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    #[serde(default)]
    result: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Quote {
    #[serde(rename = "trailingPE")]
    trailing_pe: Option<f64>,
    eps_trailing_twelve_months: Option<f64>,
    market_cap: Option<f64>,
    regular_market_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// Yahoo Finance quote + 5-day chart.
///
/// The quote endpoint rejects requests without a session cookie and a matching
/// crumb, so each quote lookup first visits `COOKIE_URL` (which sets the cookie)
/// and then asks `CRUMB_URL` for the crumb.
pub struct YahooFinanceProvider {
    client: Client,
}

impl YahooFinanceProvider {
    pub fn new() -> Result<Self, FinanceError> {
        let client = Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .cookie_store(true)
            .build()
            .map_err(|e| FinanceError::HttpError(e.to_string()))?;
        Ok(Self { client })
    }

    fn quote_request(&self, ticker: &str, crumb: &str) -> Result<Request, FinanceError> {
        self.client
            .get(QUOTE_URL)
            .query(&[("symbols", ticker), ("crumb", crumb)])
            .build()
            .map_err(|e| FinanceError::HttpError(e.to_string()))
    }

    fn chart_request(&self, ticker: &str) -> Result<Request, FinanceError> {
        self.client
            .get(format!("{}/{}", CHART_URL, ticker))
            .query(&[("range", "5d"), ("interval", "1d")])
            .build()
            .map_err(|e| FinanceError::HttpError(e.to_string()))
    }

    async fn execute(&self, request: Request) -> Result<String, FinanceError> {
        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| FinanceError::HttpError(e.to_string()))?;
        if !response.status().is_success() {
            return Err(FinanceError::BadResponse(format!("HTTP {}", response.status())));
        }
        response
            .text()
            .await
            .map_err(|e| FinanceError::HttpError(e.to_string()))
    }

    /// A crumb is a short opaque token; anything else is an error page.
    pub fn parse_crumb(body: &str) -> Result<String, FinanceError> {
        let crumb = body.trim();
        if crumb.is_empty() || crumb.len() > 64 || crumb.contains(char::is_whitespace) || crumb.starts_with('{') {
            return Err(FinanceError::BadResponse(format!("unexpected crumb response: {}", crumb)));
        }
        Ok(crumb.to_string())
    }

    async fn crumb(&self) -> Result<String, FinanceError> {
        // fc.yahoo.com answers 404 but still sets the session cookie.
        self.client
            .get(COOKIE_URL)
            .send()
            .await
            .map_err(|e| FinanceError::HttpError(e.to_string()))?;
        let body = self.execute(
            self.client
                .get(CRUMB_URL)
                .build()
                .map_err(|e| FinanceError::HttpError(e.to_string()))?,
        )
        .await?;
        Self::parse_crumb(&body)
    }

    /// PE, EPS, market cap and price; momentum is left unset.
    pub fn parse_quote(body: &str) -> Result<FinancialMetrics, FinanceError> {
        let envelope: QuoteEnvelope =
            serde_json::from_str(body).map_err(|e| FinanceError::BadResponse(e.to_string()))?;
        let quote = envelope
            .quote_response
            .result
            .into_iter()
            .next()
            .ok_or_else(|| FinanceError::BadResponse("missing quote result".into()))?;
        Ok(FinancialMetrics {
            pe: quote.trailing_pe,
            eps: quote.eps_trailing_twelve_months,
            market_cap: quote.market_cap,
            momentum: None,
            price: quote.regular_market_price,
        })
    }

    /// Daily closes of the chart, skipping missing entries.
    pub fn parse_closes(body: &str) -> Result<Vec<f64>, FinanceError> {
        let envelope: ChartEnvelope =
            serde_json::from_str(body).map_err(|e| FinanceError::BadResponse(e.to_string()))?;
        if let Some(err) = envelope.chart.error.filter(|e| !e.is_null()) {
            return Err(FinanceError::BadResponse(err.to_string()));
        }
        let result = envelope
            .chart
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| FinanceError::BadResponse("missing chart result".into()))?;
        let quote = result
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| FinanceError::BadResponse("missing quote".into()))?;
        Ok(quote.close.into_iter().flatten().collect())
    }

    /// Combines the quote and chart outcomes. Either side alone is enough;
    /// only when both fail is the quote error returned.
    pub fn merge(
        ticker: &str,
        quote: Result<FinancialMetrics, FinanceError>,
        momentum: Result<Option<f64>, FinanceError>,
    ) -> Result<FinancialMetrics, FinanceError> {
        match (quote, momentum) {
            (Ok(metrics), Ok(momentum)) => Ok(FinancialMetrics { momentum, ..metrics }),
            (Ok(metrics), Err(e)) => {
                warn!("Momentum unavailable for {}: {}", ticker, e);
                Ok(metrics)
            }
            (Err(e), Ok(momentum)) => {
                warn!("Quote unavailable for {}: {}", ticker, e);
                Ok(FinancialMetrics {
                    momentum,
                    ..FinancialMetrics::default()
                })
            }
            (Err(e), Err(_)) => Err(e),
        }
    }

    async fn fetch_quote(&self, ticker: &str) -> Result<FinancialMetrics, FinanceError> {
        let crumb = self.crumb().await?;
        let body = self.execute(self.quote_request(ticker, &crumb)?).await?;
        Self::parse_quote(&body)
    }

    async fn fetch_momentum(&self, ticker: &str) -> Result<Option<f64>, FinanceError> {
        let body = self.execute(self.chart_request(ticker)?).await?;
        Ok(momentum(&Self::parse_closes(&body)?))
    }
}

#[async_trait::async_trait]
impl FinanceProvider for YahooFinanceProvider {
    async fn fetch(&self, ticker: &str) -> Result<FinancialMetrics, FinanceError> {
        let quote = self.fetch_quote(ticker).await;
        let momentum = self.fetch_momentum(ticker).await;
        Self::merge(ticker, quote, momentum)
    }
}
