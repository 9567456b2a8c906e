// Per-ticker orchestration: scrape, fetch metrics, score, decide, narrate.
use crate::analyzer::AnalyzerImpl;
use crate::config::AppConfig;
use crate::finance::FinanceProvider;
use crate::model::{Decision, FinancialMetrics, ScrapedData, Scores, SourceKind};
use crate::narrative::{NarrativeContext, NarrativeGenerator};
use crate::scraper::ScraperImpl;
use crate::utils::fmt_metric;

use chrono::{DateTime, Utc};
use std::fmt;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct TickerReport {
    pub ticker: String,
    pub reddit_count: usize,
    pub news_count: usize,
    pub web_count: usize,
    pub metrics: FinancialMetrics,
    pub scores: Scores,
    pub decision: Decision,
    pub narrative: Option<String>,
    pub generated_at: DateTime<Utc>,
}

impl fmt::Display for TickerReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(50);
        writeln!(f, "{}", rule)?;
        writeln!(f, "{} @ {}", self.ticker, self.generated_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
        writeln!(f, "{}", rule)?;
        writeln!(
            f,
            "Sources: {} reddit, {} news, {} web",
            self.reddit_count, self.news_count, self.web_count
        )?;
        writeln!(
            f,
            "PE: {} | EPS: {} | Market Cap: {} | Momentum: {} | Price: {}",
            fmt_metric(self.metrics.pe),
            fmt_metric(self.metrics.eps),
            fmt_metric(self.metrics.market_cap),
            fmt_metric(self.metrics.momentum),
            fmt_metric(self.metrics.price),
        )?;
        writeln!(f, "Sentiment Score: {:.2}", self.scores.sentiment)?;
        writeln!(f, "Fundamental Score: {:.2}", self.scores.fundamentals)?;
        writeln!(f, "Total Score: {:.2}", self.scores.total())?;
        writeln!(f, "Initial Decision: {}", self.decision)?;
        if let Some(narrative) = &self.narrative {
            let rule = "-".repeat(50);
            writeln!(f, "\nNARRATIVE ANALYSIS:\n{}\n{}\n{}", rule, narrative.trim(), rule)?;
        }
        Ok(())
    }
}

/// Wires the collaborators for a run. Built once, reused for every ticker.
pub struct TickerPipeline {
    config: AppConfig,
    scraper: ScraperImpl,
    finance: Box<dyn FinanceProvider>,
    analyzer: AnalyzerImpl,
    narrator: Option<NarrativeGenerator>,
}

impl TickerPipeline {
    pub fn new(
        config: AppConfig,
        scraper: ScraperImpl,
        finance: Box<dyn FinanceProvider>,
        analyzer: AnalyzerImpl,
        narrator: Option<NarrativeGenerator>,
    ) -> Self {
        Self {
            config,
            scraper,
            finance,
            analyzer,
            narrator,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    async fn fetch_metrics(&self, ticker: &str) -> FinancialMetrics {
        match self.finance.fetch(ticker).await {
            Ok(metrics) => metrics,
            Err(e) => {
                warn!("Finance data error for {}: {}", ticker, e);
                FinancialMetrics::default()
            }
        }
    }

    /// Processes a single ticker. External failures degrade, never abort.
    pub async fn process_ticker(&self, ticker: &str) -> TickerReport {
        info!("Analyzing {}...", ticker);

        let scraped: ScrapedData = self.scraper.scrape(ticker).await;
        let metrics = self.fetch_metrics(ticker).await;

        let result = self.analyzer.analyze(&scraped, &metrics).await;
        info!(
            "{}: sentiment {:.2}, fundamentals {:.2}, total {:.2} -> {}",
            ticker,
            result.scores.sentiment,
            result.scores.fundamentals,
            result.scores.total(),
            result.decision
        );

        let narrative = match &self.narrator {
            Some(narrator) => {
                let context = NarrativeContext {
                    ticker,
                    scraped: &scraped,
                    metrics: &metrics,
                    scores: result.scores,
                    decision: result.decision,
                    sentiment_weight: self.config.sentiment_weight,
                    fundamentals_weight: self.config.fundamentals_weight,
                    sample_titles_per_source: self.config.sample_titles_per_source,
                };
                Some(narrator.generate(&context).await)
            }
            None => None,
        };

        TickerReport {
            ticker: ticker.to_string(),
            reddit_count: scraped.count(SourceKind::Reddit),
            news_count: scraped.count(SourceKind::News),
            web_count: scraped.count(SourceKind::Web),
            metrics,
            scores: result.scores,
            decision: result.decision,
            narrative,
            generated_at: Utc::now(),
        }
    }

    /// Runs every configured ticker in order.
    pub async fn run(&self) -> Vec<TickerReport> {
        let mut reports = Vec::with_capacity(self.config.tickers.len());
        for ticker in &self.config.tickers {
            reports.push(self.process_ticker(ticker).await);
        }
        reports
    }
}
