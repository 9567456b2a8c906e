use crate::analyzer::classifier::Classifier;
use crate::analyzer::decision::Thresholds;
use crate::analyzer::fundamentals::FundamentalsScorer;
use crate::analyzer::sentiment::SentimentScorer;
use crate::config::AppConfig;
use crate::model::{Decision, FinancialMetrics, ScrapedData, Scores};

/// Structure representing the numeric outcome for one ticker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisResult {
    pub scores: Scores,
    pub decision: Decision,
}

/// Combines the sentiment and fundamentals scorers with the decision thresholds.
pub struct AnalyzerImpl {
    sentiment: SentimentScorer,
    fundamentals: FundamentalsScorer,
    thresholds: Thresholds,
}

impl AnalyzerImpl {
    pub fn new(config: &AppConfig, classifier: Option<Box<dyn Classifier>>) -> Self {
        Self {
            sentiment: SentimentScorer::new(classifier, config.sentiment_weight, config.max_sentiment_chars),
            fundamentals: FundamentalsScorer::new(config.fundamentals_weight),
            thresholds: Thresholds::new(config.buy_threshold, config.sell_threshold),
        }
    }

    pub async fn sentiment_score(&self, texts: &[String]) -> f64 {
        self.sentiment.score(texts).await
    }

    pub fn fundamentals_score(&self, metrics: &FinancialMetrics) -> f64 {
        self.fundamentals.score(metrics)
    }

    pub fn make_decision(&self, scores: &Scores) -> Decision {
        self.thresholds.decide(scores.total())
    }

    /// Scores the scraped texts and metrics, then classifies the total.
    pub async fn analyze(&self, scraped: &ScrapedData, metrics: &FinancialMetrics) -> AnalysisResult {
        let scores = Scores {
            sentiment: self.sentiment_score(&scraped.texts()).await,
            fundamentals: self.fundamentals_score(metrics),
        };
        AnalysisResult {
            scores,
            decision: self.make_decision(&scores),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Classification, ClassifierError, ScrapedItem, SourceKind};

    struct AlwaysPositive(f64);

    #[async_trait::async_trait]
    impl Classifier for AlwaysPositive {
        async fn classify(&self, _text: &str) -> Result<Classification, ClassifierError> {
            Ok(Classification::new("Positive", self.0))
        }
    }

    fn strong_metrics() -> FinancialMetrics {
        FinancialMetrics {
            pe: Some(15.0),
            eps: Some(3.0),
            market_cap: Some(5e11),
            momentum: Some(0.02),
            price: Some(190.0),
        }
    }

    #[tokio::test]
    async fn strong_inputs_under_default_thresholds_hold() {
        let analyzer = AnalyzerImpl::new(&AppConfig::default(), Some(Box::new(AlwaysPositive(0.8))));
        let scraped = ScrapedData {
            news: vec![ScrapedItem::new(SourceKind::News, "Record quarter")],
            ..ScrapedData::default()
        };
        let result = analyzer.analyze(&scraped, &strong_metrics()).await;
        assert!((result.scores.sentiment - 0.56).abs() < 1e-9);
        assert!((result.scores.fundamentals - 0.3).abs() < 1e-9);
        assert_eq!(result.decision, Decision::Hold);
    }

    #[tokio::test]
    async fn same_inputs_reach_buy_with_a_reachable_threshold() {
        let config = AppConfig {
            buy_threshold: 0.8,
            ..AppConfig::default()
        };
        let analyzer = AnalyzerImpl::new(&config, Some(Box::new(AlwaysPositive(0.8))));
        let scraped = ScrapedData {
            web: vec![ScrapedItem::new(SourceKind::Web, "AAPL up")],
            ..ScrapedData::default()
        };
        let result = analyzer.analyze(&scraped, &strong_metrics()).await;
        assert_eq!(result.decision, Decision::Buy);
    }

    #[tokio::test]
    async fn nothing_scraped_and_no_metrics_sells() {
        let analyzer = AnalyzerImpl::new(&AppConfig::default(), None);
        let result = analyzer
            .analyze(&ScrapedData::default(), &FinancialMetrics::default())
            .await;
        assert_eq!(result.scores.total(), 0.0);
        assert_eq!(result.decision, Decision::Sell);
    }
}
