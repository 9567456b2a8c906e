use crate::analyzer::classifier::Classifier;
use crate::utils::truncate_chars;
use tracing::{info, warn};

/// Averages classifier polarity over scraped texts and weights the result.
pub struct SentimentScorer {
    classifier: Option<Box<dyn Classifier>>,
    weight: f64,
    max_chars: usize,
}

impl SentimentScorer {
    pub fn new(classifier: Option<Box<dyn Classifier>>, weight: f64, max_chars: usize) -> Self {
        Self {
            classifier,
            weight,
            max_chars,
        }
    }

    /// Mean signed confidence of the texts that classified, or `None` if none did.
    pub async fn raw_average(&self, texts: &[String]) -> Option<f64> {
        let classifier = self.classifier.as_ref()?;

        let mut scores = Vec::with_capacity(texts.len());
        for text in texts {
            let snippet = truncate_chars(text, self.max_chars);
            match classifier.classify(snippet).await {
                Ok(c) => scores.push(c.signed_score()),
                Err(e) => warn!("Error analyzing text: {}", e),
            }
        }

        if scores.is_empty() {
            return None;
        }
        info!("Classified {}/{} texts", scores.len(), texts.len());
        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    }

    /// Weighted score in [0, weight]. Negative aggregates floor at zero.
    pub async fn score(&self, texts: &[String]) -> f64 {
        if texts.is_empty() {
            return 0.0;
        }
        let average = self.raw_average(texts).await.unwrap_or(0.0);
        average.max(0.0) * self.weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Classification, ClassifierError};
    use std::collections::HashMap;

    /// Returns canned classifications keyed by text; unknown texts fail.
    struct StubClassifier {
        answers: HashMap<String, Classification>,
    }

    impl StubClassifier {
        fn new(answers: &[(&str, &str, f64)]) -> Self {
            Self {
                answers: answers
                    .iter()
                    .map(|(text, label, conf)| (text.to_string(), Classification::new(*label, *conf)))
                    .collect(),
            }
        }
    }

    #[async_trait::async_trait]
    impl Classifier for StubClassifier {
        async fn classify(&self, text: &str) -> Result<Classification, ClassifierError> {
            self.answers
                .get(text)
                .cloned()
                .ok_or_else(|| ClassifierError::ApiError("unknown text".into()))
        }
    }

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn scorer(stub: StubClassifier) -> SentimentScorer {
        SentimentScorer::new(Some(Box::new(stub)), 0.7, 512)
    }

    #[tokio::test]
    async fn empty_texts_score_zero() {
        let s = scorer(StubClassifier::new(&[]));
        assert_eq!(s.score(&[]).await, 0.0);
    }

    #[tokio::test]
    async fn positive_texts_are_averaged_and_weighted() {
        let s = scorer(StubClassifier::new(&[("a", "Positive", 0.8), ("b", "positive", 0.6)]));
        let score = s.score(&texts(&["a", "b"])).await;
        assert!((score - 0.49).abs() < 1e-9);
    }

    #[tokio::test]
    async fn negative_aggregate_is_floored_to_zero() {
        let s = scorer(StubClassifier::new(&[("bad", "Negative", 0.9)]));
        assert_eq!(s.raw_average(&texts(&["bad"])).await, Some(-0.9));
        assert_eq!(s.score(&texts(&["bad"])).await, 0.0);
    }

    #[tokio::test]
    async fn neutral_labels_count_against_the_average() {
        let s = scorer(StubClassifier::new(&[("up", "Positive", 0.9), ("meh", "Neutral", 0.5)]));
        let score = s.score(&texts(&["up", "meh"])).await;
        assert!((score - 0.2 * 0.7).abs() < 1e-9);
    }

    #[tokio::test]
    async fn failed_classifications_are_skipped_not_zeroed() {
        let s = scorer(StubClassifier::new(&[("good", "Positive", 0.8)]));
        let score = s.score(&texts(&["good", "unknown"])).await;
        assert!((score - 0.8 * 0.7).abs() < 1e-9);
    }

    #[tokio::test]
    async fn all_failures_score_zero() {
        let s = scorer(StubClassifier::new(&[]));
        assert_eq!(s.score(&texts(&["x", "y"])).await, 0.0);
    }

    #[tokio::test]
    async fn missing_classifier_scores_zero() {
        let s = SentimentScorer::new(None, 0.7, 512);
        assert_eq!(s.score(&texts(&["anything"])).await, 0.0);
    }

    #[tokio::test]
    async fn long_texts_are_truncated_before_classification() {
        let truncated = "x".repeat(512);
        let stub = StubClassifier::new(&[(truncated.as_str(), "Positive", 1.0)]);
        let s = scorer(stub);
        let score = s.score(&["x".repeat(700)]).await;
        assert!((score - 0.7).abs() < 1e-9);
    }
}
