// Optional narrative layer: never feeds back into the numeric decision.

pub mod gemini;
pub mod prompt;

use crate::model::LlmError;
use tracing::{info, warn};

pub use gemini::GeminiGenerator;
pub use prompt::{build_prompt, NarrativeContext};

#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

pub struct NarrativeGenerator {
    generator: Box<dyn TextGenerator>,
}

impl NarrativeGenerator {
    pub fn new(generator: Box<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Returns the write-up, or an inline failure message in its place.
    pub async fn generate(&self, context: &NarrativeContext<'_>) -> String {
        let prompt = build_prompt(context);
        info!("Requesting narrative for {} ({} chars prompt)", context.ticker, prompt.len());
        match self.generator.complete(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Narrative generation failed for {}: {}", context.ticker, e);
                format!("Narrative analysis failed: {}", e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Decision, FinancialMetrics, ScrapedData, Scores};

    struct Canned {
        reply: Result<String, String>,
    }

    #[async_trait::async_trait]
    impl TextGenerator for Canned {
        async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
            self.reply.clone().map_err(LlmError::ApiError)
        }
    }

    fn context<'a>(scraped: &'a ScrapedData, metrics: &'a FinancialMetrics) -> NarrativeContext<'a> {
        NarrativeContext {
            ticker: "MSFT",
            scraped,
            metrics,
            scores: Scores { sentiment: 0.4, fundamentals: 0.225 },
            decision: Decision::Hold,
            sentiment_weight: 0.7,
            fundamentals_weight: 0.3,
            sample_titles_per_source: 2,
        }
    }

    #[tokio::test]
    async fn returns_generated_text() {
        let generator = NarrativeGenerator::new(Box::new(Canned {
            reply: Ok("Solid fundamentals.".into()),
        }));
        let (scraped, metrics) = (ScrapedData::default(), FinancialMetrics::default());
        assert_eq!(generator.generate(&context(&scraped, &metrics)).await, "Solid fundamentals.");
    }

    #[tokio::test]
    async fn failures_become_inline_messages() {
        let generator = NarrativeGenerator::new(Box::new(Canned {
            reply: Err("quota exceeded".into()),
        }));
        let (scraped, metrics) = (ScrapedData::default(), FinancialMetrics::default());
        let text = generator.generate(&context(&scraped, &metrics)).await;
        assert_eq!(text, "Narrative analysis failed: API error: quota exceeded");
    }
}
