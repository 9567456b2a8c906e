use crate::model::{Decision, FinancialMetrics, ScrapedData, Scores, SourceKind};
use crate::utils::fmt_metric;
use std::fmt;

/// Everything the narrative prompt is built from.
pub struct NarrativeContext<'a> {
    pub ticker: &'a str,
    pub scraped: &'a ScrapedData,
    pub metrics: &'a FinancialMetrics,
    pub scores: Scores,
    pub decision: Decision,
    pub sentiment_weight: f64,
    pub fundamentals_weight: f64,
    pub sample_titles_per_source: usize,
}

fn source_label(kind: SourceKind) -> &'static str {
    match kind {
        SourceKind::Reddit => "Reddit discussions",
        SourceKind::News => "news articles",
        SourceKind::Web => "web results",
    }
}

fn financial_block(metrics: &FinancialMetrics) -> String {
    let momentum = metrics
        .momentum
        .map_or_else(|| "N/A".to_string(), |m| format!("{:.2}%", m * 100.0));
    let price = metrics
        .price
        .map_or_else(|| "N/A".to_string(), |p| format!("${:.2}", p));
    [
        format!("PE Ratio: {}", fmt_metric(metrics.pe)),
        format!("EPS: {}", fmt_metric(metrics.eps)),
        format!("Market Cap: {}", fmt_metric(metrics.market_cap)),
        format!("5-Day Momentum: {}", momentum),
        format!("Current Price: {}", price),
    ]
    .join("\n")
}

const INSTRUCTIONS: &str = "\nYour analysis should:\n\
     1. Summarize key positive/negative factors\n\
     2. Assess financial health\n\
     3. Evaluate if the initial decision seems sound\n\
     4. Provide final recommendation (BUY/SELL/HOLD) with confidence level\n\
     5. Highlight important risks\n\
     6. Keep it concise (3-5 paragraphs max)\n";

struct Prompt<'c, 'a>(&'c NarrativeContext<'a>);

impl fmt::Display for Prompt<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ctx = self.0;
        writeln!(f, "Provide a professional stock analysis for {} with these inputs:", ctx.ticker)?;

        writeln!(f, "\nMARKET SENTIMENT:")?;
        for kind in SourceKind::ALL {
            writeln!(f, "- {} {}", ctx.scraped.count(kind), source_label(kind))?;
        }
        writeln!(f, "Sample headlines:")?;
        for title in ctx.scraped.sample_titles(ctx.sample_titles_per_source) {
            writeln!(f, "- {}", title)?;
        }

        writeln!(f, "\nFINANCIAL METRICS:\n{}", financial_block(ctx.metrics))?;

        writeln!(f, "\nANALYSIS SCORES:")?;
        writeln!(f, "- Sentiment: {:.2}/{:.1}", ctx.scores.sentiment, ctx.sentiment_weight)?;
        writeln!(f, "- Fundamentals: {:.2}/{:.1}", ctx.scores.fundamentals, ctx.fundamentals_weight)?;
        writeln!(
            f,
            "- Total: {:.2}/{:.1}",
            ctx.scores.total(),
            ctx.sentiment_weight + ctx.fundamentals_weight
        )?;
        writeln!(f, "- Initial Decision: {}", ctx.decision)?;

        f.write_str(INSTRUCTIONS)
    }
}

pub fn build_prompt(ctx: &NarrativeContext<'_>) -> String {
    Prompt(ctx).to_string()
}
