use crate::model::FinancialMetrics;

const MAX_PE: f64 = 25.0;
const MIN_MARKET_CAP: f64 = 1e10;
const CONDITIONS: f64 = 4.0;

/// Point-tally heuristic over PE, EPS, market cap and momentum.
pub struct FundamentalsScorer {
    weight: f64,
}

impl FundamentalsScorer {
    pub fn new(weight: f64) -> Self {
        Self { weight }
    }

    /// Number of conditions met, 0..=4. A missing metric fails its condition.
    pub fn points(metrics: &FinancialMetrics) -> u32 {
        [
            metrics.pe.is_some_and(|pe| pe < MAX_PE),
            metrics.eps.is_some_and(|eps| eps > 0.0),
            metrics.market_cap.is_some_and(|cap| cap > MIN_MARKET_CAP),
            metrics.momentum.is_some_and(|m| m > 0.0),
        ]
        .into_iter()
        .filter(|met| *met)
        .count() as u32
    }

    /// Weighted score in [0, weight].
    pub fn score(&self, metrics: &FinancialMetrics) -> f64 {
        Self::points(metrics) as f64 / CONDITIONS * self.weight
    }
}
