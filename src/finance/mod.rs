// Financial metrics retrieval behind a provider trait.

pub mod yahoo;

use crate::model::{FinanceError, FinancialMetrics};

pub use yahoo::YahooFinanceProvider;

#[async_trait::async_trait]
pub trait FinanceProvider: Send + Sync {
    async fn fetch(&self, ticker: &str) -> Result<FinancialMetrics, FinanceError>;
}

/// Fractional change from the first to the last close.
/// `None` with fewer than two closes or a zero starting close.
pub fn momentum(closes: &[f64]) -> Option<f64> {
    let (first, last) = (closes.first()?, closes.last()?);
    if closes.len() < 2 || *first == 0.0 {
        return None;
    }
    Some((last - first) / first)
}
