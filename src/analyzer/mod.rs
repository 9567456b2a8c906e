// Analyzer module: scoring and decision logic, independent of any data source.

pub mod classifier;
pub mod decision;
pub mod fundamentals;
pub mod sentiment;
pub mod stock_analysis;

// Re-export the main Analyzer implementation for ease of use.
pub use stock_analysis::{AnalysisResult, AnalyzerImpl};
