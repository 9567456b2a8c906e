pub mod analyzer;
pub mod config;
pub mod finance;
pub mod model;
pub mod narrative;
pub mod parser;
pub mod pipeline;
pub mod scraper;
pub mod utils;
