pub mod duckduckgo_parser;

pub use duckduckgo_parser::{DuckDuckGoParser, Parser};
