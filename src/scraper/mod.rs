// Data acquisition: one scraper per text source, aggregated by `ScraperImpl`.

pub mod fetcher;
pub mod news;
pub mod reddit;
pub mod traits;
pub mod web;

pub use fetcher::ScraperImpl;
pub use news::NewsScraper;
pub use reddit::RedditScraper;
pub use traits::SourceScraper;
pub use web::WebScraper;
