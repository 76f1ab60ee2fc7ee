pub mod config;
pub mod parser;
pub mod robots;
pub mod scraper;
pub mod types;
pub mod writer;

pub use scraper::{CrawlOutcome, WebScraper};
