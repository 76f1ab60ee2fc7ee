use crate::config::CrawlConfig;
use crate::parser::{self, ParseError};
use crate::robots;
use crate::types::ArticulationSet;
use crate::writer;

use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

pub(crate) const USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, thiserror::Error)]
pub enum ScraperError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// How a crawl ended: denied at the politeness gate (nothing fetched
/// beyond robots.txt, output path untouched) or run to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlOutcome {
    Denied,
    Complete { pages: usize, articulations: usize },
}

#[derive(Debug, Clone)]
pub struct WebScraper {
    client: Client,
    config: CrawlConfig,
    index_url: Url,
    base_url: Url,
}

impl WebScraper {
    pub fn new(config: CrawlConfig) -> Result<Self, ScraperError> {
        let index_url = Url::parse(&config.index_url)?;
        let base_url = Url::parse(&config.base_url)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            config,
            index_url,
            base_url,
        })
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    pub fn index_url(&self) -> &Url {
        &self.index_url
    }

    /// Politeness gate for the whole run.
    ///
    /// A missing robots.txt (404) means the host publishes no policy and
    /// crawling is permitted. Any other failure fetching the policy is
    /// answered with "not permitted" instead of aborting the run; this is
    /// the only tolerated network failure in the program.
    pub async fn ok_to_crawl(&self) -> bool {
        let robots_url = robots::robots_url(&self.index_url);

        let response = match self.client.get(robots_url.as_str()).send().await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Could not fetch {}: {}", robots_url, e);
                return false;
            }
        };

        if response.status() == StatusCode::NOT_FOUND {
            log::debug!("No robots.txt at {}, crawling permitted", robots_url);
            return true;
        }

        let txt = match response.error_for_status() {
            Ok(response) => match response.text().await {
                Ok(txt) => txt,
                Err(e) => {
                    log::warn!("Could not read {}: {}", robots_url, e);
                    return false;
                }
            },
            Err(e) => {
                log::warn!("Could not fetch {}: {}", robots_url, e);
                return false;
            }
        };

        let rules = robots::parse_robots(&txt, USER_AGENT);
        rules.is_allowed(self.index_url.path())
    }

    /// Runs the whole crawl: politeness gate, link extraction, sequential
    /// page scraping into `set`, and the final write to the configured
    /// output path. Denial returns before any page is fetched and leaves
    /// the output path untouched.
    pub async fn run(&self, set: &mut ArticulationSet) -> Result<CrawlOutcome, ScraperError> {
        if !self.ok_to_crawl().await {
            return Ok(CrawlOutcome::Denied);
        }

        log::info!(
            "Polite to crawl. Extracting links from {}...",
            self.index_url
        );
        let links = self.fetch_index_links().await?;
        log::info!("Found {} articulation pages", links.len());

        for (i, url) in links.iter().enumerate() {
            log::info!("Scraping page {}/{}: {}", i + 1, links.len(), url);
            let appended = self.scrape_page(url, set).await?;
            log::debug!("{} articulations appended from {}", appended, url);
        }

        writer::write_articulations(set, &self.config.output_path)?;

        Ok(CrawlOutcome::Complete {
            pages: links.len(),
            articulations: set.total(),
        })
    }

    pub async fn fetch_index_links(&self) -> Result<Vec<Url>, ScraperError> {
        let html = self.fetch(&self.index_url).await?;
        let links = parser::parse_index_links(&html, &self.base_url, &self.config.index)?;
        Ok(links)
    }

    /// Fetches one articulation page and folds its matching rows into the
    /// accumulator. Returns how many articulations were appended.
    pub async fn scrape_page(
        &self,
        url: &Url,
        set: &mut ArticulationSet,
    ) -> Result<usize, ScraperError> {
        let html = self.fetch(url).await?;
        let appended = parser::scrape_articulations(&html, &self.config.page, set)?;
        Ok(appended)
    }

    async fn fetch(&self, url: &Url) -> Result<String, reqwest::Error> {
        self.client
            .get(url.as_str())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}
