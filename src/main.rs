use std::path::PathBuf;
use std::process;

use articulations::config::CrawlConfig;
use articulations::types::ArticulationSet;
use articulations::{CrawlOutcome, WebScraper};
use clap::{Parser, ValueEnum};
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "articulations")]
#[command(about = "Scrapes SJSU course-to-course articulation tables", long_about = None)]
struct Cli {
    #[arg(
        short = 'l',
        long = "log-level",
        value_enum,
        default_value = "info",
        help = "Set the logging level"
    )]
    log_level: LogLevel,

    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Output file path"
    )]
    output: Option<PathBuf>,

    #[arg(long, value_name = "URL", help = "Articulation index page to crawl")]
    index_url: Option<String>,

    #[arg(
        long,
        value_name = "URL",
        help = "Base URL relative links resolve against"
    )]
    base_url: Option<String>,

    #[arg(
        long = "course",
        value_name = "CODE",
        help = "Course code to track (repeatable; replaces the default list)"
    )]
    courses: Vec<String>,
}

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.clone().into())
        .init();

    let mut config = CrawlConfig::default();
    if let Some(output) = cli.output {
        config.output_path = output;
    }
    if let Some(index_url) = cli.index_url {
        config.index_url = index_url;
    }
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if !cli.courses.is_empty() {
        config.courses = cli.courses;
    }

    let scraper = WebScraper::new(config).unwrap_or_else(|e| {
        log::error!("Error creating scraper: {}", e);
        process::exit(1);
    });

    let mut set = ArticulationSet::new(&scraper.config().courses);
    match scraper.run(&mut set).await {
        Ok(CrawlOutcome::Denied) => {
            log::error!(
                "Not permitted to crawl {} (robots.txt denies it or could not be fetched); nothing written",
                scraper.index_url()
            );
        }
        Ok(CrawlOutcome::Complete {
            pages,
            articulations,
        }) => {
            log::info!(
                "Crawl complete: {} articulations from {} pages written to {}",
                articulations,
                pages,
                scraper.config().output_path.display()
            );
        }
        Err(e) => {
            log::error!("Crawl failed: {}", e);
            process::exit(1);
        }
    }
}
