//! Harvest coordinator - main pipeline orchestration logic
//!
//! This module runs the stages strictly one after another:
//! - Discovering matching files on the root page
//! - Retrieving each file's body
//! - Ranking the most frequent tokens
//! - Rendering and writing the script

use crate::analysis::FrequencyAnalyzer;
use crate::config::Config;
use crate::crawler::collector::ContentCollector;
use crate::crawler::discover::Crawler;
use crate::crawler::fetcher::build_http_client;
use crate::output::{render_script, write_script, HarvestReport};
use crate::url::RepositoryLocation;
use crate::{HarvestError, UrlError};
use chrono::Utc;
use std::path::Path;
use url::Url;

/// A rendered script together with the report of the run that produced it
#[derive(Debug, Clone)]
pub struct Harvest {
    pub script: String,
    pub report: HarvestReport,
}

/// Main harvest coordinator structure
pub struct Coordinator {
    config: Config,
    root: RepositoryLocation,
    crawler: Crawler,
    collector: ContentCollector,
    analyzer: FrequencyAnalyzer,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(HarvestError)` - A configured URL is invalid or the HTTP client
    ///   could not be built
    pub fn new(config: Config) -> Result<Self, HarvestError> {
        let root = RepositoryLocation::parse(&config.source.root_url)?;
        let base_origin =
            Url::parse(&config.source.base_origin).map_err(|e| UrlError::Parse(e.to_string()))?;

        let client = build_http_client(&config.fetcher)?;
        let crawler = Crawler::new(client.clone(), base_origin);
        let collector = ContentCollector::from_config(client, &config.fetcher);
        let analyzer = FrequencyAnalyzer::from_config(&config.analysis);

        Ok(Self {
            config,
            root,
            crawler,
            collector,
            analyzer,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs discovery, retrieval and analysis, and renders the script
    ///
    /// Nothing is written to disk. Fails only if the root page cannot be
    /// fetched or parsed.
    pub async fn harvest(&self) -> Result<Harvest, HarvestError> {
        let started_at = Utc::now();
        let suffix = self.config.source.suffix.as_str();

        let references = self.crawler.discover(&self.root, suffix).await?;
        let files_discovered = references.len();

        let contents = self.collector.collect(references).await;
        let files_retrieved = contents.len();

        let bodies: Vec<String> = contents.into_iter().map(|content| content.body).collect();
        let frequency = self.analyzer.frequencies(&bodies);
        let features = self.analyzer.rank(&frequency);

        tracing::info!(
            "Counted {} tokens ({} distinct), keeping top {}",
            frequency.total(),
            frequency.distinct(),
            features.len()
        );

        let script = render_script(&features);

        let report = HarvestReport {
            root_url: self.root.to_string(),
            suffix: suffix.to_string(),
            started_at,
            finished_at: Utc::now(),
            files_discovered,
            files_retrieved,
            total_tokens: frequency.total(),
            distinct_tokens: frequency.distinct(),
            features,
            output_path: None,
        };

        Ok(Harvest { script, report })
    }

    /// Runs the full pipeline and writes the script to the configured path
    pub async fn run(&self) -> Result<HarvestReport, HarvestError> {
        let Harvest { script, mut report } = self.harvest().await?;

        let output_path = self.config.output.script_path.as_str();
        write_script(&script, Path::new(output_path))?;
        tracing::info!("Script written to {}", output_path);

        report.output_path = Some(output_path.to_string());
        report.finished_at = Utc::now();
        Ok(report)
    }
}

/// Runs the main harvest operation
///
/// # Example
///
/// ```no_run
/// use sumi_harvest::config::load_config;
/// use sumi_harvest::crawler::run_harvest;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("harvest.toml"))?;
/// let report = run_harvest(config).await?;
/// println!("{} features", report.features.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_harvest(config: Config) -> Result<HarvestReport, HarvestError> {
    let coordinator = Coordinator::new(config)?;
    coordinator.run().await
}
