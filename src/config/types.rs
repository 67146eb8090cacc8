use serde::Deserialize;

/// Default number of ranked features
pub const DEFAULT_TOP_K: usize = 10;

/// Default path for the generated script
pub const DEFAULT_SCRIPT_PATH: &str = "generated_script.py";

/// Main configuration structure for Sumi-Harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub source: SourceConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Where to crawl and what to pick up
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Page listing the repository's files
    #[serde(rename = "root-url")]
    pub root_url: String,

    /// Origin that relative link targets are resolved against
    #[serde(rename = "base-origin")]
    pub base_origin: String,

    /// Literal suffix a link path must end with (e.g. ".py")
    pub suffix: String,
}

/// HTTP fetcher configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Name sent in the User-Agent header
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version sent in the User-Agent header
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// Whole-request timeout in seconds; transport default when unset
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: Option<u64>,

    /// Extra attempts for transient per-file failures
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Delay between retry attempts (milliseconds)
    #[serde(rename = "retry-delay-ms")]
    pub retry_delay_ms: u64,

    /// Maximum number of file fetches in flight
    #[serde(rename = "max-concurrent-fetches")]
    pub max_concurrent_fetches: u32,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            crawler_name: "SumiHarvest".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            timeout_secs: None,
            max_retries: 0,
            retry_delay_ms: 500,
            max_concurrent_fetches: 1,
        }
    }
}

impl FetcherConfig {
    /// Formats the User-Agent header value: `Name/Version`
    pub fn user_agent(&self) -> String {
        format!("{}/{}", self.crawler_name, self.crawler_version)
    }
}

/// Frequency analysis configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of ranked features to keep
    #[serde(rename = "top-k")]
    pub top_k: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path the generated script is written to
    #[serde(rename = "script-path")]
    pub script_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            script_path: DEFAULT_SCRIPT_PATH.to_string(),
        }
    }
}
