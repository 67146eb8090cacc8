use crate::config::types::{AnalysisConfig, Config, FetcherConfig, OutputConfig, SourceConfig};
use crate::ConfigError;
use url::Url;

/// Upper bound for `max-concurrent-fetches`
const MAX_CONCURRENT_FETCHES: u32 = 64;

/// Upper bound for `max-retries`
const MAX_RETRIES: u32 = 10;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_source_config(&config.source)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_analysis_config(&config.analysis)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the crawl source
fn validate_source_config(config: &SourceConfig) -> Result<(), ConfigError> {
    validate_http_url("root_url", &config.root_url)?;
    validate_http_url("base_origin", &config.base_origin)?;

    if config.suffix.is_empty() {
        return Err(ConfigError::Validation(
            "suffix cannot be empty".to_string(),
        ));
    }

    if config.suffix.chars().any(|c| c.is_whitespace()) {
        return Err(ConfigError::Validation(format!(
            "suffix must not contain whitespace, got '{}'",
            config.suffix
        )));
    }

    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.timeout_secs == Some(0) {
        return Err(ConfigError::Validation(
            "timeout_secs must be >= 1 when set".to_string(),
        ));
    }

    if config.max_concurrent_fetches < 1 || config.max_concurrent_fetches > MAX_CONCURRENT_FETCHES
    {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_fetches must be between 1 and {}, got {}",
            MAX_CONCURRENT_FETCHES, config.max_concurrent_fetches
        )));
    }

    if config.max_retries > MAX_RETRIES {
        return Err(ConfigError::Validation(format!(
            "max_retries must be <= {}, got {}",
            MAX_RETRIES, config.max_retries
        )));
    }

    Ok(())
}

/// Validates analysis configuration
fn validate_analysis_config(config: &AnalysisConfig) -> Result<(), ConfigError> {
    if config.top_k < 1 {
        return Err(ConfigError::Validation(format!(
            "top_k must be >= 1, got {}",
            config.top_k
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.script_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "script_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Checks that a config value is an absolute HTTP(S) URL
fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "{} '{}' must use HTTP or HTTPS scheme",
            field, value
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' has no host",
            field, value
        )));
    }

    Ok(())
}
