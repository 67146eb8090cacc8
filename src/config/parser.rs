use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use sumi_harvest::config::load_config;
///
/// let config = load_config(Path::new("harvest.toml")).unwrap();
/// println!("Root: {}", config.source.root_url);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from a TOML string
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so a generated script can be traced back to the exact
/// configuration that produced it.
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash of the file content
/// * `Err(ConfigError)` - Failed to read the file
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_SCRIPT_PATH, DEFAULT_TOP_K};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_full_config() {
        let config_content = r#"
[source]
root-url = "https://github.com/username/repository"
base-origin = "https://github.com"
suffix = ".py"

[fetcher]
crawler-name = "TestHarvester"
crawler-version = "2.0"
timeout-secs = 15
max-retries = 2
retry-delay-ms = 250
max-concurrent-fetches = 4

[analysis]
top-k = 5

[output]
script-path = "out/generated.py"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.source.root_url, "https://github.com/username/repository");
        assert_eq!(config.source.suffix, ".py");
        assert_eq!(config.fetcher.user_agent(), "TestHarvester/2.0");
        assert_eq!(config.fetcher.timeout_secs, Some(15));
        assert_eq!(config.fetcher.max_retries, 2);
        assert_eq!(config.fetcher.max_concurrent_fetches, 4);
        assert_eq!(config.analysis.top_k, 5);
        assert_eq!(config.output.script_path, "out/generated.py");
    }

    #[test]
    fn test_optional_sections_use_defaults() {
        let config_content = r#"
[source]
root-url = "https://github.com/username/repository"
base-origin = "https://github.com"
suffix = ".py"
"#;

        let config = parse_config(config_content).unwrap();

        assert_eq!(config.fetcher.timeout_secs, None);
        assert_eq!(config.fetcher.max_retries, 0);
        assert_eq!(config.fetcher.max_concurrent_fetches, 1);
        assert_eq!(config.analysis.top_k, DEFAULT_TOP_K);
        assert_eq!(config.output.script_path, DEFAULT_SCRIPT_PATH);
    }

    #[test]
    fn test_partial_section_fills_remaining_defaults() {
        let config_content = r#"
[source]
root-url = "https://github.com/username/repository"
base-origin = "https://github.com"
suffix = ".rs"

[fetcher]
max-retries = 3
"#;

        let config = parse_config(config_content).unwrap();

        assert_eq!(config.fetcher.max_retries, 3);
        assert_eq!(config.fetcher.crawler_name, "SumiHarvest");
        assert_eq!(config.fetcher.retry_delay_ms, 500);
    }

    #[test]
    fn test_missing_source_section() {
        let result = parse_config("[output]\nscript-path = \"x.py\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/harvest.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[source]
root-url = "https://github.com/username/repository"
base-origin = "https://github.com"
suffix = ""
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_compute_config_hash() {
        let file = create_temp_config("test content");

        let hash1 = compute_config_hash(file.path()).unwrap();
        let hash2 = compute_config_hash(file.path()).unwrap();

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_different_content_different_hash() {
        let file1 = create_temp_config("content 1");
        let file2 = create_temp_config("content 2");

        let hash1 = compute_config_hash(file1.path()).unwrap();
        let hash2 = compute_config_hash(file2.path()).unwrap();

        assert_ne!(hash1, hash2);
    }
}
