//! Application configuration from environment variables.
//!
//! Load configuration using `Config::from_env()` after calling `dotenvy::dotenv()`.

use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Upstream analysis endpoint that `/analyze` is forwarded to
    /// Example: http://127.0.0.1:8000/analyze
    pub analyzer_url: Option<String>,

    /// Upper bound on one upstream analysis call; `None` waits indefinitely
    pub analyzer_timeout: Option<Duration>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` before this to load from `.env` file.
    pub fn from_env() -> Self {
        Self {
            analyzer_url: std::env::var("ANALYZER_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            analyzer_timeout: std::env::var("ANALYZER_TIMEOUT_SECS")
                .ok()
                .and_then(|secs| parse_timeout(&secs)),
        }
    }

    /// Check if an upstream analyzer is configured
    pub fn has_analyzer(&self) -> bool {
        self.analyzer_url.is_some()
    }

    /// Get analyzer URL or panic with a helpful message
    pub fn analyzer_url_or_panic(&self) -> &str {
        self.analyzer_url
            .as_deref()
            .expect("ANALYZER_URL environment variable is not set")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Whole seconds; zero or garbage means no timeout
fn parse_timeout(value: &str) -> Option<Duration> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Config Struct Tests (no env var dependencies - thread safe)
    // ========================================================================

    #[test]
    fn test_config_with_all_fields() {
        let config = Config {
            analyzer_url: Some("http://127.0.0.1:8000/analyze".to_string()),
            analyzer_timeout: Some(Duration::from_secs(30)),
        };

        assert!(config.has_analyzer());
        assert_eq!(config.analyzer_url_or_panic(), "http://127.0.0.1:8000/analyze");
        assert_eq!(config.analyzer_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_config_with_no_fields() {
        let config = Config {
            analyzer_url: None,
            analyzer_timeout: None,
        };

        assert!(!config.has_analyzer());
        assert!(config.analyzer_timeout.is_none());
    }

    #[test]
    #[should_panic(expected = "ANALYZER_URL environment variable is not set")]
    fn test_analyzer_url_or_panic_failure() {
        let config = Config {
            analyzer_url: None,
            analyzer_timeout: None,
        };

        config.analyzer_url_or_panic();
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout("15"), Some(Duration::from_secs(15)));
        assert_eq!(parse_timeout(" 5 "), Some(Duration::from_secs(5)));
        assert_eq!(parse_timeout("0"), None);
        assert_eq!(parse_timeout("soon"), None);
        assert_eq!(parse_timeout(""), None);
    }

    #[test]
    fn test_config_from_env_returns_config() {
        // Values depend on the environment; only check it loads
        let config = Config::from_env();
        let _ = config.has_analyzer();
    }

    #[test]
    fn test_config_debug() {
        let config = Config {
            analyzer_url: Some("http://analyzer:8000/analyze".to_string()),
            analyzer_timeout: None,
        };

        let debug_str = format!("{:?}", config);

        assert!(debug_str.contains("Config"));
        assert!(debug_str.contains("analyzer_url"));
        assert!(debug_str.contains("http://analyzer:8000/analyze"));
    }
}
