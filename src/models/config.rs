//! Application configuration structures.

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Portal location and session
    #[serde(default)]
    pub portal: PortalConfig,

    /// HTTP and crawling behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Course selection rules
    #[serde(default)]
    pub filters: FilterConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.portal.base_url = config.portal.base_url.trim_end_matches('/').to_string();
        Ok(config)
    }

    /// Override settings from environment variables, when set.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get("SAKAI_BASE_URL") {
            self.portal.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(cookie) = get("SAKAI_SESSION_COOKIE") {
            self.portal.session_cookie = Some(cookie);
        }
        if let Some(tz) = get("TIMEZONE") {
            self.portal.timezone = tz;
        }
        if let Some(level) = get("LOG_LEVEL") {
            self.logging.level = level.to_lowercase();
        }
        if let Some(semester) = get("CURRENT_SEMESTER") {
            self.filters.current_semester = Some(semester);
        }
        if let Some(level) = get("COURSE_LEVEL_FILTER") {
            match level.trim().parse() {
                Ok(level) => self.filters.course_level = Some(level),
                Err(_) => log::warn!("Ignoring non-numeric COURSE_LEVEL_FILTER '{}'", level),
            }
        }
    }

    /// Parsed portal base URL.
    pub fn base_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.portal.base_url)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        self.base_url()
            .map_err(|e| AppError::validation(format!("portal.base_url is invalid: {e}")))?;
        if self.portal.timezone.parse::<chrono_tz::Tz>().is_err() {
            return Err(AppError::validation(format!(
                "portal.timezone '{}' is not a known IANA timezone",
                self.portal.timezone
            )));
        }
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.max_concurrent == 0 {
            return Err(AppError::validation("crawler.max_concurrent must be > 0"));
        }
        if !matches!(
            self.logging.level.as_str(),
            "trace" | "debug" | "info" | "warn" | "error"
        ) {
            return Err(AppError::validation(format!(
                "logging.level '{}' is not one of trace/debug/info/warn/error",
                self.logging.level
            )));
        }
        Ok(())
    }
}

/// Portal location and session settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Base URL of the Sakai instance, without trailing slash
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Raw `Cookie` header of an established session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_cookie: Option<String>,

    /// IANA timezone used for dates written without an offset
    #[serde(default = "defaults::timezone")]
    pub timezone: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            session_cookie: None,
            timezone: defaults::timezone(),
        }
    }
}

/// HTTP client and crawling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Maximum courses processed concurrently
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

/// Course selection rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Only keep courses whose title contains this (e.g. "S1-2526")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_semester: Option<String>,

    /// Only keep courses at or above this level (e.g. 300)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_level: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

/// Snapshot output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving scrape snapshots
    #[serde(default = "defaults::output_dir")]
    pub dir: String,

    /// Print the run summary to the console
    #[serde(default = "defaults::console_enabled")]
    pub console_enabled: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: defaults::output_dir(),
            console_enabled: defaults::console_enabled(),
        }
    }
}

mod defaults {
    pub fn base_url() -> String {
        "https://sakai.ug.edu.gh".into()
    }
    pub fn timezone() -> String {
        "Africa/Accra".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; sakai-crawler/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn max_concurrent() -> usize {
        4
    }
    pub fn log_level() -> String {
        "info".into()
    }
    pub fn output_dir() -> String {
        "storage".into()
    }
    pub fn console_enabled() -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.crawler.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_concurrency() {
        let mut config = Config::default();
        config.crawler.max_concurrent = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_unknown_timezone() {
        let mut config = Config::default();
        config.portal.timezone = "Mars/Olympus".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_base_url() {
        let mut config = Config::default();
        config.portal.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_trims_trailing_slash_and_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[portal]\nbase_url = \"https://lms.example.edu/\"\n\n[filters]\ncourse_level = 300"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.portal.base_url, "https://lms.example.edu");
        assert_eq!(config.portal.timezone, "Africa/Accra");
        assert_eq!(config.filters.course_level, Some(300));
        assert_eq!(config.crawler.max_concurrent, 4);
    }

    #[test]
    fn env_overrides_apply() {
        let vars: HashMap<&str, &str> = [
            ("SAKAI_BASE_URL", "https://other.example.edu/"),
            ("CURRENT_SEMESTER", "S2-2526"),
            ("COURSE_LEVEL_FILTER", "400"),
            ("LOG_LEVEL", "DEBUG"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.portal.base_url, "https://other.example.edu");
        assert_eq!(config.filters.current_semester.as_deref(), Some("S2-2526"));
        assert_eq!(config.filters.course_level, Some(400));
        assert_eq!(config.logging.level, "debug");
        assert!(config.portal.session_cookie.is_none());
    }
}
