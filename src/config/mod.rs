//! Configuration management for trendwatch
//!
//! This module handles loading and validating configuration from environment variables,
//! files, and command-line arguments.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::utils::retry::{Backoff, RetryConfig};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Trends service client configuration
    pub trends: TrendsConfig,

    /// Retry and pacing configuration
    pub fetch: FetchConfig,

    /// Dashboard defaults and chart output
    pub dashboard: DashboardConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Trends service client configuration
///
/// Locale, timezone and region are fixed for the lifetime of a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendsConfig {
    /// Service root URL
    pub base_url: String,

    /// Host language / locale (e.g. `en-IN`)
    pub hl: String,

    /// Timezone offset in minutes
    pub tz: i32,

    /// Region code
    pub geo: String,

    /// Category id (0 = all categories)
    pub category: u32,

    /// Sub-property filter (empty = web search)
    pub gprop: String,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// User agent string
    pub user_agent: String,
}

/// Retry and pacing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Maximum number of request attempts
    pub max_retries: u32,

    /// Cooldown after a rate-limit response, in seconds
    pub cooldown_secs: u64,

    /// Pause before every request attempt, in seconds
    pub pre_request_delay_secs: u64,

    /// Cooldown growth strategy
    pub backoff: Backoff,
}

/// Dashboard defaults and chart output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Initial value of the keyword field
    pub default_keywords: String,

    /// Initial start date
    pub default_start: NaiveDate,

    /// Initial end date
    pub default_end: NaiveDate,

    /// Chart title
    pub chart_title: String,

    /// SVG output path
    pub chart_path: PathBuf,

    /// Chart width in pixels
    pub chart_width: u32,

    /// Chart height in pixels
    pub chart_height: u32,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for TrendsConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("https://trends.google.com"),
            hl: String::from("en-IN"),
            tz: 330,
            geo: String::from("IN"),
            category: 0,
            gprop: String::new(),
            request_timeout_secs: 30,
            user_agent: String::from(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
            ),
        }
    }
}

impl TrendsConfig {
    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_retries: 5,
            cooldown_secs: 60,
            pre_request_delay_secs: 3,
            backoff: Backoff::Fixed,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_keywords: String::from("2BHK,3BHK,1BHK,farmhouse"),
            default_start: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap_or_default(),
            default_end: NaiveDate::from_ymd_opt(2025, 4, 30).unwrap_or_default(),
            chart_title: String::from("Google Search Trends"),
            chart_path: PathBuf::from("trends.svg"),
            chart_width: 1200,
            chart_height: 600,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse::<T>().ok())
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env();
        Ok(config)
    }

    /// Overlay `TRENDWATCH_*` environment variables onto this configuration
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("TRENDWATCH_BASE_URL") {
            self.trends.base_url = url;
        }
        if let Ok(hl) = std::env::var("TRENDWATCH_HL") {
            self.trends.hl = hl;
        }
        if let Some(tz) = env_parse("TRENDWATCH_TZ") {
            self.trends.tz = tz;
        }
        if let Ok(geo) = std::env::var("TRENDWATCH_GEO") {
            self.trends.geo = geo;
        }
        if let Some(timeout) = env_parse("TRENDWATCH_REQUEST_TIMEOUT") {
            self.trends.request_timeout_secs = timeout;
        }
        if let Ok(user_agent) = std::env::var("TRENDWATCH_USER_AGENT") {
            self.trends.user_agent = user_agent;
        }

        if let Some(max_retries) = env_parse("TRENDWATCH_MAX_RETRIES") {
            self.fetch.max_retries = max_retries;
        }
        if let Some(cooldown) = env_parse("TRENDWATCH_COOLDOWN_SECS") {
            self.fetch.cooldown_secs = cooldown;
        }
        if let Some(delay) = env_parse("TRENDWATCH_PRE_REQUEST_DELAY_SECS") {
            self.fetch.pre_request_delay_secs = delay;
        }

        if let Ok(path) = std::env::var("TRENDWATCH_CHART_PATH") {
            self.dashboard.chart_path = PathBuf::from(path);
        }

        if let Ok(level) = std::env::var("TRENDWATCH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("TRENDWATCH_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.fetch.max_retries == 0 {
            anyhow::bail!("max_retries must be greater than 0");
        }

        if let Backoff::Exponential { multiplier, .. } = self.fetch.backoff {
            if multiplier.is_nan() || multiplier < 1.0 {
                anyhow::bail!("backoff multiplier must be at least 1.0");
            }
        }

        if self.trends.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }

        url::Url::parse(&self.trends.base_url)
            .with_context(|| format!("Invalid base_url: {}", self.trends.base_url))?;

        if self.trends.geo.trim().is_empty() {
            anyhow::bail!("geo must not be empty");
        }

        if self.dashboard.default_start > self.dashboard.default_end {
            anyhow::bail!("default_start must not be after default_end");
        }

        if self.dashboard.chart_width == 0 || self.dashboard.chart_height == 0 {
            anyhow::bail!("chart dimensions must be greater than 0");
        }

        Ok(())
    }

    /// Retry policy for the trend fetcher
    #[must_use]
    pub fn retry(&self) -> RetryConfig {
        RetryConfig {
            max_retries: self.fetch.max_retries,
            cooldown: Duration::from_secs(self.fetch.cooldown_secs),
            pre_request_delay: Duration::from_secs(self.fetch.pre_request_delay_secs),
            backoff: self.fetch.backoff,
        }
    }
}
