//! Centralized configuration management for perfect-research

use std::path::PathBuf;
use std::time::Duration;
use anyhow::{Context, Result};

use crate::table::PageSize;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Perfect Research REST API
    pub api_url: String,
    /// File holding the persisted login session
    pub session_file: PathBuf,
    /// Log file for the interactive client
    pub log_file: PathBuf,
    /// HTTP client configuration
    pub http: HttpConfig,
    /// Table defaults
    pub table: TableConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
}

/// Defaults applied to every data table
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Rows per page when a table is created
    pub page_size: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: "perfect-research/0.1.0".to_string(),
        }
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self { page_size: 5 }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        let api_url = std::env::var("PERFECT_RESEARCH_API_URL")
            .unwrap_or_else(|_| "http://localhost:8000/api".to_string());

        let session_file = std::env::var("PERFECT_RESEARCH_SESSION_FILE")
            .unwrap_or_else(|_| "./.perfect_research_session.json".to_string())
            .into();

        let log_file = std::env::var("PERFECT_RESEARCH_LOG_FILE")
            .unwrap_or_else(|_| "./perfect_research.log".to_string())
            .into();

        let http = HttpConfig {
            timeout_seconds: parse_env_var("PERFECT_RESEARCH_HTTP_TIMEOUT_SECONDS")?.unwrap_or(30),
            user_agent: std::env::var("PERFECT_RESEARCH_USER_AGENT")
                .unwrap_or_else(|_| "perfect-research/0.1.0".to_string()),
        };

        let table = TableConfig {
            page_size: parse_env_var("PERFECT_RESEARCH_PAGE_SIZE")?.unwrap_or(5),
        };

        Ok(Config {
            api_url,
            session_file,
            log_file,
            http,
            table,
        })
    }

    /// Replace the API URL (command line override)
    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.to_string();
        self
    }

    /// Get HTTP timeout as Duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds)
    }

    /// Default page size for new tables
    pub fn page_size(&self) -> PageSize {
        PageSize::try_from(self.table.page_size).unwrap_or_default()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.api_url)
            .with_context(|| format!("Invalid API URL: {}", self.api_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(anyhow::anyhow!(
                "API URL must use http or https: {}",
                self.api_url
            ));
        }

        PageSize::try_from(self.table.page_size)
            .context("Invalid PERFECT_RESEARCH_PAGE_SIZE")?;

        if self.http.timeout_seconds == 0 {
            return Err(anyhow::anyhow!("HTTP timeout must be at least one second"));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000/api".to_string(),
            session_file: "./.perfect_research_session.json".into(),
            log_file: "./perfect_research.log".into(),
            http: HttpConfig::default(),
            table: TableConfig::default(),
        }
    }
}

/// Helper function to parse environment variable as a specific type
fn parse_env_var<T>(var_name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    match std::env::var(var_name) {
        Ok(val) => val.parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        Err(_) => Ok(None),
    }
}
