//! Runtime configuration
//!
//! Read once at startup from environment variables.

use std::path::PathBuf;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_CHART_DIR: &str = "./charts";

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Language model API key; chat is disabled without it
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    /// Directory rendered dashboard charts are written to
    pub chart_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            chart_dir: PathBuf::from(DEFAULT_CHART_DIR),
        }
    }
}

impl Config {
    /// Load from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary variable lookup
    ///
    /// `HEALTHSTAT_GEMINI_API_KEY` wins over the conventional `GEMINI_API_KEY`. Blank
    /// values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        Self {
            gemini_api_key: get("HEALTHSTAT_GEMINI_API_KEY").or_else(|| get("GEMINI_API_KEY")),
            gemini_model: get("HEALTHSTAT_GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_base_url: get("HEALTHSTAT_GEMINI_BASE_URL").unwrap_or(defaults.gemini_base_url),
            chart_dir: get("HEALTHSTAT_CHART_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.chart_dir),
        }
    }

    pub fn chat_enabled(&self) -> bool {
        self.gemini_api_key.is_some()
    }
}
