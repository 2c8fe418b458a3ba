//! Configuration for claimcheck.
//!
//! Configuration sources (highest priority first):
//! 1. CLI flags / environment variables (OPENAI_API_KEY, TAVILY_API_KEY,
//!    CLAIMCHECK_CONFIG)
//! 2. Config file (.claimcheck/config.yaml)
//! 3. Defaults
//!
//! Config file discovery:
//! - An explicit path (flag or CLAIMCHECK_CONFIG) wins and must exist
//! - Otherwise searches the current directory and parents for
//!   .claimcheck/config.yaml, then falls back to ~/.claimcheck/config.yaml
//!
//! Credentials are never read from the config file.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::limits::Limits;
use crate::core::retry::RetryPolicy;

/// Directory holding the config file
pub const CONFIG_DIR: &str = ".claimcheck";

/// Config file name inside [`CONFIG_DIR`]
pub const CONFIG_FILE: &str = "config.yaml";

/// Pipeline settings (matches the YAML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub reasoning: ReasoningSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub limits: Limits,
    #[serde(default)]
    pub retry: RetryPolicy,
}

/// Reasoning service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningSettings {
    /// Chat model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL of an OpenAI-compatible API
    #[serde(default = "default_reasoning_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub temperature: f32,
    /// Ask the service for a JSON object response
    #[serde(default = "default_json_mode")]
    pub json_mode: bool,
}

fn default_model() -> String {
    "gpt-4-turbo-preview".to_string()
}
fn default_reasoning_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}
fn default_json_mode() -> bool {
    true
}

impl Default for ReasoningSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_reasoning_endpoint(),
            temperature: 0.0,
            json_mode: default_json_mode(),
        }
    }
}

/// Search service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Base URL of the search API
    #[serde(default = "default_search_endpoint")]
    pub endpoint: String,
    /// "basic" or "advanced"
    #[serde(default = "default_search_depth")]
    pub search_depth: String,
}

fn default_search_endpoint() -> String {
    "https://api.tavily.com".to_string()
}
fn default_search_depth() -> String {
    "basic".to_string()
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            endpoint: default_search_endpoint(),
            search_depth: default_search_depth(),
        }
    }
}

/// API keys for the two external services. Immutable for an orchestrator's lifetime.
#[derive(Clone)]
pub struct Credentials {
    pub reasoning_api_key: String,
    pub search_api_key: String,
}

impl Credentials {
    pub fn new(reasoning_api_key: impl Into<String>, search_api_key: impl Into<String>) -> Self {
        Self {
            reasoning_api_key: reasoning_api_key.into(),
            search_api_key: search_api_key.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("reasoning_api_key", &redact(&self.reasoning_api_key))
            .field("search_api_key", &redact(&self.search_api_key))
            .finish()
    }
}

/// Show only whether a secret is set
pub fn redact(secret: &str) -> &'static str {
    if secret.trim().is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

/// Settings plus where they came from
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub settings: Settings,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Find config file by searching `start` and its parents
pub fn find_config_file_from(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_DIR).join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Project config from the working directory upwards, else the user-level one
fn find_config_file() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_file_from(&cwd))
        .or_else(|| {
            dirs::home_dir()
                .map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
                .filter(|path| path.exists())
        })
}

/// Load and parse config file
pub fn load_config_file(path: &Path) -> Result<Settings> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_settings(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse settings from YAML and validate limits
pub fn parse_settings(content: &str) -> Result<Settings> {
    // An empty file is valid and means "all defaults"
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }

    let settings: Settings = serde_yaml::from_str(content).context("Invalid YAML")?;
    settings.limits.validate().context("Invalid limits")?;
    Ok(settings)
}

/// Load configuration from all sources
pub fn load_config(explicit: Option<&Path>) -> Result<ResolvedConfig> {
    let config_file = match explicit {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Some(path.to_path_buf())
        }
        None => find_config_file(),
    };

    let settings = match config_file {
        Some(ref path) => load_config_file(path)?,
        None => Settings::default(),
    };

    Ok(ResolvedConfig {
        settings,
        config_file,
    })
}
