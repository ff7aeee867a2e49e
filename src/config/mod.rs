#[cfg(feature = "cli")]
pub mod cli;

use crate::utils::error::{DemoError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_POOL: [&str; 7] = [
    "demo1.altmx.com",
    "demo2.altmx.com",
    "demo3.altmx.com",
    "live1.altmx.com",
    "live2.altmx.com",
    "session1.altmx.com",
    "session2.altmx.com",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub pool: PoolConfig,
    pub url: UrlConfig,
    pub voice: VoiceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    pub domains: Vec<String>,
    pub fallback_prefix: String,
    pub base_domain: String,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            domains: DEFAULT_POOL.iter().map(|d| d.to_string()).collect(),
            fallback_prefix: "demo".to_string(),
            base_domain: "altmx.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlConfig {
    pub scheme: String,
    pub name_prefix: String,
    pub region: String,
    pub domain_suffix: String,
    pub token_length: usize,
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            scheme: "https".to_string(),
            name_prefix: "altmx".to_string(),
            region: "ap-northeast-1".to_string(),
            domain_suffix: "elb.amazonaws.com".to_string(),
            token_length: 8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// Base URL of the voice service; `None` runs the offline mock.
    pub endpoint: Option<String>,
    pub timeout_seconds: u64,
    pub output_path: String,
    pub use_dialect: bool,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_seconds: 30,
            output_path: "./output".to_string(),
            use_dialect: true,
        }
    }
}

impl AppConfig {
    /// Loads the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parses the configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DemoError::ConfigParse {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Loads `path` when given, otherwise the built-in live-demo defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Replaces `${VAR}` references with environment values; unset ones stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DemoError::ConfigParse {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for PoolConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_unique_entries("pool.domains", &self.domains)?;
        validation::validate_non_empty_string("pool.fallback_prefix", &self.fallback_prefix)?;
        validation::validate_non_empty_string("pool.base_domain", &self.base_domain)?;
        Ok(())
    }
}

/// Longest token a SHA-256 hex digest can supply.
pub const MAX_TOKEN_LENGTH: usize = 64;

impl Validate for UrlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_scheme("url.scheme", &self.scheme)?;
        validation::validate_non_empty_string("url.name_prefix", &self.name_prefix)?;
        validation::validate_non_empty_string("url.region", &self.region)?;
        validation::validate_non_empty_string("url.domain_suffix", &self.domain_suffix)?;
        validation::validate_range("url.token_length", self.token_length, 1, MAX_TOKEN_LENGTH)?;
        Ok(())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.pool.validate()?;
        self.url.validate()?;

        if let Some(endpoint) = &self.voice.endpoint {
            validation::validate_url("voice.endpoint", endpoint)?;
        }
        validation::validate_range("voice.timeout_seconds", self.voice.timeout_seconds, 1, 600)?;
        validation::validate_path("voice.output_path", &self.voice.output_path)?;

        Ok(())
    }
}
