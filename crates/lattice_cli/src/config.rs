//! CLI configuration management
//!
//! Settings are layered, highest priority first:
//! 1. Command-line flags
//! 2. Environment variables (`LATTICE_*`)
//! 3. TOML configuration file (`lattice.toml` by default)
//! 4. Default values

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use lattice_pricing::{LatticeConfig, LatticeError, LatticeMethod};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid output format: {0}. Must be one of: table, json, csv")]
    InvalidFormat(String),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),

    #[error(transparent)]
    Lattice(#[from] LatticeError),
}

/// Log levels accepted by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Output formats for pricing results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(ConfigError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Effective CLI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Lattice step count (N)
    pub steps: usize,
    /// Continuously compounded risk-free rate
    pub rate: f64,
    /// Lattice estimator
    #[serde(deserialize_with = "deserialize_method")]
    pub method: LatticeMethod,
    /// Log level used when `RUST_LOG` is unset
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Output format
    #[serde(deserialize_with = "deserialize_format")]
    pub format: OutputFormat,
}

fn deserialize_method<'de, D>(deserializer: D) -> Result<LatticeMethod, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LatticeMethod::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_format<'de, D>(deserializer: D) -> Result<OutputFormat, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    OutputFormat::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            steps: 200,
            rate: 0.0,
            method: LatticeMethod::Plain,
            log_level: LogLevel::Info,
            format: OutputFormat::Table,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Apply `LATTICE_*` overrides read through `lookup`
    ///
    /// `lookup` is `std::env::var(..).ok()` in the binary; tests pass a map.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(steps) = lookup("LATTICE_STEPS") {
            self.steps = steps
                .trim()
                .parse()
                .map_err(|_| ConfigError::EnvError(format!("LATTICE_STEPS={}", steps)))?;
        }
        if let Some(rate) = lookup("LATTICE_RATE") {
            self.rate = rate
                .trim()
                .parse()
                .map_err(|_| ConfigError::EnvError(format!("LATTICE_RATE={}", rate)))?;
        }
        if let Some(method) = lookup("LATTICE_METHOD") {
            self.method = LatticeMethod::from_str(method.trim())
                .map_err(|e| ConfigError::EnvError(format!("LATTICE_METHOD: {}", e)))?;
        }
        if let Some(level) = lookup("LATTICE_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(level.trim())?;
        }
        if let Some(format) = lookup("LATTICE_FORMAT") {
            self.format = OutputFormat::from_str(format.trim())?;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliOverrides) {
        if let Some(steps) = cli.steps {
            self.steps = steps;
        }
        if let Some(rate) = cli.rate {
            self.rate = rate;
        }
        if let Some(method) = cli.method {
            self.method = method;
        }
        if let Some(level) = cli.log_level {
            self.log_level = level;
        }
        if let Some(format) = cli.format {
            self.format = format;
        }
    }

    /// Lattice configuration for one pricing request
    pub fn lattice_config(&self, greeks: bool) -> Result<LatticeConfig, ConfigError> {
        Ok(LatticeConfig::builder()
            .steps(self.steps)
            .rate(self.rate)
            .method(self.method)
            .greeks(greeks)
            .build()?)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.lattice_config(false).map(|_| ())
    }
}

/// Command-line overrides
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub steps: Option<usize>,
    pub rate: Option<f64>,
    pub method: Option<LatticeMethod>,
    pub log_level: Option<LogLevel>,
    pub format: Option<OutputFormat>,
}

/// Build configuration from all sources
///
/// A missing file is only an error when `explicit` is set (the user named it
/// with `--config`); the default `lattice.toml` is optional.
pub fn build_config<F>(
    path: &Path,
    explicit: bool,
    lookup: F,
    cli: &CliOverrides,
) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = if path.exists() || explicit {
        AppConfig::from_file(path)?
    } else {
        AppConfig::default()
    };

    config.apply_env(lookup)?;
    config.merge_with_cli(cli);
    config.validate()?;

    Ok(config)
}
