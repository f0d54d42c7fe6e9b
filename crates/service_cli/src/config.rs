//! Engine configuration management
//!
//! Handles loading configuration from environment variables, TOML files, and CLI arguments.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use valuation_pricing::mc::{
    SimulationConfig, SimulationError, DEFAULT_ITERATIONS, DEFAULT_PARALLEL_THRESHOLD,
    MAX_ITERATIONS,
};

/// Environment variable for the log level
pub const ENV_LOG_LEVEL: &str = "VALUER_LOG_LEVEL";
/// Environment variable for the Monte Carlo iteration count
pub const ENV_ITERATIONS: &str = "VALUER_ITERATIONS";
/// Environment variable for the Monte Carlo seed
pub const ENV_SEED: &str = "VALUER_SEED";
/// Environment variable for the parallelisation threshold
pub const ENV_PARALLEL_THRESHOLD: &str = "VALUER_PARALLEL_THRESHOLD";
/// Environment variable for the output format
pub const ENV_OUTPUT: &str = "VALUER_OUTPUT";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Iteration budget outside the accepted range
    #[error("Invalid iteration count: {0}. Must be between 1 and {MAX_ITERATIONS}")]
    InvalidIterations(usize),

    /// Parallel threshold of zero
    #[error("Invalid parallel threshold: {0}. Must be at least 1")]
    InvalidParallelThreshold(usize),

    /// Unrecognised log level
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Unrecognised output format
    #[error("Invalid output format: {0}. Must be one of: json, table")]
    InvalidOutputFormat(String),

    /// Unreadable or malformed TOML file
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// Malformed environment variable
    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Everything, including per-call traces
    Trace,
    /// Valuation and sweep summaries
    Debug,
    /// Simulation summaries
    #[default]
    Info,
    /// Degenerate inputs only
    Warn,
    /// Errors only
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

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Rendering of command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON of the result records
    Json,
    /// Human-readable tables
    #[default]
    Table,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            _ => Err(ConfigError::InvalidOutputFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Table => write!(f, "table"),
        }
    }
}

/// Engine configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Monte Carlo trials
    pub iterations: usize,
    /// Monte Carlo seed; OS entropy when absent
    pub seed: Option<u64>,
    /// Batch size from which work moves to the rayon pool
    pub parallel_threshold: usize,
    /// Output format
    #[serde(deserialize_with = "deserialize_output_format")]
    pub output: OutputFormat,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_output_format<'de, D>(deserializer: D) -> Result<OutputFormat, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    OutputFormat::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            iterations: DEFAULT_ITERATIONS,
            seed: None,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            output: OutputFormat::Table,
        }
    }
}

impl EngineConfig {
    /// Create a new EngineConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Overrides fields whose variables `lookup` resolves.
    fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(raw) = lookup(ENV_ITERATIONS) {
            self.iterations = parse_env(ENV_ITERATIONS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_SEED) {
            self.seed = Some(parse_env(ENV_SEED, &raw)?);
        }
        if let Some(raw) = lookup(ENV_PARALLEL_THRESHOLD) {
            self.parallel_threshold = parse_env(ENV_PARALLEL_THRESHOLD, &raw)?;
        }
        if let Some(format) = lookup(ENV_OUTPUT) {
            self.output = OutputFormat::from_str(&format)?;
        }
        Ok(())
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        let config: EngineConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations == 0 || self.iterations > MAX_ITERATIONS {
            return Err(ConfigError::InvalidIterations(self.iterations));
        }
        if self.parallel_threshold == 0 {
            return Err(ConfigError::InvalidParallelThreshold(self.parallel_threshold));
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(level) = &cli.log_level {
            self.log_level = LogLevel::from_str(level)?;
        }
        if let Some(format) = &cli.output {
            self.output = OutputFormat::from_str(format)?;
        }
        if let Some(iterations) = cli.iterations {
            self.iterations = iterations;
        }
        if let Some(seed) = cli.seed {
            self.seed = Some(seed);
        }
        Ok(())
    }

    /// Monte Carlo configuration for this engine configuration.
    pub fn simulation(&self) -> Result<SimulationConfig, SimulationError> {
        SimulationConfig::builder()
            .iterations(self.iterations)
            .parallel_threshold(self.parallel_threshold)
            .build()
    }
}

fn parse_env<T: FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::EnvError(format!("{}='{}' is not a valid value", key, raw)))
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<String>,
    /// Output format override
    pub output: Option<String>,
    /// Iteration override
    pub iterations: Option<usize>,
    /// Seed override
    pub seed: Option<u64>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<EngineConfig, ConfigError> {
    build_config_with(cli, |key| std::env::var(key).ok())
}

/// [`build_config`] with an explicit environment lookup.
pub fn build_config_with<F>(cli: &CliArgs, lookup: F) -> Result<EngineConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = if let Some(config_path) = &cli.config_file {
        EngineConfig::from_file(config_path)?
    } else {
        EngineConfig::default()
    };

    config.apply_env(lookup)?;
    config.merge_with_cli(cli)?;

    config.validate()?;

    Ok(config)
}
