//! Calculator configuration.
//!
//! Loaded from `emicalc.toml` (or `--config`), then overridden from the
//! environment. Every field has a default so an absent file is not an error.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use emi_calc_core::investment::inflation::DEFAULT_INFLATION_RATE;
use emi_calc_core::loan::comparison::DEFAULT_RATE_SHIFT;

use crate::OutputFormat;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "emicalc.toml";

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Annual inflation (percent) used when a command does not give one
    pub inflation_rate: Decimal,
    /// Percentage points for the lower/higher loan rate comparison
    pub rate_shift: Decimal,
    pub log_level: String,
    /// Output format when `--output` is not given
    pub output: OutputFormat,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            inflation_rate: DEFAULT_INFLATION_RATE,
            rate_shift: DEFAULT_RATE_SHIFT,
            log_level: "warn".to_string(),
            output: OutputFormat::Json,
        }
    }
}

impl CalculatorConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Explicit path must exist; otherwise `emicalc.toml` is used when present.
    pub fn resolve(explicit: Option<&str>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load(Path::new(path)),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::load(&fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Apply `EMICALC_*` environment overrides. Unparseable values are ignored.
    pub fn with_env_override(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(rate) = lookup("EMICALC_INFLATION_RATE").and_then(|v| v.trim().parse().ok()) {
            self.inflation_rate = rate;
        }

        if let Some(shift) = lookup("EMICALC_RATE_SHIFT").and_then(|v| v.trim().parse().ok()) {
            self.rate_shift = shift;
        }

        if let Some(level) = lookup("EMICALC_LOG_LEVEL") {
            self.log_level = level;
        }

        self
    }

    /// Validate the configuration, reporting every problem at once
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, VALID_LOG_LEVELS
            ));
        }

        if self.inflation_rate < Decimal::ZERO || self.inflation_rate > dec!(100) {
            errors.push(format!(
                "inflation_rate {} must be between 0 and 100",
                self.inflation_rate
            ));
        }

        if self.rate_shift <= Decimal::ZERO || self.rate_shift > dec!(10) {
            errors.push(format!(
                "rate_shift {} must be greater than 0 and at most 10",
                self.rate_shift
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Resolve, apply environment overrides and validate
    pub fn load_with_env_and_validate(explicit: Option<&str>) -> Result<Self, ConfigError> {
        let config = Self::resolve(explicit)?.with_env_override();
        config.validate()?;
        Ok(config)
    }
}

/// Configuration error type
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// IO error reading config file
    Io(String),
    /// Parse error in config file
    Parse(String),
    /// Validation error
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "cannot read config: {}", msg),
            Self::Parse(msg) => write!(f, "invalid config: {}", msg),
            Self::Validation(errors) => write!(f, "config validation failed: {}", errors.join("; ")),
        }
    }
}

impl std::error::Error for ConfigError {}
