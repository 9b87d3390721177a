use anyhow::{Context, Result, anyhow};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::evaluation::{ReportOptions, Rubric};
use crate::file_utils::FileManager;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Weights, scoring curves and phrase lists
    #[serde(default)]
    pub rubric: Rubric,

    /// Text report options
    #[serde(default)]
    pub report: ReportOptions,

    /// Batch comparison options
    #[serde(default)]
    pub batch: BatchConfig,

    /// Slide text preprocessing
    #[serde(default)]
    pub slides: SlidesConfig,
}

/// Slide text preprocessing configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SlidesConfig {
    /// Strip page markers and collapse whitespace of PDF-extracted slide text
    #[serde(default = "default_clean_text")]
    pub clean_text: bool,
}

impl Default for SlidesConfig {
    fn default() -> Self {
        Self {
            clean_text: default_clean_text(),
        }
    }
}

/// Batch comparison configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BatchConfig {
    /// Maximum number of candidates evaluated at once
    #[serde(default = "default_max_concurrent_evaluations")]
    pub max_concurrent_evaluations: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_concurrent_evaluations: default_max_concurrent_evaluations(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching log filter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_max_concurrent_evaluations() -> usize {
    4
}

fn default_clean_text() -> bool {
    true
}

impl Config {
    /// Load a configuration file, writing a default one when it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            warn!("Config file not found at '{}', creating default config.", path.display());
            let config = Config::default();
            config.save(path)?;
            return Ok(config);
        }

        let file = File::open(path).context(format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Save the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        FileManager::write_to_file(path, &json)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        self.rubric.validate()?;

        if self.report.bar_width == 0 {
            return Err(anyhow!("Report bar width must be positive"));
        }

        if self.batch.max_concurrent_evaluations == 0 {
            return Err(anyhow!("Batch concurrency must be at least 1"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: LogLevel::default(),
            rubric: Rubric::default(),
            report: ReportOptions::default(),
            batch: BatchConfig::default(),
            slides: SlidesConfig::default(),
        }
    }
}
