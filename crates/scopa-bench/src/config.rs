use scopa_core::sampler::{ADVISORY_TRIALS, DEFAULT_TRIALS};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const DEFAULT_CONFIDENCE: f64 = 0.95;
const DEFAULT_TELEMETRY_FILE: &str = "scopa-telemetry.jsonl";

/// Root analysis configuration loaded from YAML. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AnalysisConfig {
    /// Fixed PRNG seed; entropy is used when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub trials: TrialsConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AnalysisConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: AnalysisConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Loads `path` when given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Ok(Self::default()),
        }
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        self.trials.validate()?;
        self.report.validate()?;
        self.logging.normalize();
        Ok(())
    }
}

/// Monte Carlo budgets.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TrialsConfig {
    #[serde(default = "default_primary_trials")]
    pub primary: usize,
    #[serde(default = "default_advisory_trials")]
    pub advisory: usize,
}

impl Default for TrialsConfig {
    fn default() -> Self {
        Self {
            primary: DEFAULT_TRIALS,
            advisory: ADVISORY_TRIALS,
        }
    }
}

impl TrialsConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        for (label, value) in [
            ("trials.primary", self.primary),
            ("trials.advisory", self.advisory),
        ] {
            if value == 0 {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "trial count must be greater than zero".to_string(),
                });
            }
        }
        Ok(())
    }
}

fn default_primary_trials() -> usize {
    DEFAULT_TRIALS
}

fn default_advisory_trials() -> usize {
    ADVISORY_TRIALS
}

/// Rendering options for reports.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ReportConfig {
    /// Two-sided confidence level of the reported intervals.
    #[serde(default = "default_confidence")]
    pub confidence: f64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            confidence: DEFAULT_CONFIDENCE,
        }
    }
}

impl ReportConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if !(self.confidence > 0.0 && self.confidence < 1.0) {
            return Err(ValidationError::InvalidField {
                field: "report.confidence".to_string(),
                message: "confidence level must lie strictly between 0 and 1".to_string(),
            });
        }
        Ok(())
    }
}

fn default_confidence() -> f64 {
    DEFAULT_CONFIDENCE
}

/// Logging defaults to human-readable output on stderr.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    #[serde(default = "default_telemetry_file")]
    pub file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
            file: default_telemetry_file(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
        if self.file.as_os_str().is_empty() {
            self.file = default_telemetry_file();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "warn".to_string()
}

fn default_telemetry_file() -> PathBuf {
    PathBuf::from(DEFAULT_TELEMETRY_FILE)
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
