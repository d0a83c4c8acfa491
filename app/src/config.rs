//! FILENAME: app/src/config.rs
// PURPOSE: Configuration loading from TOML files.
// CONTEXT: Lookup order:
//          1. `$CALCULA_CONFIG` environment variable
//          2. `~/.config/calcula/config.toml`
//          3. Built-in defaults (everything is optional)

use std::path::{Path, PathBuf};

use calc_engine::AngleMode;
use linear_solver::Tolerances;
use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "CALCULA_CONFIG";

/// Default environment variable holding the photo-analysis credential.
pub const DEFAULT_API_KEY_ENV: &str = "CALCULA_ANALYSIS_KEY";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub calculator: CalculatorConfig,
    pub solver: SolverConfig,
    pub analysis: AnalysisConfig,
}

/// Log file, level and console echo.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log file path. No file logging when absent.
    pub file: Option<PathBuf>,
    /// "error" | "warn" | "info" | "debug" | "trace"
    pub level: String,
    /// Echo log lines to stderr.
    pub echo: bool,
}

/// Initial settings of a new calculator session.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub angle_mode: AngleMode,
}

/// Gaussian elimination thresholds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub pivot_epsilon: f64,
    pub elimination_epsilon: f64,
}

/// Remote photo analysis settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Name of the environment variable holding the credential.
    pub api_key_env: String,
}

// --- Defaults ---

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: "info".into(),
            echo: false,
        }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        let tolerances = Tolerances::default();
        Self {
            pivot_epsilon: tolerances.pivot,
            elimination_epsilon: tolerances.elimination,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            api_key_env: DEFAULT_API_KEY_ENV.into(),
        }
    }
}

impl LoggingConfig {
    /// Parsed level; unknown names fall back to info.
    pub fn level_filter(&self) -> LevelFilter {
        self.level.parse().unwrap_or(LevelFilter::Info)
    }
}

impl SolverConfig {
    pub fn tolerances(&self) -> Tolerances {
        Tolerances::with_params(self.pivot_epsilon, self.elimination_epsilon)
    }
}

/// Load config from disk. Returns defaults if no config file exists.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    match config_path() {
        Some(path) if path.exists() => load_config_from(&path),
        _ => Ok(AppConfig::default()),
    }
}

/// Load config from an explicit file.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_config(content: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str(content)
}

/// Resolve the config file path.
pub fn config_path() -> Option<PathBuf> {
    if let Ok(p) = std::env::var(CONFIG_ENV) {
        return Some(PathBuf::from(p));
    }

    std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(".config").join("calcula").join("config.toml"))
}
