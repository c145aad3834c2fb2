//! Configuration management for healthscreen
//!
//! TOML file with defaults for every field.
//! Location: ~/.healthscreen/config.toml (or `--config <path>`)

use crate::errors::{Result, ScreenerError};
use crate::hospitals::{DEFAULT_OFFLINE_ROWS, DEFAULT_OVERPASS_URL};
use crate::scoring::DEFAULT_TOP_N;
use crate::training::{TrainParams, TreeParams, DEFAULT_LABEL_COLUMN};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub scoring: ScoringConfig,
    pub training: TrainingConfig,
    pub lookup: LookupConfig,
    pub telemetry: TelemetryConfig,
}

/// File locations; `~/` is expanded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub rules: String,
    pub model: String,
    pub dataset: String,
    pub rules_text: String,
    pub hospitals_csv: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub top_n: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub max_depth: usize,
    pub random_state: u64,
    pub label_column: String,
    pub holdout_fraction: f64,
}

/// Hospital lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    pub overpass_url: String,
    pub radius_meters: u32,
    pub timeout_secs: u64,
    pub max_results: usize,
    pub offline_rows: usize,
}

/// Terminal output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub default_verbosity: String,
    pub show_progress_bars: bool,
    pub color_output: bool,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            rules: "~/.healthscreen/question_to_conditions.json".to_string(),
            model: "~/.healthscreen/decision_tree_model.json".to_string(),
            dataset: "patient_symptom_dataset.csv".to_string(),
            rules_text: "~/.healthscreen/rules.txt".to_string(),
            hospitals_csv: "HospitalsInIndia.csv".to_string(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self { top_n: DEFAULT_TOP_N }
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        let tree = TreeParams::default();
        Self {
            max_depth: tree.max_depth,
            random_state: tree.random_state,
            label_column: DEFAULT_LABEL_COLUMN.to_string(),
            holdout_fraction: 0.0,
        }
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            overpass_url: DEFAULT_OVERPASS_URL.to_string(),
            radius_meters: 5000,
            timeout_secs: 25,
            max_results: 10,
            offline_rows: DEFAULT_OFFLINE_ROWS,
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            default_verbosity: "normal".to_string(),
            show_progress_bars: true,
            color_output: true,
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(config_path) => Self::load_from_file(config_path),
            None => Self::load_default(),
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ScreenerError::Config(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| ScreenerError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load from the standard location, or built-in defaults if absent
    pub fn load_default() -> Result<Self> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }
        Ok(Config::default())
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".healthscreen").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.scoring.top_n == 0 {
            return Err(ScreenerError::Config("top_n must be greater than 0".to_string()));
        }

        if self.training.max_depth == 0 {
            return Err(ScreenerError::Config("max_depth must be greater than 0".to_string()));
        }

        if !(0.0..1.0).contains(&self.training.holdout_fraction) {
            return Err(ScreenerError::Config(
                "holdout_fraction must be in [0.0, 1.0)".to_string(),
            ));
        }

        if self.training.label_column.trim().is_empty() {
            return Err(ScreenerError::Config("label_column must not be empty".to_string()));
        }

        if self.lookup.timeout_secs == 0 {
            return Err(ScreenerError::Config("timeout_secs must be greater than 0".to_string()));
        }

        match self.telemetry.default_verbosity.as_str() {
            "quiet" | "normal" | "verbose" | "very_verbose" => {}
            _ => {
                return Err(ScreenerError::Config(format!(
                    "Invalid verbosity level: {}",
                    self.telemetry.default_verbosity
                )))
            }
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ScreenerError::Config(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ScreenerError::Config(format!("Failed to create config dir: {}", e)))?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ScreenerError::Config(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ScreenerError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Expand tilde in paths
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    pub fn rules_path(&self) -> PathBuf {
        Self::expand_path(&self.paths.rules)
    }

    pub fn model_path(&self) -> PathBuf {
        Self::expand_path(&self.paths.model)
    }

    pub fn dataset_path(&self) -> PathBuf {
        Self::expand_path(&self.paths.dataset)
    }

    pub fn rules_text_path(&self) -> PathBuf {
        Self::expand_path(&self.paths.rules_text)
    }

    pub fn hospitals_csv_path(&self) -> PathBuf {
        Self::expand_path(&self.paths.hospitals_csv)
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup.timeout_secs)
    }

    pub fn train_params(&self) -> TrainParams {
        TrainParams {
            tree: TreeParams {
                max_depth: self.training.max_depth,
                random_state: self.training.random_state,
                ..TreeParams::default()
            },
            holdout_fraction: self.training.holdout_fraction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.scoring.top_n, 3);
        assert_eq!(config.training.max_depth, 4);
        assert_eq!(config.training.random_state, 42);
        assert_eq!(config.training.label_column, "Diseases");
        assert_eq!(config.lookup.radius_meters, 5000);
        assert_eq!(config.lookup.max_results, 10);
        assert_eq!(config.lookup.offline_rows, 5);
    }

    #[test]
    fn test_config_validation_success() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_failures() {
        let mut config = Config::default();
        config.scoring.top_n = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.training.max_depth = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.training.holdout_fraction = 1.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.lookup.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.telemetry.default_verbosity = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[paths]\nrules = \"/srv/rules.json\"\n\n[scoring]\ntop_n = 5\n").unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.paths.rules, "/srv/rules.json");
        assert_eq!(config.scoring.top_n, 5);
        assert_eq!(config.paths.model, PathsConfig::default().model);
        assert_eq!(config.training, TrainingConfig::default());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sub").join("config.toml");

        let mut config = Config::default();
        config.training.holdout_fraction = 0.2;
        config.save(&path).unwrap();

        assert_eq!(Config::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[scoring\ntop_n = ").unwrap();
        assert!(matches!(Config::load(Some(path.as_path())), Err(ScreenerError::Config(_))));
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = Config::expand_path("~/.healthscreen");
        assert!(!expanded.to_string_lossy().contains('~'));
    }

    #[test]
    fn test_expand_path_without_tilde() {
        assert_eq!(
            Config::expand_path("/absolute/path").to_string_lossy(),
            "/absolute/path"
        );
    }

    #[test]
    fn test_train_params() {
        let mut config = Config::default();
        config.training.max_depth = 2;
        config.training.random_state = 7;
        let params = config.train_params();
        assert_eq!(params.tree.max_depth, 2);
        assert_eq!(params.tree.random_state, 7);
    }
}
