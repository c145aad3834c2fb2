//! Doctor command for installation diagnostics
//!
//! Checks that each data file the screener depends on loads, and that the
//! map service answers.

use crate::config::Config;
use crate::hospitals::{load_offline_table, OverpassClient};
use crate::rules::RuleStore;
use crate::training::{FittedRules, TrainingDataset};

/// Health check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Pass,
    Warn(String),
    Fail(String),
}

/// Individual health check
#[derive(Debug)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
}

impl HealthCheck {
    fn new(name: &str, status: HealthStatus) -> Self {
        Self {
            name: name.to_string(),
            status,
        }
    }
}

/// Diagnostics over one configuration
pub struct Doctor {
    config: Config,
}

impl Doctor {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run all health checks
    pub async fn run_diagnostics(&self) -> Vec<HealthCheck> {
        vec![
            self.check_rule_table(),
            self.check_model(),
            self.check_dataset(),
            self.check_offline_table(),
            self.check_overpass().await,
        ]
    }

    /// Screening cannot run without it
    fn check_rule_table(&self) -> HealthCheck {
        let status = match RuleStore::load(self.config.rules_path()) {
            Ok(store) if store.is_empty() => HealthStatus::Warn("Rule table is empty".to_string()),
            Ok(_) => HealthStatus::Pass,
            Err(e) => HealthStatus::Fail(e.to_string()),
        };
        HealthCheck::new("Rule Table", status)
    }

    /// Only needed for predictions; the rule table is enough to screen
    fn check_model(&self) -> HealthCheck {
        let path = self.config.model_path();
        let status = if !path.exists() {
            HealthStatus::Warn("No fitted model; run `healthscreen train`".to_string())
        } else {
            match FittedRules::load(&path) {
                Ok(_) => HealthStatus::Pass,
                Err(e) => HealthStatus::Fail(e.to_string()),
            }
        };
        HealthCheck::new("Model", status)
    }

    fn check_dataset(&self) -> HealthCheck {
        let path = self.config.dataset_path();
        let status = if !path.exists() {
            HealthStatus::Warn(format!("Dataset not found at {}", path.display()))
        } else {
            match TrainingDataset::load(&path, &self.config.training.label_column) {
                Ok(_) => HealthStatus::Pass,
                Err(e) => HealthStatus::Fail(e.to_string()),
            }
        };
        HealthCheck::new("Training Dataset", status)
    }

    fn check_offline_table(&self) -> HealthCheck {
        let status = match load_offline_table(
            self.config.hospitals_csv_path(),
            self.config.lookup.offline_rows,
        ) {
            Ok(rows) if rows.is_empty() => {
                HealthStatus::Warn("Offline hospital table has no rows".to_string())
            }
            Ok(_) => HealthStatus::Pass,
            Err(e) => HealthStatus::Warn(e.to_string()),
        };
        HealthCheck::new("Hospital Table", status)
    }

    async fn check_overpass(&self) -> HealthCheck {
        let client = OverpassClient::new(
            &self.config.lookup.overpass_url,
            self.config.lookup_timeout(),
            self.config.lookup.max_results,
        );
        let status = if client.is_reachable().await {
            HealthStatus::Pass
        } else {
            HealthStatus::Warn("Overpass API not reachable; offline table will be used".to_string())
        };
        HealthCheck::new("Overpass API", status)
    }

    /// Get overall health status
    pub fn overall_status(checks: &[HealthCheck]) -> bool {
        !checks.iter().any(|c| matches!(c.status, HealthStatus::Fail(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> Config {
        let mut config = Config::default();
        let path = |name: &str| dir.path().join(name).to_string_lossy().into_owned();
        config.paths.rules = path("rules.json");
        config.paths.model = path("model.json");
        config.paths.dataset = path("data.csv");
        config.paths.hospitals_csv = path("hospitals.csv");
        config
    }

    #[test]
    fn test_health_status_equality() {
        assert_eq!(HealthStatus::Pass, HealthStatus::Pass);
        assert_eq!(
            HealthStatus::Warn("test".to_string()),
            HealthStatus::Warn("test".to_string())
        );
        assert_ne!(HealthStatus::Pass, HealthStatus::Fail("test".to_string()));
    }

    #[test]
    fn test_overall_status() {
        let mut checks = vec![
            HealthCheck::new("Test 1", HealthStatus::Pass),
            HealthCheck::new("Test 2", HealthStatus::Warn("warning".to_string())),
        ];
        assert!(Doctor::overall_status(&checks));

        checks.push(HealthCheck::new("Test 3", HealthStatus::Fail("error".to_string())));
        assert!(!Doctor::overall_status(&checks));
    }

    #[test]
    fn test_missing_rule_table_fails() {
        let dir = TempDir::new().unwrap();
        let doctor = Doctor::new(config_in(&dir));
        assert!(matches!(doctor.check_rule_table().status, HealthStatus::Fail(_)));
    }

    #[test]
    fn test_present_files_pass() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        std::fs::write(config.rules_path(), r#"{"Thirst": ["Diabetes"]}"#).unwrap();
        std::fs::write(
            config.hospitals_csv_path(),
            "Hospital,City,State\nAIIMS,New Delhi,Delhi\n",
        )
        .unwrap();
        std::fs::write(config.dataset_path(), "Thirst,Diseases\n1,Diabetes\n0,Flu\n").unwrap();

        let doctor = Doctor::new(config);
        assert_eq!(doctor.check_rule_table().status, HealthStatus::Pass);
        assert_eq!(doctor.check_offline_table().status, HealthStatus::Pass);
        assert_eq!(doctor.check_dataset().status, HealthStatus::Pass);
        assert!(matches!(doctor.check_model().status, HealthStatus::Warn(_)));
    }

    #[test]
    fn test_corrupt_model_fails() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        std::fs::write(config.model_path(), "not json").unwrap();
        let doctor = Doctor::new(config);
        assert!(matches!(doctor.check_model().status, HealthStatus::Fail(_)));
    }
}
