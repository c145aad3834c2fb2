//! Terminal output for screening results and reports
//!
//! Rendering is split from printing: the `render_*` functions build plain
//! strings (easy to test), `Console` decides what to print for the current
//! verbosity and adds color.

use crate::cli::Verbosity;
use crate::doctor::{HealthCheck, HealthStatus};
use crate::hospitals::HospitalListing;
use crate::rules::RuleStore;
use crate::scoring::{Ranking, NO_SIGNIFICANT_SYMPTOMS};
use crate::training::Evaluation;
use colored::*;
use std::fmt::Write as _;

pub const CONDITION_PREFIX: &str = "⚠️ Possible Condition: ";

/// One line per ranked condition, or the sentinel message
pub fn render_ranking(ranking: &Ranking) -> Vec<String> {
    match ranking {
        Ranking::Conditions(list) => list
            .iter()
            .map(|c| format!("{}{}", CONDITION_PREFIX, c.name))
            .collect(),
        Ranking::NoSignificantSymptoms => vec![NO_SIGNIFICANT_SYMPTOMS.to_string()],
    }
}

/// Hospital lines, preceded by the fallback reason when offline
pub fn render_listing(listing: &HospitalListing) -> Vec<String> {
    match listing {
        HospitalListing::Online(hospitals) => hospitals
            .iter()
            .map(|h| format!("{}, Location: ({}, {})", h.name, h.latitude, h.longitude))
            .collect(),
        HospitalListing::Offline { reason, hospitals } => {
            let mut lines = vec![reason.clone(), "Showing hospitals from the local list:".to_string()];
            lines.extend(
                hospitals
                    .iter()
                    .map(|h| format!("{}, {} ({})", h.hospital, h.city, h.state)),
            );
            lines
        }
        HospitalListing::Unavailable { reason } => {
            vec![format!("Hospital information is unavailable: {}", reason)]
        }
    }
}

/// `key: condition, condition` per rule, in key order
pub fn render_rule_table(store: &RuleStore) -> String {
    let width = store.keys().map(str::len).max().unwrap_or(0);
    let mut out = String::new();
    for (key, conditions) in store.iter() {
        let listed = if conditions.is_empty() {
            "-".to_string()
        } else {
            conditions.join(", ")
        };
        let _ = writeln!(out, "{:<width$}  {}", key, listed, width = width);
    }
    out
}

pub fn render_evaluation(evaluation: &Evaluation) -> String {
    let mut out = format!("Holdout evaluation on {} rows\n", evaluation.n_test);
    let width = evaluation
        .per_condition
        .iter()
        .map(|c| c.condition.len())
        .max()
        .unwrap_or(0);
    for c in &evaluation.per_condition {
        let _ = writeln!(
            out,
            "  {:<width$}  {:>6.1}%",
            c.condition,
            c.accuracy * 100.0,
            width = width
        );
    }
    let _ = writeln!(out, "  Exact match: {:.1}%", evaluation.subset_accuracy * 100.0);
    out
}

/// User-facing printer
pub struct Console {
    verbosity: Verbosity,
}

impl Console {
    pub fn new(verbosity: Verbosity, color: bool) -> Self {
        if !color {
            colored::control::set_override(false);
        }
        Self { verbosity }
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn banner(&self, version: &str) {
        if self.verbosity == Verbosity::Quiet {
            return;
        }
        let line = "=".repeat(64);
        println!("\n{}", line.cyan());
        println!("{}", format!("  Health Screening {}", version).bold().cyan());
        println!("{}", "  Answer each question with Yes or No.".dimmed());
        println!("{}", "  This is not a diagnosis. Consult a healthcare provider.".dimmed());
        println!("{}\n", line.cyan());
    }

    /// Always printed, even in quiet mode
    pub fn ranking(&self, ranking: &Ranking) {
        println!();
        for line in render_ranking(ranking) {
            if ranking.is_sentinel() {
                println!("{}", line.green());
            } else {
                println!("{}", line.yellow().bold());
            }
        }
    }

    pub fn hospitals(&self, listing: &HospitalListing) {
        println!("\n{}", "Nearby hospitals:".bold().cyan());
        let lines = render_listing(listing);
        let skip = match listing {
            HospitalListing::Offline { .. } => {
                for header in &lines[..2] {
                    println!("{}", header.yellow());
                }
                2
            }
            _ => 0,
        };
        for line in &lines[skip..] {
            println!("  {}", line);
        }
    }

    pub fn rule_table(&self, store: &RuleStore) {
        if let Some(source) = store.source() {
            self.detail(&format!("Rule table: {}", source.display()));
        }
        print!("{}", render_rule_table(store));
    }

    pub fn evaluation(&self, evaluation: &Evaluation) {
        if self.verbosity == Verbosity::Quiet {
            return;
        }
        println!("\n{}", render_evaluation(evaluation));
    }

    pub fn health(&self, checks: &[HealthCheck]) {
        println!("\n{}\n", "Health Screening Diagnostics".bold().cyan());
        println!("{:<20} Status", "Check");
        println!("{}", "=".repeat(50));

        for check in checks {
            let status = match &check.status {
                HealthStatus::Pass => "PASS".green(),
                HealthStatus::Warn(msg) => format!("WARN: {}", msg).yellow(),
                HealthStatus::Fail(msg) => format!("FAIL: {}", msg).red(),
            };
            println!("{:<20} {}", check.name, status);
        }
        println!();
    }

    pub fn info(&self, message: &str) {
        if self.verbosity != Verbosity::Quiet {
            println!("{}", message);
        }
    }

    pub fn success(&self, message: &str) {
        if self.verbosity != Verbosity::Quiet {
            println!("{} {}", "✓".green(), message);
        }
    }

    /// Only with -v or more
    pub fn detail(&self, message: &str) {
        if self.verbosity.show_events() {
            println!("{}", message.dimmed());
        }
    }

    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "Warning:".yellow().bold(), message);
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "Error:".red().bold(), message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hospitals::{Hospital, OfflineHospital};
    use crate::scoring::RankedCondition;
    use crate::training::ConditionAccuracy;

    #[test]
    fn test_render_ranking_conditions() {
        let ranking = Ranking::Conditions(vec![
            RankedCondition { name: "Diabetes".to_string(), count: 2 },
            RankedCondition { name: "Hypothyroidism".to_string(), count: 1 },
        ]);
        assert_eq!(
            render_ranking(&ranking),
            vec![
                "⚠️ Possible Condition: Diabetes".to_string(),
                "⚠️ Possible Condition: Hypothyroidism".to_string(),
            ]
        );
    }

    #[test]
    fn test_render_ranking_sentinel() {
        assert_eq!(
            render_ranking(&Ranking::NoSignificantSymptoms),
            vec![NO_SIGNIFICANT_SYMPTOMS.to_string()]
        );
    }

    #[test]
    fn test_render_online_listing() {
        let listing = HospitalListing::Online(vec![Hospital {
            name: "City Hospital".to_string(),
            latitude: 28.61,
            longitude: 77.3,
        }]);
        assert_eq!(
            render_listing(&listing),
            vec!["City Hospital, Location: (28.61, 77.3)".to_string()]
        );
    }

    #[test]
    fn test_render_offline_listing() {
        let listing = HospitalListing::Offline {
            reason: "No hospitals found in OpenStreetMap data.".to_string(),
            hospitals: vec![OfflineHospital {
                hospital: "AIIMS".to_string(),
                city: "New Delhi".to_string(),
                state: "Delhi".to_string(),
            }],
        };
        let lines = render_listing(&listing);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "No hospitals found in OpenStreetMap data.");
        assert_eq!(lines[2], "AIIMS, New Delhi (Delhi)");
    }

    #[test]
    fn test_render_rule_table() {
        let store = RuleStore::from_map([
            ("Thirst", vec!["Diabetes"]),
            ("Fatigue", vec!["Diabetes", "Hypothyroidism"]),
            ("Cough", vec![]),
        ]);
        let table = render_rule_table(&store);
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Cough    -");
        assert_eq!(lines[1], "Fatigue  Diabetes, Hypothyroidism");
        assert_eq!(lines[2], "Thirst   Diabetes");
    }

    #[test]
    fn test_render_evaluation() {
        let evaluation = Evaluation {
            n_test: 4,
            per_condition: vec![ConditionAccuracy {
                condition: "Diabetes".to_string(),
                accuracy: 0.75,
            }],
            subset_accuracy: 0.5,
        };
        let text = render_evaluation(&evaluation);
        assert!(text.starts_with("Holdout evaluation on 4 rows"));
        assert!(text.contains("Diabetes    75.0%"));
        assert!(text.contains("Exact match: 50.0%"));
    }
}
