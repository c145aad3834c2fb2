//! Persisted multi-label model
//!
//! One binary tree per condition, the feature column order the trees were
//! fitted on, and the sorted label vocabulary.

use crate::errors::{Result, ScreenerError};
use crate::rules::RuleStore;
use crate::scoring::AnswerSet;
use crate::training::tree::{DecisionTree, TreeParams};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Fitted trees plus the vocabulary they predict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedRules {
    pub feature_names: Vec<String>,
    pub classes: Vec<String>,
    pub trees: Vec<DecisionTree>,
    pub params: TreeParams,
    pub n_samples: usize,
    pub trained_at: DateTime<Utc>,
}

impl FittedRules {
    /// Load a model written by [`FittedRules::save`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let shown = path.display().to_string();

        let json = fs::read_to_string(path).map_err(|e| ScreenerError::load("model", &shown, e))?;
        let model: FittedRules =
            serde_json::from_str(&json).map_err(|e| ScreenerError::load("model", &shown, e))?;

        if model.trees.len() != model.classes.len() {
            return Err(ScreenerError::load(
                "model",
                &shown,
                format!("{} trees for {} classes", model.trees.len(), model.classes.len()),
            ));
        }

        info!(path = %path.display(), classes = model.classes.len(), "loaded model");
        Ok(model)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        debug!(path = %path.display(), "saved model");
        Ok(())
    }

    /// Conditions predicted present for a feature vector, in vocabulary order
    pub fn predict(&self, row: &[f64]) -> Vec<String> {
        self.classes
            .iter()
            .zip(&self.trees)
            .filter(|(_, tree)| tree.predict(row))
            .map(|(class, _)| class.clone())
            .collect()
    }

    /// Predict from questionnaire answers; yes = 1, no or unanswered = 0
    pub fn predict_answers(&self, answers: &AnswerSet) -> Vec<String> {
        let row = self.feature_vector(answers);
        self.predict(&row)
    }

    pub fn feature_vector(&self, answers: &AnswerSet) -> Vec<f64> {
        self.feature_names
            .iter()
            .map(|name| match answers.get(name) {
                Some(true) => 1.0,
                _ => 0.0,
            })
            .collect()
    }

    /// Derive the serving rule table.
    ///
    /// A feature is linked to a condition when that condition's tree reaches a
    /// "present" leaf through the feature's above-threshold branch. Every
    /// feature gets an entry; lists follow vocabulary order.
    pub fn derive_rule_store(&self) -> RuleStore {
        let mut entries: Vec<(String, Vec<String>)> = self
            .feature_names
            .iter()
            .map(|name| (name.clone(), Vec::new()))
            .collect();

        for (class, tree) in self.classes.iter().zip(&self.trees) {
            for feature in tree.positive_features() {
                if let Some((_, list)) = entries.get_mut(feature) {
                    list.push(class.clone());
                }
            }
        }

        RuleStore::from_map(entries)
    }
}
