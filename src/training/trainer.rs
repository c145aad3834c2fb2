//! Offline training of the condition model and serving rule table

use crate::errors::{Result, ScreenerError};
use crate::rules::RuleStore;
use crate::training::dataset::TrainingDataset;
use crate::training::evaluation::{evaluate, split_holdout, Evaluation};
use crate::training::export::export_text;
use crate::training::model::FittedRules;
use crate::training::tree::{DecisionTree, TreeParams};
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Training knobs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainParams {
    pub tree: TreeParams,
    /// Share of rows held out for evaluation; 0 trains on everything
    pub holdout_fraction: f64,
}

impl Default for TrainParams {
    fn default() -> Self {
        Self {
            tree: TreeParams::default(),
            holdout_fraction: 0.0,
        }
    }
}

/// Rendered rules for one condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionRules {
    pub condition: String,
    pub text: String,
}

/// Everything one training run produces
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub fitted: FittedRules,
    pub rules_text: Vec<ConditionRules>,
    pub associations: RuleStore,
    pub evaluation: Option<Evaluation>,
}

impl TrainingOutcome {
    /// All condition rules as one report
    pub fn rules_report(&self) -> String {
        let mut out = String::from("Generated Rules from the Model:\n");
        for rules in &self.rules_text {
            let _ = write!(out, "\nRules for {}:\n{}", rules.condition, rules.text);
        }
        out
    }

    /// Write model, rule table, and (optionally) the text report
    pub fn persist(
        &self,
        model_path: &Path,
        rules_path: &Path,
        report_path: Option<&Path>,
    ) -> Result<()> {
        self.fitted.save(model_path)?;
        self.associations.save(rules_path)?;

        if let Some(path) = report_path {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, self.rules_report())?;
        }

        info!(
            model = %model_path.display(),
            rules = %rules_path.display(),
            "persisted training output"
        );
        Ok(())
    }
}

/// Fits one tree per condition
pub struct Trainer {
    params: TrainParams,
    show_progress: bool,
}

impl Trainer {
    pub fn new(params: TrainParams) -> Self {
        Self {
            params,
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn params(&self) -> &TrainParams {
        &self.params
    }

    pub fn train(&self, dataset: &TrainingDataset) -> Result<TrainingOutcome> {
        if dataset.n_rows() == 0 {
            return Err(ScreenerError::Dataset("dataset has no rows".to_string()));
        }

        let (train_idx, test_idx) = split_holdout(
            dataset.n_rows(),
            self.params.holdout_fraction,
            self.params.tree.random_state,
        );
        let train_set = if test_idx.is_empty() {
            dataset.clone()
        } else {
            dataset.subset(&train_idx)
        };

        let classes = dataset.vocabulary();
        let targets = train_set.encode_labels(&classes);
        info!(
            rows = train_set.n_rows(),
            holdout = test_idx.len(),
            conditions = classes.len(),
            max_depth = self.params.tree.max_depth,
            "training condition trees"
        );

        let progress = self.progress_bar(classes.len() as u64);
        let mut trees = Vec::with_capacity(classes.len());
        let mut rules_text = Vec::with_capacity(classes.len());

        for (c, condition) in classes.iter().enumerate() {
            progress.set_message(condition.clone());

            let column: Vec<bool> = targets.iter().map(|row| row[c]).collect();
            let tree = DecisionTree::fit(train_set.rows(), &column, &self.params.tree);
            debug!(
                condition = %condition,
                depth = tree.depth(),
                leaves = tree.n_leaves(),
                "fitted tree"
            );

            rules_text.push(ConditionRules {
                condition: condition.clone(),
                text: export_text(&tree, dataset.feature_names()),
            });
            trees.push(tree);
            progress.inc(1);
        }
        progress.finish_and_clear();

        let fitted = FittedRules {
            feature_names: dataset.feature_names().to_vec(),
            classes,
            trees,
            params: self.params.tree,
            n_samples: train_set.n_rows(),
            trained_at: Utc::now(),
        };

        let evaluation = if test_idx.is_empty() {
            None
        } else {
            let eval = evaluate(&fitted, &dataset.subset(&test_idx));
            info!(
                n_test = eval.n_test,
                subset_accuracy = eval.subset_accuracy,
                "holdout evaluation"
            );
            Some(eval)
        };

        let associations = fitted.derive_rule_store();

        Ok(TrainingOutcome {
            fitted,
            rules_text,
            associations,
            evaluation,
        })
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(len);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("=>-"));
        }
        pb
    }
}
