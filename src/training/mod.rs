//! Offline rule derivation
//!
//! Reads a labelled symptom dataset, fits one shallow decision tree per
//! condition, and turns the fitted trees into the question → conditions table
//! the scorer serves from.
//!
//! - `dataset`: CSV loading, label splitting, numeric coercion
//! - `tree`: binary CART classifier
//! - `export`: nested text rendering of a tree
//! - `model`: persisted multi-label model and rule table derivation
//! - `evaluation`: optional holdout accuracy
//! - `trainer`: end-to-end training run

pub mod dataset;
pub mod evaluation;
pub mod export;
pub mod model;
pub mod trainer;
pub mod tree;

pub use dataset::{TrainingDataset, DEFAULT_LABEL_COLUMN};
pub use evaluation::{evaluate, split_holdout, ConditionAccuracy, Evaluation};
pub use model::FittedRules;
pub use trainer::{ConditionRules, TrainParams, Trainer, TrainingOutcome};
pub use tree::{DecisionTree, TreeParams};
