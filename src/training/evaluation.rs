//! Holdout split and accuracy report

use crate::training::dataset::TrainingDataset;
use crate::training::model::FittedRules;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

/// Shuffle row indices with `seed` and hold out `fraction` of them.
///
/// Returns `(train, test)`, each sorted ascending. A non-zero fraction always
/// holds out at least one row when there are two or more.
pub fn split_holdout(n_rows: usize, fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..n_rows).collect();
    if fraction <= 0.0 || n_rows < 2 {
        return (indices, Vec::new());
    }

    indices.shuffle(&mut StdRng::seed_from_u64(seed));
    let n_test = ((n_rows as f64 * fraction).ceil() as usize).clamp(1, n_rows - 1);

    let mut test = indices.split_off(n_rows - n_test);
    indices.sort_unstable();
    test.sort_unstable();
    (indices, test)
}

/// Accuracy of one condition's tree on the holdout rows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionAccuracy {
    pub condition: String,
    pub accuracy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub n_test: usize,
    pub per_condition: Vec<ConditionAccuracy>,
    /// Rows whose full predicted label set matched exactly
    pub subset_accuracy: f64,
}

/// Score a fitted model against labelled rows
pub fn evaluate(model: &FittedRules, test: &TrainingDataset) -> Evaluation {
    let n_test = test.n_rows();
    let truth = test.encode_labels(&model.classes);

    let mut correct = vec![0usize; model.classes.len()];
    let mut exact = 0usize;

    for ((row, expected), labels) in test.rows().iter().zip(&truth).zip(test.labels()) {
        let mut all_match = true;
        for (c, tree) in model.trees.iter().enumerate() {
            if tree.predict(row) == expected[c] {
                correct[c] += 1;
            } else {
                all_match = false;
            }
        }
        // Labels outside the vocabulary can never be predicted
        let unseen = labels.iter().any(|l| !model.classes.contains(l));
        if all_match && !unseen {
            exact += 1;
        }
    }

    let ratio = |n: usize| if n_test == 0 { 0.0 } else { n as f64 / n_test as f64 };

    Evaluation {
        n_test,
        per_condition: model
            .classes
            .iter()
            .zip(&correct)
            .map(|(condition, &n)| ConditionAccuracy {
                condition: condition.clone(),
                accuracy: ratio(n),
            })
            .collect(),
        subset_accuracy: ratio(exact),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::tree::{DecisionTree, TreeParams};
    use chrono::Utc;

    #[test]
    fn test_split_sizes_and_disjoint() {
        let (train, test) = split_holdout(10, 0.2, 42);
        assert_eq!(train.len(), 8);
        assert_eq!(test.len(), 2);
        assert!(test.iter().all(|i| !train.contains(i)));
    }

    #[test]
    fn test_split_zero_fraction_keeps_all() {
        let (train, test) = split_holdout(5, 0.0, 42);
        assert_eq!(train, vec![0, 1, 2, 3, 4]);
        assert!(test.is_empty());
    }

    #[test]
    fn test_split_never_empties_train() {
        let (train, test) = split_holdout(3, 0.99, 7);
        assert_eq!(train.len(), 1);
        assert_eq!(test.len(), 2);
    }

    #[test]
    fn test_split_is_seeded() {
        assert_eq!(split_holdout(20, 0.3, 1), split_holdout(20, 0.3, 1));
    }

    #[test]
    fn test_evaluate() {
        let x = vec![vec![1.0], vec![0.0]];
        let params = TreeParams::default();
        let model = FittedRules {
            feature_names: vec!["Thirst".into()],
            classes: vec!["Diabetes".into()],
            trees: vec![DecisionTree::fit(&x, &[true, false], &params)],
            params,
            n_samples: 2,
            trained_at: Utc::now(),
        };

        let test = TrainingDataset::new(
            vec!["Thirst".into()],
            vec![vec![1.0], vec![0.0], vec![1.0], vec![0.0]],
            vec![
                vec!["Diabetes".into()],
                vec!["Gout".into()],
                vec!["Gout".into()],
                vec!["Diabetes".into()],
            ],
        )
        .unwrap();

        let eval = evaluate(&model, &test);
        assert_eq!(eval.n_test, 4);
        assert!((eval.per_condition[0].accuracy - 0.5).abs() < 1e-9);
        // Row 1 is right per condition but carries an unseen label
        assert!((eval.subset_accuracy - 0.25).abs() < 1e-9);
    }
}
