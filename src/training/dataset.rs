//! Labeled symptom dataset
//!
//! CSV with a header row: one column per symptom feature plus a label column
//! holding a comma-separated list of condition names.

use crate::errors::{Result, ScreenerError};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// Default name of the label column
pub const DEFAULT_LABEL_COLUMN: &str = "Diseases";

/// Split a label cell on commas, trimming each name and dropping empty pieces
pub fn parse_labels(cell: &str) -> Vec<String> {
    cell.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Numeric value of a feature cell. Anything that is not a finite number,
/// words like "Yes" included, becomes 0.
pub fn coerce_value(cell: &str) -> f64 {
    cell.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Feature matrix plus per-row condition labels
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingDataset {
    feature_names: Vec<String>,
    rows: Vec<Vec<f64>>,
    labels: Vec<Vec<String>>,
}

impl TrainingDataset {
    /// Build from already-parsed parts
    pub fn new(
        feature_names: Vec<String>,
        rows: Vec<Vec<f64>>,
        labels: Vec<Vec<String>>,
    ) -> Result<Self> {
        if rows.len() != labels.len() {
            return Err(ScreenerError::Dataset(format!(
                "{} feature rows but {} label rows",
                rows.len(),
                labels.len()
            )));
        }
        if let Some((i, _)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != feature_names.len())
        {
            return Err(ScreenerError::Format(format!(
                "row {} has {} features, expected {}",
                i + 1,
                rows[i].len(),
                feature_names.len()
            )));
        }
        if let Some(i) = labels.iter().position(Vec::is_empty) {
            return Err(ScreenerError::Dataset(format!("row {} has an empty label", i + 1)));
        }

        Ok(Self {
            feature_names,
            rows,
            labels,
        })
    }

    /// Load a CSV dataset from disk
    pub fn load(path: impl AsRef<Path>, label_column: &str) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            ScreenerError::Dataset(format!("cannot open {}: {}", path.display(), e))
        })?;
        let dataset = Self::from_reader(file, label_column)?;
        info!(
            path = %path.display(),
            rows = dataset.n_rows(),
            features = dataset.n_features(),
            "loaded training dataset"
        );
        Ok(dataset)
    }

    /// Parse CSV from any reader; every non-label column is a feature
    pub fn from_reader<R: Read>(reader: R, label_column: &str) -> Result<Self> {
        let mut csv = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);

        let headers = csv.headers()?.clone();
        let label_idx = headers
            .iter()
            .position(|h| h == label_column)
            .ok_or_else(|| {
                ScreenerError::Dataset(format!("label column '{}' not found", label_column))
            })?;

        let feature_names: Vec<String> = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != label_idx)
            .map(|(_, h)| h.to_string())
            .collect();

        if feature_names.is_empty() {
            return Err(ScreenerError::Dataset("no feature columns".to_string()));
        }

        let mut rows = Vec::new();
        let mut labels = Vec::new();

        for (line, record) in csv.records().enumerate() {
            let record = record?;

            let row_labels = parse_labels(record.get(label_idx).unwrap_or(""));
            if row_labels.is_empty() {
                return Err(ScreenerError::Dataset(format!(
                    "row {} has an empty label",
                    line + 1
                )));
            }

            let row = record
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != label_idx)
                .map(|(_, cell)| coerce_value(cell))
                .collect();

            rows.push(row);
            labels.push(row_labels);
        }

        if rows.is_empty() {
            return Err(ScreenerError::Dataset("dataset has no rows".to_string()));
        }

        Self::new(feature_names, rows, labels)
    }

    /// Reorder columns to `names`; absent columns are filled with 0, extra ones dropped
    pub fn aligned_to<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Self {
        let names: Vec<String> = names.into_iter().map(str::to_string).collect();

        let sources: Vec<Option<usize>> = names
            .iter()
            .map(|n| self.feature_names.iter().position(|f| f == n))
            .collect();

        for (name, source) in names.iter().zip(&sources) {
            if source.is_none() {
                warn!(column = %name, "feature column missing from dataset, filling with 0");
            }
        }
        for extra in self.feature_names.iter().filter(|f| !names.contains(f)) {
            warn!(column = %extra, "ignoring unknown feature column");
        }

        let rows = self
            .rows
            .iter()
            .map(|row| {
                sources
                    .iter()
                    .map(|s| s.map(|i| row[i]).unwrap_or(0.0))
                    .collect()
            })
            .collect();

        Self {
            feature_names: names,
            rows,
            labels: self.labels.clone(),
        }
    }

    /// Rows at the given indices, in that order
    pub fn subset(&self, indices: &[usize]) -> Self {
        Self {
            feature_names: self.feature_names.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
            labels: indices.iter().map(|&i| self.labels[i].clone()).collect(),
        }
    }

    /// Sorted distinct condition names
    pub fn vocabulary(&self) -> Vec<String> {
        self.labels
            .iter()
            .flatten()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Membership matrix: `encoded[row][class]`
    pub fn encode_labels(&self, vocabulary: &[String]) -> Vec<Vec<bool>> {
        self.labels
            .iter()
            .map(|row| vocabulary.iter().map(|c| row.contains(c)).collect())
            .collect()
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn labels(&self) -> &[Vec<String>] {
        &self.labels
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }
}
