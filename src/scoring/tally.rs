//! Condition tallies and the ranking reported to the user

use serde::Serialize;
use std::collections::HashMap;

/// Message reported when no condition accumulated any count
pub const NO_SIGNIFICANT_SYMPTOMS: &str =
    "No significant symptoms detected. Please consult a healthcare provider.";

/// Per-condition counts in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreTally {
    counts: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl ScoreTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment a condition's count by one
    pub fn add(&mut self, condition: &str) {
        match self.index.get(condition) {
            Some(&slot) => self.counts[slot].1 += 1,
            None => {
                self.index.insert(condition.to_string(), self.counts.len());
                self.counts.push((condition.to_string(), 1));
            }
        }
    }

    pub fn count(&self, condition: &str) -> usize {
        self.index
            .get(condition)
            .map(|&slot| self.counts[slot].1)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(name, n)| (name.as_str(), *n))
    }

    /// Descending by count; equal counts keep first-seen order
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// Top `top_n` conditions, or the sentinel when nothing was counted
    pub fn into_ranking(self, top_n: usize) -> Ranking {
        if self.is_empty() {
            return Ranking::NoSignificantSymptoms;
        }

        let conditions = self
            .ranked()
            .into_iter()
            .take(top_n)
            .map(|(name, count)| RankedCondition {
                name: name.to_string(),
                count,
            })
            .collect();

        Ranking::Conditions(conditions)
    }
}

/// A condition in the final ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedCondition {
    pub name: String,
    pub count: usize,
}

/// Outcome of scoring one answer set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "conditions", rename_all = "snake_case")]
pub enum Ranking {
    Conditions(Vec<RankedCondition>),
    NoSignificantSymptoms,
}

impl Ranking {
    pub fn is_sentinel(&self) -> bool {
        matches!(self, Ranking::NoSignificantSymptoms)
    }

    /// Ranked condition names; empty for the sentinel
    pub fn names(&self) -> Vec<&str> {
        match self {
            Ranking::Conditions(list) => list.iter().map(|c| c.name.as_str()).collect(),
            Ranking::NoSignificantSymptoms => Vec::new(),
        }
    }

    /// Number of reported entries (the sentinel counts as one)
    pub fn len(&self) -> usize {
        match self {
            Ranking::Conditions(list) => list.len(),
            Ranking::NoSignificantSymptoms => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
