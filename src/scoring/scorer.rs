//! Ranks candidate conditions from a set of answers

use crate::errors::Result;
use crate::rules::RuleStore;
use crate::scoring::answers::AnswerSet;
use crate::scoring::tally::{Ranking, ScoreTally};
use std::sync::Arc;
use tracing::debug;

/// Number of conditions reported by default
pub const DEFAULT_TOP_N: usize = 3;

/// Scores answer sets against a shared rule table
#[derive(Debug, Clone)]
pub struct Scorer {
    store: Arc<RuleStore>,
    top_n: usize,
}

impl Scorer {
    pub fn new(store: Arc<RuleStore>) -> Self {
        Self {
            store,
            top_n: DEFAULT_TOP_N,
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn store(&self) -> &RuleStore {
        &self.store
    }

    /// Swap in a freshly loaded rule table
    pub fn replace_store(&mut self, store: Arc<RuleStore>) {
        self.store = store;
    }

    /// Count every condition linked to each "yes" answer.
    ///
    /// Conditions reached from several questions are counted once per question.
    pub fn tally(&self, answers: &AnswerSet) -> ScoreTally {
        let mut tally = ScoreTally::new();
        for key in answers.yes_keys() {
            for condition in self.store.lookup(key) {
                tally.add(condition);
            }
        }
        tally
    }

    /// Rank conditions for an answer set. Never fails; unknown keys contribute nothing.
    pub fn score(&self, answers: &AnswerSet) -> Ranking {
        let tally = self.tally(answers);
        debug!(
            yes = answers.yes_keys().count(),
            conditions = tally.len(),
            "scored answer set"
        );
        tally.into_ranking(self.top_n)
    }

    /// Score only if every required question was answered
    pub fn score_complete<'a>(
        &self,
        answers: &AnswerSet,
        required: impl IntoIterator<Item = &'a str>,
    ) -> Result<Ranking> {
        answers.ensure_complete(required)?;
        Ok(self.score(answers))
    }
}
