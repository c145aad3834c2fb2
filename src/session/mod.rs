//! One screening session: collect answers, then score them

pub mod input;
pub mod questionnaire;

pub use input::{AnswerSource, ReadlineInput, ReaderInput};
pub use questionnaire::{ask_coordinates, ask_questions, RETRY_HINT};

use crate::catalog::Question;
use crate::errors::Result;
use crate::scoring::{AnswerSet, Ranking, Scorer};

/// Questionnaire bound to a scorer
pub struct ScreeningSession<'a> {
    questions: &'a [Question],
    scorer: &'a Scorer,
}

impl<'a> ScreeningSession<'a> {
    pub fn new(questions: &'a [Question], scorer: &'a Scorer) -> Self {
        Self { questions, scorer }
    }

    /// Ask everything, then score the completed answer set
    pub fn run(&self, source: &mut dyn AnswerSource) -> Result<(AnswerSet, Ranking)> {
        let answers = ask_questions(self.questions, source)?;
        let ranking = self
            .scorer
            .score_complete(&answers, self.questions.iter().map(|q| q.key))?;
        Ok((answers, ranking))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::QUESTIONS;
    use crate::rules::RuleStore;
    use std::sync::Arc;

    #[test]
    fn test_session_scores_after_all_answers() {
        let scorer = Scorer::new(Arc::new(RuleStore::from_map([
            ("Thirst", vec!["Diabetes"]),
            ("Frequent_Urination", vec!["Diabetes", "Kidney Disease"]),
        ])));
        let session = ScreeningSession::new(&QUESTIONS[..3], &scorer);

        let mut input = ReaderInput::new("yes\nyes\nno\n".as_bytes(), Vec::new());
        let (answers, ranking) = session.run(&mut input).unwrap();
        assert_eq!(answers.len(), 3);
        assert_eq!(ranking.names(), vec!["Diabetes", "Kidney Disease"]);
    }

    #[test]
    fn test_session_never_scores_partial_input() {
        let scorer = Scorer::new(Arc::new(RuleStore::from_map([("Thirst", vec!["Diabetes"])])));
        let session = ScreeningSession::new(&QUESTIONS[..3], &scorer);

        let mut input = ReaderInput::new("yes\n".as_bytes(), Vec::new());
        assert!(session.run(&mut input).is_err());
    }
}
