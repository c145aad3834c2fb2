//! Scoring engine
//!
//! Turns a completed answer set into a ranked list of candidate conditions:
//! every "yes" adds one count to each condition the rule table links to that
//! question, then the most frequent conditions are reported.

pub mod answers;
pub mod scorer;
pub mod tally;

pub use answers::{parse_answer, AnswerSet};
pub use scorer::{Scorer, DEFAULT_TOP_N};
pub use tally::{RankedCondition, Ranking, ScoreTally, NO_SIGNIFICANT_SYMPTOMS};
