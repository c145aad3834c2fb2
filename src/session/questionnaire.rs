//! Fixed-order yes/no questionnaire

use crate::catalog::Question;
use crate::errors::{Result, ScreenerError};
use crate::scoring::{parse_answer, AnswerSet};
use crate::session::input::AnswerSource;
use tracing::debug;

pub const RETRY_HINT: &str = "Please enter Yes or No.";

/// Ask every question in order, re-prompting until each gets yes or no.
///
/// Fails with `InputClosed` if the source ends first; no partial set is returned.
pub fn ask_questions(questions: &[Question], source: &mut dyn AnswerSource) -> Result<AnswerSet> {
    let mut answers = AnswerSet::new();

    for question in questions {
        let prompt = format!("{} ", question.prompt);
        loop {
            let Some(line) = source.read_line(&prompt)? else {
                return Err(ScreenerError::InputClosed {
                    answered: answers.len(),
                    total: questions.len(),
                });
            };

            match parse_answer(&line) {
                Ok(value) => {
                    answers.record(question.key, value);
                    break;
                }
                Err(e) => {
                    debug!(key = question.key, error = %e, "re-prompting");
                    source.notify(RETRY_HINT);
                }
            }
        }
    }

    Ok(answers)
}

/// Read latitude then longitude. `None` if either is missing, unparseable, or out of range.
pub fn ask_coordinates(source: &mut dyn AnswerSource) -> Result<Option<(f64, f64)>> {
    source.notify("\nNote: Latitude comes first (e.g., 28.6), then Longitude (e.g., 77.3)");

    let latitude = read_number(source, "Enter your current latitude: ")?;
    let Some(latitude) = latitude.filter(|v| (-90.0..=90.0).contains(v)) else {
        return Ok(None);
    };
    let longitude = read_number(source, "Enter your current longitude: ")?;
    let Some(longitude) = longitude.filter(|v| (-180.0..=180.0).contains(v)) else {
        return Ok(None);
    };

    Ok(Some((latitude, longitude)))
}

fn read_number(source: &mut dyn AnswerSource, prompt: &str) -> Result<Option<f64>> {
    Ok(source
        .read_line(prompt)?
        .and_then(|line| line.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite()))
}
