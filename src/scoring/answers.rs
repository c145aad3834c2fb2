//! Per-session yes/no answers

use crate::errors::{Result, ScreenerError};

/// Parse a typed answer; only yes/no (any case, surrounding whitespace ignored)
pub fn parse_answer(input: &str) -> Result<bool> {
    match input.trim().to_lowercase().as_str() {
        "yes" => Ok(true),
        "no" => Ok(false),
        other => Err(ScreenerError::InputValidation(other.to_string())),
    }
}

/// Answers keyed by question, kept in the order they were first recorded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet {
    answers: Vec<(String, bool)>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer, returning the previous one for the same key.
    ///
    /// Re-answering keeps the question's original position.
    pub fn record(&mut self, key: impl Into<String>, value: bool) -> Option<bool> {
        let key = key.into();
        match self.answers.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.answers.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<bool> {
        self.answers.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.answers.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Keys answered "yes", in answer order
    pub fn yes_keys(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|(_, v)| *v).map(|(k, _)| k)
    }

    /// Required keys with no recorded answer
    pub fn missing<'a>(&self, required: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        required
            .into_iter()
            .filter(|key| self.get(key).is_none())
            .map(str::to_string)
            .collect()
    }

    pub fn is_complete<'a>(&self, required: impl IntoIterator<Item = &'a str>) -> bool {
        self.missing(required).is_empty()
    }

    /// Fail with the list of unanswered keys unless every required key is present
    pub fn ensure_complete<'a>(&self, required: impl IntoIterator<Item = &'a str>) -> Result<()> {
        let missing = self.missing(required);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ScreenerError::IncompleteAnswers { missing })
        }
    }
}

impl<K: Into<String>> FromIterator<(K, bool)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
        let mut set = AnswerSet::new();
        for (key, value) in iter {
            set.record(key, value);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_answer_accepts_yes_no_any_case() {
        assert!(parse_answer("yes").unwrap());
        assert!(parse_answer("  YES ").unwrap());
        assert!(!parse_answer("No").unwrap());
        assert!(!parse_answer("nO\n").unwrap());
    }

    #[test]
    fn test_parse_answer_rejects_others() {
        for input in ["y", "n", "", "yes please", "1", "true"] {
            assert!(matches!(
                parse_answer(input),
                Err(ScreenerError::InputValidation(_))
            ));
        }
    }

    #[test]
    fn test_record_replaces_in_place() {
        let mut set = AnswerSet::new();
        assert_eq!(set.record("Thirst", true), None);
        set.record("Fatigue", false);
        assert_eq!(set.record("Thirst", false), Some(true));

        let keys: Vec<_> = set.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Thirst", "Fatigue"]);
        assert_eq!(set.get("Thirst"), Some(false));
    }

    #[test]
    fn test_yes_keys_in_order() {
        let set: AnswerSet = [("A", true), ("B", false), ("C", true)].into_iter().collect();
        assert_eq!(set.yes_keys().collect::<Vec<_>>(), vec!["A", "C"]);
    }

    #[test]
    fn test_completeness() {
        let set: AnswerSet = [("A", true), ("B", false)].into_iter().collect();
        assert!(set.is_complete(["A", "B"]));
        assert_eq!(set.missing(["A", "B", "C"]), vec!["C".to_string()]);

        let err = set.ensure_complete(["A", "C", "D"]).unwrap_err();
        match err {
            ScreenerError::IncompleteAnswers { missing } => assert_eq!(missing, vec!["C", "D"]),
            other => panic!("unexpected error: {}", other),
        }
    }
}
