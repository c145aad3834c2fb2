//! Question → condition rule table
//!
//! Persisted as a JSON object whose values are arrays of condition names:
//!
//! ```json
//! { "Thirst": ["Diabetes"], "Fatigue": ["Diabetes", "Hypothyroidism"] }
//! ```

use crate::errors::{Result, ScreenerError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Read-only rule table consulted by the scorer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleStore {
    entries: BTreeMap<String, Vec<String>>,
    #[serde(skip)]
    source: Option<PathBuf>,
}

impl RuleStore {
    /// Build a store from an in-memory mapping
    pub fn from_map<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: IntoIterator,
        V::Item: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into_iter().map(Into::into).collect()))
            .collect();

        Self {
            entries,
            source: None,
        }
    }

    /// Load a persisted rule table
    ///
    /// Fails if the file is missing, unreadable, or not a key → list-of-strings
    /// mapping.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let shown = path.display().to_string();

        let contents = fs::read_to_string(path)
            .map_err(|e| ScreenerError::load("rule table", &shown, e))?;

        let entries: BTreeMap<String, Vec<String>> = serde_json::from_str(&contents)
            .map_err(|e| ScreenerError::load("rule table", &shown, e))?;

        info!(path = %path.display(), keys = entries.len(), "loaded rule table");

        Ok(Self {
            entries,
            source: Some(path.to_path_buf()),
        })
    }

    /// Re-read the file this store was loaded from
    pub fn reload(&self) -> Result<Self> {
        match &self.source {
            Some(path) => Self::load(path),
            None => Err(ScreenerError::load(
                "rule table",
                "<memory>",
                "store was not loaded from a file",
            )),
        }
    }

    /// Write the table as pretty JSON, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(path, json)?;

        debug!(path = %path.display(), keys = self.entries.len(), "saved rule table");
        Ok(())
    }

    /// Conditions associated with a question key; empty for unknown keys
    pub fn lookup(&self, key: &str) -> &[String] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Distinct condition names across all entries, in key order
    pub fn conditions(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for name in self.entries.values().flatten() {
            if !seen.contains(&name.as_str()) {
                seen.push(name.as_str());
            }
        }
        seen
    }

    /// File the store was loaded from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> RuleStore {
        RuleStore::from_map([
            ("Thirst", vec!["Diabetes"]),
            ("Fatigue", vec!["Diabetes", "Hypothyroidism"]),
            ("Weight_Gain", vec!["Hypothyroidism"]),
        ])
    }

    #[test]
    fn test_lookup_registered_key() {
        let store = sample();
        assert_eq!(store.lookup("Fatigue"), ["Diabetes", "Hypothyroidism"]);
    }

    #[test]
    fn test_lookup_unknown_key_is_empty() {
        let store = sample();
        assert!(store.lookup("Jaundice").is_empty());
        assert!(store.lookup("").is_empty());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("rules.json");

        let store = sample();
        store.save(&path).unwrap();

        let loaded = RuleStore::load(&path).unwrap();
        assert_eq!(loaded.len(), 3);
        for (key, conditions) in store.iter() {
            assert_eq!(loaded.lookup(key), conditions);
        }
        assert_eq!(loaded.source(), Some(path.as_path()));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = RuleStore::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ScreenerError::Load { .. }));
    }

    #[test]
    fn test_load_records_source_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rules.json");
        sample().save(&path).unwrap();

        let store = RuleStore::load(&path).unwrap();
        assert_eq!(store.source(), Some(path.as_path()));

        let missing = dir.path().join("absent.json");
        let err = RuleStore::load(&missing).unwrap_err();
        assert!(err.to_string().contains(&missing.display().to_string()));
    }

    #[test]
    fn test_load_rejects_wrong_shape() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rules.json");

        for bad in [r#"["Thirst"]"#, r#"{"Thirst": "Diabetes"}"#, r#"{"Thirst": [1, 2]}"#, "not json"] {
            fs::write(&path, bad).unwrap();
            let err = RuleStore::load(&path).unwrap_err();
            assert!(matches!(err, ScreenerError::Load { .. }), "accepted {}", bad);
        }
    }

    #[test]
    fn test_empty_lists_are_valid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rules.json");
        fs::write(&path, r#"{"Snoring": [], "Thirst": ["Diabetes"]}"#).unwrap();

        let store = RuleStore::load(&path).unwrap();
        assert!(store.keys().any(|k| k == "Snoring"));
        assert!(store.lookup("Snoring").is_empty());
    }

    #[test]
    fn test_reload_picks_up_changes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rules.json");
        sample().save(&path).unwrap();

        let store = RuleStore::load(&path).unwrap();
        RuleStore::from_map([("Jaundice", vec!["Liver Disease"])]).save(&path).unwrap();

        let reloaded = store.reload().unwrap();
        assert_eq!(reloaded.lookup("Jaundice"), ["Liver Disease"]);
        assert!(reloaded.lookup("Thirst").is_empty());
        assert_eq!(store.lookup("Thirst"), ["Diabetes"]);
    }

    #[test]
    fn test_reload_without_source_fails() {
        assert!(sample().reload().is_err());
    }

    #[test]
    fn test_conditions_are_distinct() {
        assert_eq!(sample().conditions(), vec!["Diabetes", "Hypothyroidism"]);
    }

    #[test]
    fn test_conditions_follow_key_order() {
        let store = RuleStore::from_map([
            ("Weight_Gain", vec!["Hypothyroidism"]),
            ("Thirst", vec!["Diabetes"]),
        ]);
        assert_eq!(store.conditions(), vec!["Diabetes", "Hypothyroidism"]);
    }
}
