//! healthscreen - Symptom Screening
//!
//! Asks a fixed list of yes/no symptom questions, tallies the conditions a
//! trained rule table links to each "yes", and reports the most likely
//! candidates along with nearby hospitals.
//!
//! # Architecture
//!
//! - **Serving**: `catalog` + `rules` + `scoring` + `session`
//! - **Training**: `training` derives the rule table from labelled data
//! - **Lookup**: `hospitals` (OpenStreetMap with offline fallback)
//! - **Interface**: `cli`, `config`, `display`, `doctor`

pub mod errors;

pub mod catalog;
pub mod rules;
pub mod scoring;
pub mod session;

pub mod training;

pub mod hospitals;

pub mod cli;
pub mod config;
pub mod display;
pub mod doctor;

// Re-export commonly used types
pub use errors::{Result, ScreenerError};
pub use rules::RuleStore;
pub use scoring::{AnswerSet, Ranking, Scorer};
