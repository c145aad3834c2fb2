//! Command-line argument parsing for healthscreen
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use crate::config::Config;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// healthscreen - Symptom questionnaire with rule-based condition screening
#[derive(Parser, Debug)]
#[command(name = "healthscreen")]
#[command(version)]
#[command(about = "Yes/no symptom screening with a trained rule table and nearby hospital lookup", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Rule table (question -> conditions JSON)
    #[arg(long, global = true)]
    pub rules: Option<PathBuf>,

    /// Fitted model file
    #[arg(long, global = true)]
    pub model: Option<PathBuf>,

    /// Offline hospital table (CSV)
    #[arg(long, global = true)]
    pub hospitals_csv: Option<PathBuf>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (only results are printed)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand (defaults to `screen`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Run the questionnaire and show possible conditions
    Screen {
        /// Read answers line by line from a file instead of the terminal
        #[arg(long)]
        answers: Option<PathBuf>,

        /// Latitude for the hospital lookup (skips the prompt)
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude for the hospital lookup (skips the prompt)
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },

    /// Train the model and regenerate the rule table
    Train {
        /// Labelled symptom dataset (CSV)
        #[arg(long)]
        dataset: Option<PathBuf>,

        /// Fraction of rows held out for evaluation
        #[arg(long)]
        holdout: Option<f64>,
    },

    /// Print the current rule table
    Rules,

    /// Look up hospitals near a location
    Hospitals {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },

    /// Check that every data file loads and the map service is reachable
    Doctor,

    /// Display current configuration
    Config,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }

    /// Subcommand to run; no subcommand means an interactive screening
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Screen {
            answers: None,
            lat: None,
            lon: None,
        })
    }

    pub fn validate(&self) -> Result<(), String> {
        match &self.command {
            Some(Commands::Train {
                holdout: Some(fraction),
                ..
            }) if !(0.0..1.0).contains(fraction) => {
                Err(format!("--holdout must be in [0.0, 1.0), got {}", fraction))
            }
            Some(Commands::Hospitals { lat, lon }) if !valid_coordinates(*lat, *lon) => {
                Err(format!("Invalid coordinates: ({}, {})", lat, lon))
            }
            Some(Commands::Screen {
                lat: Some(lat),
                lon: Some(lon),
                ..
            }) if !valid_coordinates(*lat, *lon) => {
                Err(format!("Invalid coordinates: ({}, {})", lat, lon))
            }
            _ => Ok(()),
        }
    }

    /// Apply path flags on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(path) = &self.rules {
            config.paths.rules = path.to_string_lossy().into_owned();
        }
        if let Some(path) = &self.model {
            config.paths.model = path.to_string_lossy().into_owned();
        }
        if let Some(path) = &self.hospitals_csv {
            config.paths.hospitals_csv = path.to_string_lossy().into_owned();
        }
        if let Some(Commands::Train { dataset, holdout }) = &self.command {
            if let Some(path) = dataset {
                config.paths.dataset = path.to_string_lossy().into_owned();
            }
            if let Some(fraction) = holdout {
                config.training.holdout_fraction = *fraction;
            }
        }
    }
}

fn valid_coordinates(lat: f64, lon: f64) -> bool {
    (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)
}

impl Verbosity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::VeryVerbose => "very_verbose",
        }
    }

    /// Parse a config file value
    pub fn from_config(value: &str) -> Option<Self> {
        match value {
            "quiet" => Some(Verbosity::Quiet),
            "normal" => Some(Verbosity::Normal),
            "verbose" => Some(Verbosity::Verbose),
            "very_verbose" => Some(Verbosity::VeryVerbose),
            _ => None,
        }
    }

    /// Check if should show progress bars
    pub fn show_progress(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }

    /// Check if should show detailed events
    pub fn show_events(&self) -> bool {
        matches!(self, Verbosity::Verbose | Verbosity::VeryVerbose)
    }

    /// Default tracing filter when RUST_LOG is unset
    pub fn log_filter(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "healthscreen=info",
            Verbosity::VeryVerbose => "healthscreen=debug",
        }
    }
}
