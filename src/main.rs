//! healthscreen - Main CLI Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use healthscreen::{
    catalog,
    cli::{Args, Commands, Verbosity},
    config::Config,
    display::Console,
    doctor::Doctor,
    hospitals::{HospitalLocator, OverpassClient},
    rules::RuleStore,
    scoring::Scorer,
    session::{ask_coordinates, AnswerSource, ReadlineInput, ReaderInput, ScreeningSession},
    training::{Trainer, TrainingDataset},
};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    if let Err(msg) = args.validate() {
        eprintln!("Error: {}", msg);
        std::process::exit(2);
    }

    let mut config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    args.apply_overrides(&mut config);
    config.validate()?;

    let verbosity = effective_verbosity(&args, &config);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    let console = Console::new(verbosity, config.telemetry.color_output);

    match args.command() {
        Commands::Screen { answers, lat, lon } => {
            let coordinates = lat.zip(lon);
            run_screen(&config, &console, answers, coordinates).await?;
        }
        Commands::Train { .. } => {
            run_train(&config, &console)?;
        }
        Commands::Rules => {
            let store = RuleStore::load(config.rules_path())?;
            console.rule_table(&store);
        }
        Commands::Hospitals { lat, lon } => {
            let listing = locator(&config).locate(lat, lon).await;
            console.hospitals(&listing);
        }
        Commands::Doctor => {
            run_doctor(config, &console).await;
        }
        Commands::Config => {
            show_config(&args, &config)?;
        }
    }

    Ok(())
}

/// Flags win; without any, the config file decides
fn effective_verbosity(args: &Args, config: &Config) -> Verbosity {
    if args.quiet || args.verbose > 0 {
        args.verbosity()
    } else {
        Verbosity::from_config(&config.telemetry.default_verbosity).unwrap_or(Verbosity::Normal)
    }
}

fn locator(config: &Config) -> HospitalLocator {
    let client = OverpassClient::new(
        &config.lookup.overpass_url,
        config.lookup_timeout(),
        config.lookup.max_results,
    );
    HospitalLocator::new(
        Box::new(client),
        config.hospitals_csv_path(),
        config.lookup.radius_meters,
        config.lookup.offline_rows,
    )
}

async fn run_screen(
    config: &Config,
    console: &Console,
    answers: Option<PathBuf>,
    coordinates: Option<(f64, f64)>,
) -> Result<()> {
    let store = Arc::new(RuleStore::load(config.rules_path())?);
    info!(rules = store.len(), "rule table loaded");
    let scorer = Scorer::new(store).with_top_n(config.scoring.top_n);

    let mut source: Box<dyn AnswerSource> = match &answers {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open answer file {}", path.display()))?;
            Box::new(ReaderInput::new(BufReader::new(file), std::io::stdout()))
        }
        None => {
            console.banner(env!("CARGO_PKG_VERSION"));
            Box::new(ReadlineInput::new()?)
        }
    };

    let session = ScreeningSession::new(catalog::QUESTIONS, &scorer);
    let (_, ranking) = session.run(source.as_mut())?;
    console.ranking(&ranking);

    let coordinates = match coordinates {
        Some(pair) => Some(pair),
        None => ask_coordinates(source.as_mut())?,
    };

    let locator = locator(config);
    let listing = match coordinates {
        Some((lat, lon)) => locator.locate(lat, lon).await,
        None => {
            console.warn("Invalid coordinates entered.");
            locator.offline("Showing hospitals from the offline list instead.".to_string())
        }
    };
    console.hospitals(&listing);

    Ok(())
}

fn run_train(config: &Config, console: &Console) -> Result<()> {
    let path = config.dataset_path();
    console.info(&format!("Loading dataset {}", path.display()));
    let dataset = TrainingDataset::load(&path, &config.training.label_column)?
        .aligned_to(catalog::keys());

    let trainer = Trainer::new(config.train_params()).with_progress(
        console.verbosity().show_progress() && config.telemetry.show_progress_bars,
    );
    let outcome = trainer.train(&dataset)?;

    console.info(&outcome.rules_report());

    let rules_text = config.rules_text_path();
    outcome.persist(&config.model_path(), &config.rules_path(), Some(&rules_text))?;

    console.success(&format!(
        "Trained {} condition trees on {} rows",
        outcome.fitted.classes.len(),
        outcome.fitted.n_samples
    ));
    console.detail(&format!("Model: {}", config.model_path().display()));
    console.detail(&format!("Rule table: {}", config.rules_path().display()));
    console.detail(&format!("Rule report: {}", rules_text.display()));

    if let Some(evaluation) = &outcome.evaluation {
        console.evaluation(evaluation);
    }
    Ok(())
}

async fn run_doctor(config: Config, console: &Console) {
    let doctor = Doctor::new(config);
    let checks = doctor.run_diagnostics().await;
    console.health(&checks);

    std::process::exit(if Doctor::overall_status(&checks) { 0 } else { 1 });
}

fn show_config(args: &Args, config: &Config) -> Result<()> {
    let source = match &args.config {
        Some(path) => path.display().to_string(),
        None => match Config::default_path() {
            Some(path) if path.exists() => path.display().to_string(),
            _ => "built-in defaults".to_string(),
        },
    };

    println!("# Configuration source: {}", source);
    println!("{}", config.to_toml()?);
    Ok(())
}
