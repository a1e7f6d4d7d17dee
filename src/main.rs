//! Main entry point for the game predictor
//!
//! Loads configuration, initializes logging and runs the interactive
//! command loop on stdin/stdout. Ctrl-C ends the loop like `quit`.

use anyhow::Result;
use clap::Parser;
use game_predictor::cli::{self, InputEvent};
use game_predictor::config::{validate_config, AppConfig};
use game_predictor::{GameSession, PredictorError, ScoringMode};
use std::io;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use tracing::{error, info, warn};

/// Game Predictor - head-to-head match tracking and winner prediction
#[derive(Parser)]
#[command(
    name = "game-predictor",
    version,
    about = "Record match results and predict the winner of future matchups",
    long_about = "Game Predictor keeps a ledger of who beat whom, scores every competitor \
                 with a transitive win-rate model or Elo ratings, and predicts the winner \
                 of any matchup from an interactive prompt."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Save file override
    #[arg(long, value_name = "PATH", help = "Override the JSON save file path")]
    save_file: Option<PathBuf>,

    /// Scoring mode override
    #[arg(
        short,
        long,
        value_name = "MODE",
        help = "Scoring mode used for predictions (transitive, elo)"
    )]
    mode: Option<ScoringMode>,

    /// Shuffle seed override
    #[arg(long, value_name = "N", help = "Seed for the Elo reconciliation shuffle")]
    seed: Option<u64>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Disable accuracy tracking
    #[arg(long, help = "Do not predict and score each recorded match")]
    no_accuracy: bool,

    /// Load on start
    #[arg(long, help = "Load the save file before reading commands")]
    load: bool,

    /// Dry run mode (validate config and exit)
    #[arg(long, help = "Validate configuration and exit without starting")]
    dry_run: bool,
}

/// Initialize structured logging on stderr with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Display startup banner with session information
fn display_startup_banner(config: &AppConfig) {
    info!("Game Predictor v{}", game_predictor::VERSION);
    info!("   Service: {}", config.service.name);
    info!("   Log level: {}", config.service.log_level);
    info!("   Save file: {}", config.storage.save_path.display());
    info!("   Scoring mode: {}", config.scoring.mode);
    info!(
        "   Elo: K={}, reconcile runs={}",
        config.scoring.k_factor, config.scoring.reconcile_runs
    );
    info!(
        "   Accuracy tracking: {} (window {})",
        config.predictor.track_accuracy, config.predictor.rolling_window
    );
}

/// Load and merge configuration from environment, file and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(save_file) = &args.save_file {
        config.storage.save_path = save_file.clone();
    }

    if let Some(mode) = args.mode {
        config.scoring.mode = mode;
    }

    if let Some(seed) = args.seed {
        config.scoring.rng_seed = Some(seed);
    }

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if args.no_accuracy {
        config.predictor.track_accuracy = false;
    }

    if args.load {
        config.storage.load_on_start = true;
    }

    validate_config(&config)?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {:#}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if args.dry_run {
        info!("Configuration validation successful");
        display_startup_banner(&config);
        println!("Configuration OK");
        return Ok(());
    }

    display_startup_banner(&config);

    let load_on_start = config.storage.load_on_start;
    let mut session = match GameSession::new(config) {
        Ok(session) => session,
        Err(e) => {
            error!("Failed to initialize session: {:#}", e);
            std::process::exit(1);
        }
    };

    if load_on_start {
        match session.load() {
            Ok(report) => {
                for line in cli::report::loaded(&report) {
                    println!("{}", line);
                }
            }
            Err(e) => match e.downcast_ref::<PredictorError>() {
                Some(PredictorError::MissingSaveFile { .. }) => {
                    warn!("{} - starting with an empty ledger", e);
                }
                _ => {
                    error!("Failed to load save file: {:#}", e);
                    eprintln!("Error: {:#}", e);
                }
            },
        }
    }

    let (events, receiver) = mpsc::channel();
    let interrupt = events.clone();
    ctrlc::set_handler(move || {
        let _ = interrupt.send(InputEvent::Interrupted);
    })
    .map_err(|e| anyhow::anyhow!("Failed to install Ctrl+C handler: {}", e))?;

    thread::spawn(move || cli::forward_lines(io::stdin().lock(), &events));
    cli::run_events(&mut session, &receiver, io::stdout())?;

    info!("Game Predictor stopped");
    Ok(())
}
