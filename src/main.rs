//! Pomodoro Timer CLI
//!
//! Alternates focused work and short breaks:
//! - 25 minutes of work, 5 minutes of break by default
//! - a Double Pomodoro profile that doubles both
//! - a notification at the end of every interval

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tokio::time::Duration;

use pomodoro_modes::cli::{
    run_session, spawn_input_reader, Cli, Commands, ConfigAction, Display, RunArgs, Session,
};
use pomodoro_modes::config::{keys, PrefsError};
use pomodoro_modes::notification::{run_delivery, ChannelNotificationSink, TerminalDelivery};
use pomodoro_modes::{Preferences, TimerConfig, TimerController};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// `RUST_LOG` wins; otherwise `--verbose` raises the level to debug.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::debug!("verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Run(args)) => {
            let prefs = load_preferences(cli.config)?;
            run(&args, &prefs).await?;
        }
        Some(Commands::Config { action }) => {
            let mut prefs = load_preferences(cli.config)?;
            configure(action, &mut prefs)?;
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Loads the preferences store from `--config` or the default location.
fn load_preferences(path: Option<PathBuf>) -> Result<Preferences> {
    let path = match path {
        Some(path) => path,
        None => Preferences::default_path()?,
    };
    tracing::debug!(path = %path.display(), "loading preferences");
    Preferences::load(path).context("could not load preferences")
}

/// Runs an interactive timer session until the user quits.
async fn run(args: &RunArgs, prefs: &Preferences) -> Result<()> {
    let config = args.apply_to(TimerConfig::from_preferences(prefs));
    if let Err(e) = config.validate() {
        tracing::warn!("repairing configuration: {}", e);
    }
    let config = config.sanitized();
    tracing::info!(
        work = config.work_minutes,
        break_minutes = config.break_minutes,
        profile = config.profile.name(),
        "starting session"
    );

    let (sink, rx) = ChannelNotificationSink::channel();
    let delivery = tokio::spawn(run_delivery(rx, TerminalDelivery));

    let controller = TimerController::with_system_clock(config.controller_settings(), Arc::new(sink));
    let session = Session::new(controller, config);

    let result = run_session(
        session,
        spawn_input_reader(),
        Duration::from_millis(args.tick_ms),
    )
    .await;

    // The session owned the last sender, so delivery drains and finishes.
    let delivered = delivery.await.context("notification task failed")?;
    tracing::debug!(delivered, "session ended");

    result
}

/// Applies a `config` subcommand.
fn configure(action: ConfigAction, prefs: &mut Preferences) -> Result<()> {
    match action {
        ConfigAction::Show { json } => {
            let config = TimerConfig::from_preferences(prefs);
            if json {
                let text = serde_json::to_string_pretty(&config)
                    .context("could not serialize configuration")?;
                println!("{text}");
            } else {
                Display::show_config(&config, prefs.path());
                if !prefs.is_empty() {
                    let stored: Vec<String> =
                        prefs.iter().map(|(k, v)| format!("{k}={v}")).collect();
                    Display::show_message(&format!("# stored: {}", stored.join(" ")));
                }
            }
        }
        ConfigAction::Set { key, value } => {
            prefs.set(&key, &value)?;
            prefs.save()?;
            let stored = prefs.get(&key).unwrap_or(value.as_str());
            Display::show_message(&format!("{key} = {stored}"));
        }
        ConfigAction::Unset { key } => {
            if !keys::ALL.contains(&key.as_str()) {
                return Err(PrefsError::UnknownKey(key).into());
            }
            if prefs.remove(&key).is_some() {
                prefs.save()?;
            }
            Display::show_message(&format!("{key} reset to default"));
        }
        ConfigAction::Reset => {
            prefs.reset();
            prefs.save()?;
            Display::show_message("preferences reset to defaults");
        }
        ConfigAction::Path => {
            println!("{}", prefs.path().display());
        }
    }
    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
