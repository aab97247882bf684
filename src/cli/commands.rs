//! Command definitions for the Pomodoro Timer CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::TimerConfig;
use crate::types::Profile;

use super::session::DEFAULT_TICK_MS;

// ============================================================================
// CLI Structure
// ============================================================================

/// Pomodoro timer with single and double work/break profiles
#[derive(Parser, Debug)]
#[command(
    name = "pomodoro",
    version,
    about = "Work/break Pomodoro timer for the terminal",
    long_about = "A terminal Pomodoro timer.\n\
                  Alternates work and break intervals, notifies when each one ends, \
                  and keeps its durations in a small preferences file.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Preferences file to use instead of the default location
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run an interactive timer session
    Run(RunArgs),

    /// Show or edit stored preferences
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Preference actions
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Store one preference
    Set {
        /// Preference key (work_minutes, break_minutes, step_minutes, session_goal, profile)
        key: String,
        /// New value
        value: String,
    },

    /// Remove one stored preference
    Unset {
        /// Preference key
        key: String,
    },

    /// Remove every stored preference
    Reset,

    /// Print the preferences file location
    Path,
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command.
///
/// Every duration option overrides the stored preference for this session
/// only.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct RunArgs {
    /// Base work duration in minutes
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub work: Option<u32>,

    /// Base break duration in minutes
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub break_time: Option<u32>,

    /// Profile to start with (pomodoro, double)
    #[arg(short, long, value_parser = parse_profile)]
    pub profile: Option<Profile>,

    /// Completed work intervals per round
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub session_goal: Option<u32>,

    /// Poll cadence of the display loop in milliseconds
    #[arg(
        long,
        default_value_t = DEFAULT_TICK_MS,
        value_parser = clap::value_parser!(u64).range(10..=10_000)
    )]
    pub tick_ms: u64,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            work: None,
            break_time: None,
            profile: None,
            session_goal: None,
            tick_ms: DEFAULT_TICK_MS,
        }
    }
}

impl RunArgs {
    /// Layers the command-line overrides over `config`.
    pub fn apply_to(&self, mut config: TimerConfig) -> TimerConfig {
        if let Some(work) = self.work {
            config = config.with_work_minutes(work);
        }
        if let Some(break_time) = self.break_time {
            config = config.with_break_minutes(break_time);
        }
        if let Some(profile) = self.profile {
            config = config.with_profile(profile);
        }
        if let Some(goal) = self.session_goal {
            config = config.with_session_goal(goal);
        }
        config
    }
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Parses a profile name.
fn parse_profile(s: &str) -> Result<Profile, String> {
    Profile::from_name(s).ok_or_else(|| {
        let known: Vec<&str> = Profile::ALL.iter().map(Profile::slug).collect();
        format!("unknown profile {s:?} (expected one of: {})", known.join(", "))
    })
}

// ============================================================================
// Tests
// ============================================================================
