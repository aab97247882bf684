//! Display utilities for the Pomodoro Timer CLI.
//!
//! This module provides formatted output for:
//! - The countdown status line and status block
//! - Transition messages
//! - Configuration listings
//! - Errors and help

use std::io::Write;
use std::path::Path;

use crate::config::TimerConfig;
use crate::types::{Modality, Profile, Snapshot, TransitionEvent};

/// Width of the progress bar in cells.
const PROGRESS_WIDTH: usize = 20;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Icon shown for a modality.
    pub fn modality_icon(modality: Modality) -> &'static str {
        match modality {
            Modality::Inactive => "⏸",
            Modality::Working => "🔨",
            Modality::Breaking => "☕",
        }
    }

    /// Renders a remaining fraction as a bar of `width` cells.
    pub fn progress_bar(fraction: f64, width: usize) -> String {
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let filled = (fraction * width as f64).round() as usize;
        format!(
            "[{}{}]",
            "█".repeat(filled),
            "░".repeat(width.saturating_sub(filled))
        )
    }

    /// Share of the bar to fill: full while idle, the remaining share otherwise.
    fn bar_fraction(snapshot: &Snapshot) -> f64 {
        if snapshot.modality.is_active() {
            snapshot.remaining_fraction
        } else {
            1.0
        }
    }

    /// One-line rendering of a snapshot.
    pub fn render_snapshot(snapshot: &Snapshot) -> String {
        format!(
            "{} {:<8} {} {}  {}  {} ({}/{})",
            Self::modality_icon(snapshot.modality),
            snapshot.modality.as_str(),
            Self::progress_bar(Self::bar_fraction(snapshot), PROGRESS_WIDTH),
            snapshot.clock_label,
            snapshot.description,
            snapshot.mode_name,
            snapshot.completed_sessions,
            snapshot.session_goal,
        )
    }

    /// Repaints the status line in place.
    pub fn show_status_line(snapshot: &Snapshot) {
        if let Err(e) = Self::write_status_line(&mut std::io::stdout().lock(), snapshot) {
            tracing::debug!("failed to repaint status line: {}", e);
        }
    }

    /// Writes the clear-line sequence and the snapshot line to `out`.
    fn write_status_line(out: &mut impl Write, snapshot: &Snapshot) -> std::io::Result<()> {
        write!(out, "\r\x1b[2K{}", Self::render_snapshot(snapshot))?;
        out.flush()
    }

    /// Multi-line status block for the `status` command.
    pub fn render_status(snapshot: &Snapshot) -> String {
        [
            format!("Mode:     {} (#{})", snapshot.mode_name, snapshot.mode_id),
            format!(
                "State:    {} {}",
                Self::modality_icon(snapshot.modality),
                snapshot.modality
            ),
            format!("Clock:    {}", snapshot.clock_label),
            format!("Duration: {}", snapshot.description),
            format!(
                "Progress: {}",
                Self::progress_bar(Self::bar_fraction(snapshot), PROGRESS_WIDTH)
            ),
            format!(
                "Sessions: {}/{}",
                snapshot.completed_sessions, snapshot.session_goal
            ),
        ]
        .join("\n")
    }

    /// Message for a natural transition.
    pub fn transition_message(event: &TransitionEvent) -> String {
        if event.is_work_complete() {
            format!("{} finished, break time", event.mode_name)
        } else if event.is_break_complete() {
            "Break finished, back to work".to_string()
        } else {
            format!("{} -> {}", event.from, event.to)
        }
    }

    /// Shows the start-of-session banner.
    pub fn show_welcome(snapshot: &Snapshot) {
        println!("* {} ready: {}", snapshot.mode_name, snapshot.description);
        println!("  Press Enter to start/stop, `help` for commands.");
    }

    /// Shows the list of interactive commands.
    pub fn show_help() {
        println!("Commands:");
        println!("  <Enter> | toggle      start when idle, stop otherwise");
        println!("  start   | s           start, or skip to the break while working");
        println!("  stop    | x           stop the timer");
        println!("  work  + | work  -     lengthen / shorten the work interval");
        println!("  break + | break -     lengthen / shorten the break interval");
        println!("  profile <name>        switch profile (pomodoro, double)");
        println!("  status                show the current status");
        println!("  quit    | q           leave");
    }

    /// Renders the configuration as `key = value` lines.
    pub fn render_config(config: &TimerConfig) -> String {
        let (work, rest) = config.durations_for(config.profile);
        let profiles: Vec<&str> = Profile::ALL.iter().map(Profile::slug).collect();

        [
            format!("work_minutes  = {}", config.work_minutes),
            format!("break_minutes = {}", config.break_minutes),
            format!("step_minutes  = {}", config.step_minutes),
            format!("session_goal  = {}", config.session_goal),
            format!(
                "profile       = {} ({})",
                config.profile.slug(),
                profiles.join(", ")
            ),
            format!(
                "effective     = {} work / {} break",
                crate::timer::format_minutes(work),
                crate::timer::format_minutes(rest)
            ),
            format!(
                "ranges        = work {}-{} min, break {}-{} min",
                config.work_range_minutes.min,
                config.work_range_minutes.max,
                config.break_range_minutes.min,
                config.break_range_minutes.max
            ),
        ]
        .join("\n")
    }

    /// Shows the configuration and where it is stored.
    pub fn show_config(config: &TimerConfig, path: &Path) {
        println!("# {}", path.display());
        println!("{}", Self::render_config(config));
    }

    /// Shows a plain message on its own line.
    pub fn show_message(message: &str) {
        println!("{message}");
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("error: {message}");
    }
}

// ============================================================================
// Tests
// ============================================================================
