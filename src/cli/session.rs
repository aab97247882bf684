//! Interactive terminal session.
//!
//! The session is the presentation layer: it polls the controller on a
//! fixed cadence, repaints the countdown, and turns typed line commands
//! into controller intents. Stdin is read on a plain thread and handed over
//! through a crossbeam channel so the poll loop never blocks on input.

use std::io::{BufRead, IsTerminal};
use std::thread;

use anyhow::Result;
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::config::TimerConfig;
use crate::timer::TimerController;
use crate::types::{Profile, TransitionEvent};

use super::display::Display;
use super::input::{parse_input, InputCommand};

/// Default poll cadence in milliseconds.
pub const DEFAULT_TICK_MS: u64 = 500;

/// Result of handling one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Keep running, optionally printing a message
    Continue(Option<String>),
    /// Leave the session
    Quit,
}

// ============================================================================
// Session
// ============================================================================

/// Controller plus the configuration used to derive new durations.
pub struct Session {
    controller: TimerController,
    config: TimerConfig,
}

impl Session {
    pub fn new(controller: TimerController, config: TimerConfig) -> Self {
        Self { controller, config }
    }

    pub fn controller(&self) -> &TimerController {
        &self.controller
    }

    /// Polls the controller for natural expiry.
    pub fn poll(&mut self) -> Option<TransitionEvent> {
        self.controller.tick()
    }

    /// Applies one typed command.
    pub fn handle(&mut self, command: InputCommand) -> Outcome {
        tracing::debug!(%command, "handling command");

        match command {
            InputCommand::Toggle => {
                if self.controller.modality().is_active() {
                    self.controller.stop();
                } else {
                    self.controller.start();
                }
                Outcome::Continue(None)
            }
            InputCommand::Start => {
                self.controller.start();
                Outcome::Continue(None)
            }
            InputCommand::Stop => {
                self.controller.stop();
                Outcome::Continue(None)
            }
            InputCommand::AdjustWork(step) => self.adjust(step.sign(), 0.0),
            InputCommand::AdjustBreak(step) => self.adjust(0.0, step.sign()),
            InputCommand::Profile(name) => self.switch_profile(&name),
            InputCommand::Status => {
                Outcome::Continue(Some(Display::render_status(&self.controller.snapshot())))
            }
            InputCommand::Help => {
                Display::show_help();
                Outcome::Continue(None)
            }
            InputCommand::Quit => Outcome::Quit,
        }
    }

    /// Edits durations by one configured step.
    ///
    /// While a timer is active the running state is preserved; otherwise
    /// the mode is rebuilt inactive.
    fn adjust(&mut self, work_sign: f64, break_sign: f64) -> Outcome {
        let step = self.config.step_seconds();
        let mode = self.controller.mode();
        let work = mode.work_duration_seconds() + work_sign * step;
        let rest = mode.break_duration_seconds() + break_sign * step;
        let preserve = self.controller.modality().is_active();

        self.controller.set_durations(work, rest, preserve);

        let mode = self.controller.mode();
        Outcome::Continue(Some(format!(
            "work {} / break {}",
            crate::timer::format_minutes(mode.work_duration_seconds()),
            crate::timer::format_minutes(mode.break_duration_seconds())
        )))
    }

    fn switch_profile(&mut self, name: &str) -> Outcome {
        if self.controller.modality().is_active() {
            return Outcome::Continue(Some(
                "stop the timer before switching profile".to_string(),
            ));
        }

        let (profile, (work, rest), message) = match Profile::from_name(name) {
            Some(profile) => (
                profile,
                self.config.durations_for(profile),
                format!("switched to {}", profile.name()),
            ),
            None => {
                let profile = Profile::default();
                tracing::warn!(name, "unknown profile, falling back to defaults");
                (
                    profile,
                    TimerConfig::default().durations_for(profile),
                    format!("unknown profile {name:?}, using {} defaults", profile.name()),
                )
            }
        };

        self.controller.switch_profile(profile, work, rest);
        Outcome::Continue(Some(message))
    }
}

// ============================================================================
// Event loop
// ============================================================================

/// Spawns the stdin reader thread.
///
/// The channel disconnects when stdin reaches end of file.
pub fn spawn_input_reader() -> Receiver<String> {
    let (tx, rx) = crossbeam_channel::unbounded();
    thread::spawn(move || read_lines(std::io::stdin().lock(), &tx));
    rx
}

fn read_lines(reader: impl BufRead, tx: &Sender<String>) {
    for line in reader.lines() {
        match line {
            Ok(line) => {
                if tx.send(line).is_err() {
                    break;
                }
            }
            Err(e) => {
                tracing::warn!("failed to read stdin: {}", e);
                break;
            }
        }
    }
}

/// Drains pending input lines into the session.
///
/// Returns false once the session should end (quit typed or input closed).
pub fn drain_input(session: &mut Session, input: &Receiver<String>) -> bool {
    loop {
        let line = match input.try_recv() {
            Ok(line) => line,
            Err(TryRecvError::Empty) => return true,
            Err(TryRecvError::Disconnected) => {
                tracing::debug!("input closed, ending session");
                return false;
            }
        };

        match parse_input(&line) {
            Ok(command) => match session.handle(command) {
                Outcome::Continue(Some(message)) => Display::show_message(&message),
                Outcome::Continue(None) => {}
                Outcome::Quit => return false,
            },
            Err(e) => Display::show_error(&e.to_string()),
        }
    }
}

/// Runs the interactive loop until quit, end of input, or Ctrl-C.
///
/// # Errors
///
/// Returns an error if the Ctrl-C handler cannot be installed.
pub async fn run_session(mut session: Session, input: Receiver<String>, tick: Duration) -> Result<()> {
    let mut ticker = interval(tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let live = std::io::stdout().is_terminal();
    Display::show_welcome(&session.controller().snapshot());

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            result = &mut ctrl_c => {
                result?;
                tracing::info!("interrupted");
                break;
            }
        }

        if !drain_input(&mut session, &input) {
            break;
        }

        if let Some(event) = session.poll() {
            if live {
                println!();
            }
            Display::show_message(&Display::transition_message(&event));
        }

        if live {
            Display::show_status_line(&session.controller().snapshot());
        }
    }

    if live {
        println!();
    }
    Ok(())
}
