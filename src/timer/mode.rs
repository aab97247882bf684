//! Work/break pair of interval timers.

use std::time::Instant;

use super::interval::IntervalTimer;
use crate::types::Modality;

/// Formats whole seconds as `MM:SS`, truncating fractions.
pub fn format_clock(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Formats whole minutes of `seconds` as `NN Min`.
pub fn format_minutes(seconds: f64) -> String {
    let minutes = seconds.max(0.0) as u64 / 60;
    format!("{:02} Min", minutes)
}

/// A named work/break pair with the modality that selects the active timer.
///
/// Only the started timer matches the modality: `Inactive` has neither
/// timer started, `Working` only the work timer, `Breaking` only the break
/// timer. [`Mode::transition`] is the only place that changes either.
#[derive(Debug, Clone, PartialEq)]
pub struct Mode {
    name: String,
    id: u32,
    work: IntervalTimer,
    rest: IntervalTimer,
    modality: Modality,
}

impl Mode {
    /// Creates an inactive mode with both timers stopped.
    pub fn new(name: impl Into<String>, id: u32, work_seconds: f64, break_seconds: f64) -> Self {
        Self {
            name: name.into(),
            id,
            work: IntervalTimer::new(work_seconds),
            rest: IntervalTimer::new(break_seconds),
            modality: Modality::Inactive,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn modality(&self) -> Modality {
        self.modality
    }

    pub fn work_timer(&self) -> &IntervalTimer {
        &self.work
    }

    pub fn break_timer(&self) -> &IntervalTimer {
        &self.rest
    }

    pub fn work_duration_seconds(&self) -> f64 {
        self.work.duration_seconds()
    }

    pub fn break_duration_seconds(&self) -> f64 {
        self.rest.duration_seconds()
    }

    /// Updates both durations in place; modality and origins are untouched.
    pub fn set_durations(&mut self, work_seconds: f64, break_seconds: f64) {
        self.work.set_duration_seconds(work_seconds);
        self.rest.set_duration_seconds(break_seconds);
    }

    /// Moves to `to`, starting and stopping sub-timers to match.
    ///
    /// Every ordered pair of modalities is allowed.
    pub fn transition(&mut self, to: Modality, now: Instant) {
        match to {
            Modality::Inactive => {
                self.work.stop();
                self.rest.stop();
            }
            Modality::Working => {
                self.rest.stop();
                self.work.start(now);
            }
            Modality::Breaking => {
                self.work.stop();
                self.rest.start(now);
            }
        }
        self.modality = to;
    }

    /// The timer selected by the modality, `None` while inactive.
    pub fn active_timer(&self) -> Option<&IntervalTimer> {
        match self.modality {
            Modality::Inactive => None,
            Modality::Working => Some(&self.work),
            Modality::Breaking => Some(&self.rest),
        }
    }

    /// Seconds left on the active timer, or the work duration while inactive.
    pub fn remaining(&self, now: Instant) -> f64 {
        match self.active_timer() {
            Some(timer) => timer.remaining(now),
            None => self.work.duration_seconds(),
        }
    }

    /// Remaining share of the active timer, 0 while inactive.
    pub fn remaining_fraction(&self, now: Instant) -> f64 {
        self.active_timer()
            .map(|timer| timer.remaining_fraction(now))
            .unwrap_or(0.0)
    }

    /// True while the active timer is counting down.
    pub fn is_running(&self, now: Instant) -> bool {
        self.active_timer()
            .is_some_and(|timer| timer.is_running(now))
    }

    /// `NN Min` label of the relevant duration.
    pub fn description(&self) -> String {
        match self.modality {
            Modality::Inactive | Modality::Working => format_minutes(self.work.duration_seconds()),
            Modality::Breaking => format_minutes(self.rest.duration_seconds()),
        }
    }

    /// `MM:SS` countdown label.
    pub fn clock_label(&self, now: Instant) -> String {
        format_clock(self.remaining(now))
    }
}
