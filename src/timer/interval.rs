//! Single countdown against a clock.

use std::time::Instant;

/// A countdown of `duration_seconds` measured from an absolute start instant.
///
/// The timer holds no live state besides its origin; every query takes the
/// current instant and recomputes from it, so missed polls never drift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalTimer {
    duration_seconds: f64,
    started_at: Option<Instant>,
}

impl IntervalTimer {
    /// Creates a stopped timer.
    pub fn new(duration_seconds: f64) -> Self {
        Self {
            duration_seconds,
            started_at: None,
        }
    }

    /// Configured duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }

    /// Replaces the duration without touching the running origin.
    pub fn set_duration_seconds(&mut self, seconds: f64) {
        self.duration_seconds = seconds;
    }

    /// Instant the countdown started at, if started.
    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    /// Starts counting from `now` unless already running.
    pub fn start(&mut self, now: Instant) {
        if !self.is_running(now) {
            self.started_at = Some(now);
        }
    }

    /// Clears the running origin.
    pub fn stop(&mut self) {
        self.started_at = None;
    }

    /// Seconds elapsed since the origin, 0 when stopped.
    pub fn elapsed(&self, now: Instant) -> f64 {
        self.started_at
            .map(|start| now.saturating_duration_since(start).as_secs_f64())
            .unwrap_or(0.0)
    }

    /// Seconds left, never negative.
    pub fn remaining(&self, now: Instant) -> f64 {
        (self.duration_seconds - self.elapsed(now)).max(0.0)
    }

    /// Remaining share of the duration, in `[0, 1]`.
    pub fn remaining_fraction(&self, now: Instant) -> f64 {
        let remaining = self.remaining(now);
        if self.duration_seconds > 0.0 && remaining > 0.0 {
            (remaining / self.duration_seconds).min(1.0)
        } else {
            0.0
        }
    }

    /// True while started and not yet expired.
    pub fn is_running(&self, now: Instant) -> bool {
        self.started_at.is_some() && self.remaining(now) > 0.0
    }

    /// True once started and fully elapsed.
    pub fn has_expired(&self, now: Instant) -> bool {
        self.started_at.is_some() && self.remaining(now) == 0.0
    }
}
