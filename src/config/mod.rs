//! Timer configuration.
//!
//! The timer core never reads configuration on its own; it receives a
//! [`ControllerSettings`] value (seconds, clamping ranges, session goal and
//! profile). This module owns the user-facing [`TimerConfig`] (minutes,
//! persisted through the [`Preferences`] key-value store) and the conversion
//! between the two.

mod error;
mod prefs;

pub use error::{ConfigError, PrefsError};
pub use prefs::{keys, Preferences};

use serde::{Deserialize, Serialize};

use crate::types::Profile;

/// Shortest interval any range may clamp to, in seconds.
pub const MIN_DURATION_SECONDS: f64 = 1.0;

fn default_work_minutes() -> u32 {
    25
}

fn default_break_minutes() -> u32 {
    5
}

fn default_work_range() -> MinuteRange {
    MinuteRange { min: 10, max: 120 }
}

fn default_break_range() -> MinuteRange {
    MinuteRange { min: 3, max: 60 }
}

fn default_step_minutes() -> u32 {
    5
}

fn default_session_goal() -> u32 {
    4
}

// ============================================================================
// DurationRange
// ============================================================================

/// Inclusive range, in seconds, that a duration input is clamped into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationRange {
    /// Lower bound in seconds
    pub min_seconds: f64,
    /// Upper bound in seconds
    pub max_seconds: f64,
}

impl DurationRange {
    /// Creates a range from second bounds.
    pub fn new(min_seconds: f64, max_seconds: f64) -> Self {
        Self {
            min_seconds,
            max_seconds,
        }
    }

    /// Creates a range from minute bounds.
    pub fn from_minutes(min: u32, max: u32) -> Self {
        Self::new(f64::from(min) * 60.0, f64::from(max) * 60.0)
    }

    /// Clamps `seconds` into the range.
    ///
    /// Never fails: the lower bound is floored at [`MIN_DURATION_SECONDS`],
    /// an inverted range collapses onto its lower bound and NaN maps to the
    /// lower bound.
    pub fn clamp(&self, seconds: f64) -> f64 {
        let min = self.min_seconds.max(MIN_DURATION_SECONDS);
        let max = self.max_seconds.max(min);

        if seconds.is_nan() {
            return min;
        }
        seconds.clamp(min, max)
    }
}

// ============================================================================
// ControllerSettings
// ============================================================================

/// Everything the timer controller needs at construction time.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerSettings {
    /// Initial work duration in seconds
    pub work_seconds: f64,
    /// Initial break duration in seconds
    pub break_seconds: f64,
    /// Range work durations are clamped into
    pub work_range: DurationRange,
    /// Range break durations are clamped into
    pub break_range: DurationRange,
    /// Completed sessions per round (the counter wraps at this value)
    pub session_goal: u32,
    /// Profile the initial mode is built from
    pub profile: Profile,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        TimerConfig::default().controller_settings()
    }
}

// ============================================================================
// TimerConfig
// ============================================================================

/// Inclusive minute range, as stored in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinuteRange {
    /// Lower bound in minutes
    pub min: u32,
    /// Upper bound in minutes
    pub max: u32,
}

/// User-facing timer configuration, in minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Base work duration in minutes (before the profile multiplier)
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u32,
    /// Base break duration in minutes (before the profile multiplier)
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u32,
    /// Allowed work durations
    #[serde(default = "default_work_range")]
    pub work_range_minutes: MinuteRange,
    /// Allowed break durations
    #[serde(default = "default_break_range")]
    pub break_range_minutes: MinuteRange,
    /// Increment used by duration edits
    #[serde(default = "default_step_minutes")]
    pub step_minutes: u32,
    /// Completed sessions per round
    #[serde(default = "default_session_goal")]
    pub session_goal: u32,
    /// Selected profile
    #[serde(default)]
    pub profile: Profile,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            break_minutes: default_break_minutes(),
            work_range_minutes: default_work_range(),
            break_range_minutes: default_break_range(),
            step_minutes: default_step_minutes(),
            session_goal: default_session_goal(),
            profile: Profile::default(),
        }
    }
}

impl TimerConfig {
    /// Sets the base work duration.
    pub fn with_work_minutes(mut self, minutes: u32) -> Self {
        self.work_minutes = minutes;
        self
    }

    /// Sets the base break duration.
    pub fn with_break_minutes(mut self, minutes: u32) -> Self {
        self.break_minutes = minutes;
        self
    }

    /// Sets the session goal.
    pub fn with_session_goal(mut self, goal: u32) -> Self {
        self.session_goal = goal;
        self
    }

    /// Sets the selected profile.
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, range) in [
            ("work", self.work_range_minutes),
            ("break", self.break_range_minutes),
        ] {
            if range.min == 0 {
                return Err(ConfigError::ZeroMinimum { name });
            }
            if range.min > range.max {
                return Err(ConfigError::EmptyRange {
                    name,
                    min: range.min,
                    max: range.max,
                });
            }
        }
        if self.session_goal == 0 {
            return Err(ConfigError::ZeroSessionGoal);
        }
        if self.step_minutes == 0 {
            return Err(ConfigError::ZeroStep);
        }
        Ok(())
    }

    /// Returns a copy with every validation problem repaired.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let repair = |range: MinuteRange| {
            let min = range.min.max(1);
            MinuteRange {
                min,
                max: range.max.max(min),
            }
        };

        Self {
            work_range_minutes: repair(self.work_range_minutes),
            break_range_minutes: repair(self.break_range_minutes),
            step_minutes: self.step_minutes.max(1),
            session_goal: self.session_goal.max(1),
            ..self.clone()
        }
    }

    /// Clamping range for work durations.
    pub fn work_range(&self) -> DurationRange {
        DurationRange::from_minutes(self.work_range_minutes.min, self.work_range_minutes.max)
    }

    /// Clamping range for break durations.
    pub fn break_range(&self) -> DurationRange {
        DurationRange::from_minutes(self.break_range_minutes.min, self.break_range_minutes.max)
    }

    /// Work and break durations, in seconds, for the given profile.
    ///
    /// Base minutes are scaled by the profile multiplier, then clamped.
    pub fn durations_for(&self, profile: Profile) -> (f64, f64) {
        let factor = f64::from(profile.multiplier());
        let work = f64::from(self.work_minutes) * factor * 60.0;
        let rest = f64::from(self.break_minutes) * factor * 60.0;
        (self.work_range().clamp(work), self.break_range().clamp(rest))
    }

    /// Step used by duration edits, in seconds.
    pub fn step_seconds(&self) -> f64 {
        f64::from(self.step_minutes.max(1)) * 60.0
    }

    /// Builds the settings handed to the timer controller.
    pub fn controller_settings(&self) -> ControllerSettings {
        let config = self.sanitized();
        let (work_seconds, break_seconds) = config.durations_for(config.profile);

        ControllerSettings {
            work_seconds,
            break_seconds,
            work_range: config.work_range(),
            break_range: config.break_range(),
            session_goal: config.session_goal,
            profile: config.profile,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
