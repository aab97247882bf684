//! Core data types for the Pomodoro Timer.
//!
//! This module defines the data structures shared between the timer core
//! and its collaborators:
//! - Modality of the active mode (inactive / working / breaking)
//! - Duration profiles (single and double Pomodoro)
//! - Transition events handed to notification sinks
//! - Read-only snapshots polled by the presentation layer

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Modality
// ============================================================================

/// Which sub-timer of a mode is currently consuming time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    /// No timer is running
    Inactive,
    /// The work timer is running
    Working,
    /// The break timer is running
    Breaking,
}

impl Modality {
    /// All modalities, in declaration order.
    pub const ALL: [Modality; 3] = [Modality::Inactive, Modality::Working, Modality::Breaking];

    /// Returns the string representation of the modality.
    pub fn as_str(&self) -> &'static str {
        match self {
            Modality::Inactive => "inactive",
            Modality::Working => "working",
            Modality::Breaking => "breaking",
        }
    }

    /// Returns true if one of the sub-timers is consuming time.
    pub fn is_active(&self) -> bool {
        !matches!(self, Modality::Inactive)
    }
}

impl Default for Modality {
    fn default() -> Self {
        Modality::Inactive
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Profile
// ============================================================================

/// Duration profile selected by the user.
///
/// Each profile carries the identity given to the mode it creates and a
/// multiplier applied to the configured base durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// Classic single Pomodoro
    Pomodoro,
    /// Both intervals doubled
    DoublePomodoro,
}

impl Profile {
    /// Every selectable profile, in palette order.
    pub const ALL: [Profile; 2] = [Profile::Pomodoro, Profile::DoublePomodoro];

    /// Human readable name, used as the mode name.
    pub fn name(&self) -> &'static str {
        match self {
            Profile::Pomodoro => "Pomodoro",
            Profile::DoublePomodoro => "Double Pomodoro",
        }
    }

    /// Numeric identity of the mode built from this profile.
    pub fn id(&self) -> u32 {
        match self {
            Profile::Pomodoro => 1,
            Profile::DoublePomodoro => 2,
        }
    }

    /// Short slug used on the command line and in the preferences store.
    pub fn slug(&self) -> &'static str {
        match self {
            Profile::Pomodoro => "pomodoro",
            Profile::DoublePomodoro => "double",
        }
    }

    /// Factor applied to the configured base durations.
    pub fn multiplier(&self) -> u32 {
        match self {
            Profile::Pomodoro => 1,
            Profile::DoublePomodoro => 2,
        }
    }

    /// Looks a profile up by display name or slug, ignoring case.
    pub fn from_name(name: &str) -> Option<Profile> {
        let normalized: String = name
            .trim()
            .chars()
            .map(|c| if c == '-' || c == '_' { ' ' } else { c })
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "pomodoro" | "single" => Some(Profile::Pomodoro),
            "double pomodoro" | "double" => Some(Profile::DoublePomodoro),
            _ => None,
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Profile::Pomodoro
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// TransitionEvent
// ============================================================================

/// A natural (expiry driven) modality change, handed to notification sinks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionEvent {
    /// Modality before the transition
    pub from: Modality,
    /// Modality after the transition
    pub to: Modality,
    /// Name of the mode that transitioned
    #[serde(rename = "modeName")]
    pub mode_name: String,
}

impl TransitionEvent {
    /// Creates a new transition event.
    pub fn new(from: Modality, to: Modality, mode_name: impl Into<String>) -> Self {
        Self {
            from,
            to,
            mode_name: mode_name.into(),
        }
    }

    /// Returns true if this event marks the end of a work interval.
    pub fn is_work_complete(&self) -> bool {
        self.from == Modality::Working && self.to == Modality::Breaking
    }

    /// Returns true if this event marks the end of a break interval.
    pub fn is_break_complete(&self) -> bool {
        self.from == Modality::Breaking && self.to == Modality::Working
    }
}

// ============================================================================
// Snapshot
// ============================================================================

/// Read-only view of the controller, polled by the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Current modality
    pub modality: Modality,
    /// "MM:SS" countdown label
    #[serde(rename = "clockLabel")]
    pub clock_label: String,
    /// "NN Min" label of the relevant duration
    pub description: String,
    /// Remaining share of the active interval, in `[0, 1]`
    #[serde(rename = "remainingFraction")]
    pub remaining_fraction: f64,
    /// Whether the active sub-timer is counting down
    #[serde(rename = "isRunning")]
    pub is_running: bool,
    /// Name of the current mode
    #[serde(rename = "modeName")]
    pub mode_name: String,
    /// Identity of the current mode
    #[serde(rename = "modeId")]
    pub mode_id: u32,
    /// Completed work sessions in the current round
    #[serde(rename = "completedSessions")]
    pub completed_sessions: u32,
    /// Sessions per round
    #[serde(rename = "sessionGoal")]
    pub session_goal: u32,
}

// ============================================================================
// Tests
// ============================================================================
