//! Pomodoro Timer Library
//!
//! This library provides the core functionality for the Pomodoro Timer CLI.
//! It includes:
//! - Interval timers and the work/break mode state machine
//! - The timer controller with its injectable clock and notification sink
//! - Notification content and delivery
//! - Configuration defaults and the preferences store
//! - CLI command parsing, the interactive session and display utilities

pub mod cli;
pub mod config;
pub mod notification;
pub mod timer;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{Modality, Profile, Snapshot, TransitionEvent};

pub use config::{ControllerSettings, DurationRange, Preferences, TimerConfig};

pub use timer::{Clock, IntervalTimer, ManualClock, Mode, SystemClock, TimerController};

pub use notification::{
    ChannelNotificationSink, LogNotificationSink, MockNotificationSink, NotificationError,
    NotificationSink,
};
