//! Configuration and preferences error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors found while validating a [`TimerConfig`](super::TimerConfig).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A duration range whose minimum exceeds its maximum.
    #[error("{name} range is empty: {min}..={max} minutes")]
    EmptyRange {
        /// Which range ("work" or "break")
        name: &'static str,
        /// Lower bound in minutes
        min: u32,
        /// Upper bound in minutes
        max: u32,
    },

    /// A duration range that allows zero-length intervals.
    #[error("{name} range must start above zero minutes")]
    ZeroMinimum {
        /// Which range ("work" or "break")
        name: &'static str,
    },

    /// The session goal must be at least one.
    #[error("session goal must be at least 1")]
    ZeroSessionGoal,

    /// The duration step must be at least one minute.
    #[error("duration step must be at least 1 minute")]
    ZeroStep,
}

/// Errors that can occur while reading or writing the preferences store.
#[derive(Debug, Error)]
pub enum PrefsError {
    /// Failed to read or write the preferences file.
    #[error("failed to access preferences at {path}: {source}")]
    Io {
        /// File that was accessed
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The preferences file is not a flat JSON object of strings.
    #[error("failed to parse preferences at {path}: {source}")]
    Parse {
        /// File that was parsed
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to serialize the preferences.
    #[error("failed to serialize preferences: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The key is not one of the known preference keys.
    #[error("unknown preference key: {0}")]
    UnknownKey(String),

    /// The value cannot be parsed for the given key.
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue {
        /// Preference key
        key: String,
        /// Rejected value
        value: String,
    },

    /// No per-user configuration directory could be determined.
    #[error("could not determine the user configuration directory")]
    NoConfigDir,
}
