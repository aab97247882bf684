//! Notification delivery error types.
//!
//! These errors never reach the timer core: sinks log and drop them.

use thiserror::Error;

/// Errors that can occur while delivering notifications.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The delivery task is gone.
    #[error("notification channel is closed")]
    ChannelClosed,

    /// Failed to present a notification.
    #[error("failed to deliver notification: {0}")]
    DeliveryFailed(String),

    /// The output the notifications are written to has gone away.
    #[error("notification output is closed")]
    OutputClosed,
}

impl NotificationError {
    /// Returns true if later notifications cannot succeed either.
    #[must_use]
    pub fn is_permanent(&self) -> bool {
        matches!(self, Self::ChannelClosed | Self::OutputClosed)
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::ChannelClosed => "restart the timer session",
            Self::DeliveryFailed(_) => "check that the terminal is still attached",
            Self::OutputClosed => "run the timer attached to a terminal",
        }
    }
}
