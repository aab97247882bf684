//! Notification content construction.
//!
//! This module provides a builder for notification content and the texts
//! used for the two natural transitions.

use serde::{Deserialize, Serialize};

use crate::types::TransitionEvent;

/// Maximum length for mode names in notifications.
const MAX_MODE_NAME_LENGTH: usize = 100;

/// Title and subtitle shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationContent {
    pub title: String,
    pub subtitle: String,
    /// Whether the default alert sound should play
    pub sound: bool,
}

/// Builder for constructing notification content.
#[derive(Debug, Default)]
pub struct NotificationContentBuilder {
    title: String,
    subtitle: String,
    sound: bool,
}

impl NotificationContentBuilder {
    /// Creates a new notification content builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the notification title.
    #[must_use]
    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Sets the notification subtitle.
    #[must_use]
    pub fn subtitle(mut self, subtitle: &str) -> Self {
        self.subtitle = subtitle.to_string();
        self
    }

    /// Requests the default alert sound.
    #[must_use]
    pub fn default_sound(mut self) -> Self {
        self.sound = true;
        self
    }

    /// Builds and returns the notification content.
    #[must_use]
    pub fn build(self) -> NotificationContent {
        NotificationContent {
            title: self.title,
            subtitle: self.subtitle,
            sound: self.sound,
        }
    }
}

/// Sanitizes a mode name for display.
///
/// Returns None if nothing printable is left.
pub fn sanitize_mode_name(mode_name: &str) -> Option<String> {
    let sanitized: String = mode_name
        .chars()
        .filter(|c| !c.is_control())
        .take(MAX_MODE_NAME_LENGTH)
        .collect();

    if sanitized.trim().is_empty() {
        None
    } else {
        Some(sanitized)
    }
}

/// Creates notification content for a completed work interval.
#[must_use]
pub fn create_work_complete_content(mode_name: &str) -> NotificationContent {
    let name = sanitize_mode_name(mode_name).unwrap_or_else(|| "session".to_string());

    NotificationContentBuilder::new()
        .title("Time to take a break!")
        .subtitle(&format!(
            "The {name} has been completed, enjoy your break time"
        ))
        .default_sound()
        .build()
}

/// Creates notification content for a completed break.
#[must_use]
pub fn create_break_complete_content() -> NotificationContent {
    NotificationContentBuilder::new()
        .title("The break time has ended!")
        .subtitle("Your break time is over, get back to work")
        .default_sound()
        .build()
}

/// Content for a transition event, or None for transitions that are not
/// announced.
#[must_use]
pub fn content_for_event(event: &TransitionEvent) -> Option<NotificationContent> {
    if event.is_work_complete() {
        Some(create_work_complete_content(&event.mode_name))
    } else if event.is_break_complete() {
        Some(create_break_complete_content())
    } else {
        None
    }
}
