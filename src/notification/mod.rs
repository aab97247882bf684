//! Transition notifications.
//!
//! The timer core reports natural transitions to a [`NotificationSink`] and
//! never looks at the outcome. This module provides:
//!
//! - The sink trait and its implementations (log, channel, mock)
//! - Notification content for the two announced transitions
//! - An async delivery loop that drains a channel sink
//!
//! # Example
//!
//! ```rust,no_run
//! use pomodoro_modes::notification::{run_delivery, ChannelNotificationSink, TerminalDelivery};
//!
//! # async fn demo() {
//! let (sink, rx) = ChannelNotificationSink::channel();
//! tokio::spawn(run_delivery(rx, TerminalDelivery));
//! // hand `sink` to the TimerController
//! # drop(sink);
//! # }
//! ```

mod content;
pub mod error;
mod request;

use std::io::Write;
use std::sync::Mutex;

use tokio::sync::mpsc;

pub use self::content::{
    content_for_event, create_break_complete_content, create_work_complete_content,
    sanitize_mode_name, NotificationContent, NotificationContentBuilder,
};
pub use self::error::NotificationError;
pub use self::request::{
    create_notification_request, create_notification_request_with_id, NotificationRequest,
};

use crate::types::TransitionEvent;

// ============================================================================
// NotificationSink
// ============================================================================

/// Receiver of natural modality transitions.
///
/// Implementations must not block and must swallow their own failures.
pub trait NotificationSink: Send + Sync {
    /// Handles one transition event.
    fn notify(&self, event: &TransitionEvent);
}

/// Sink that only writes the notification to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotificationSink;

impl NotificationSink for LogNotificationSink {
    fn notify(&self, event: &TransitionEvent) {
        match content_for_event(event) {
            Some(content) => tracing::info!(
                title = %content.title,
                subtitle = %content.subtitle,
                "notification"
            ),
            None => tracing::debug!(from = %event.from, to = %event.to, "transition not announced"),
        }
    }
}

/// Sink that forwards notification requests to an async delivery task.
#[derive(Debug, Clone)]
pub struct ChannelNotificationSink {
    tx: mpsc::UnboundedSender<NotificationRequest>,
}

impl ChannelNotificationSink {
    /// Wraps an existing sender.
    pub fn new(tx: mpsc::UnboundedSender<NotificationRequest>) -> Self {
        Self { tx }
    }

    /// Creates a sink together with the receiver to drain.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<NotificationRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    /// Builds a request for `event` and queues it.
    ///
    /// Transitions without content are accepted and dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the receiving side is gone.
    pub fn try_send(&self, event: &TransitionEvent) -> Result<(), NotificationError> {
        let Some(content) = content_for_event(event) else {
            return Ok(());
        };

        self.tx
            .send(create_notification_request(content))
            .map_err(|_| NotificationError::ChannelClosed)
    }
}

impl NotificationSink for ChannelNotificationSink {
    fn notify(&self, event: &TransitionEvent) {
        if let Err(e) = self.try_send(event) {
            tracing::warn!("dropping notification: {}", e);
        }
    }
}

// ============================================================================
// Delivery
// ============================================================================

/// Backend that presents notification requests to the user.
pub trait NotificationDelivery: Send {
    /// Presents one request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request could not be shown.
    fn deliver(&mut self, request: &NotificationRequest) -> Result<(), NotificationError>;
}

/// Delivery that prints to the terminal, ringing the bell for sound.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalDelivery;

impl NotificationDelivery for TerminalDelivery {
    fn deliver(&mut self, request: &NotificationRequest) -> Result<(), NotificationError> {
        let content = &request.content;
        let bell = if content.sound { "\x07" } else { "" };

        let mut out = std::io::stdout().lock();
        writeln!(out, "{bell}\n🔔 {}\n   {}", content.title, content.subtitle)
            .and_then(|()| out.flush())
            .map_err(delivery_error)
    }
}

/// Maps a terminal write failure; a closed pipe ends delivery for good.
fn delivery_error(e: std::io::Error) -> NotificationError {
    match e.kind() {
        std::io::ErrorKind::BrokenPipe => NotificationError::OutputClosed,
        _ => NotificationError::DeliveryFailed(e.to_string()),
    }
}

/// Drains `rx` into `delivery` until every sender is dropped.
///
/// Failures are logged and skipped; nothing is retried. A permanent failure
/// stops the loop and later requests are dropped. Returns the number of
/// requests delivered.
pub async fn run_delivery<D: NotificationDelivery>(
    mut rx: mpsc::UnboundedReceiver<NotificationRequest>,
    mut delivery: D,
) -> usize {
    let mut delivered = 0;

    while let Some(request) = rx.recv().await {
        match delivery.deliver(&request) {
            Ok(()) => {
                delivered += 1;
                tracing::debug!(id = %request.id, "notification delivered");
            }
            Err(e) if e.is_permanent() => {
                tracing::warn!(
                    id = %request.id,
                    "stopping notification delivery: {} ({})",
                    e,
                    e.suggestion()
                );
                break;
            }
            Err(e) => {
                tracing::warn!(
                    id = %request.id,
                    "notification delivery failed: {} ({})",
                    e,
                    e.suggestion()
                );
            }
        }
    }

    delivered
}

// ============================================================================
// MockNotificationSink
// ============================================================================

/// Sink that records every event, for tests.
#[derive(Debug, Default)]
pub struct MockNotificationSink {
    events: Mutex<Vec<TransitionEvent>>,
}

impl MockNotificationSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get_events(&self) -> Vec<TransitionEvent> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    #[must_use]
    pub fn notification_count(&self) -> usize {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl NotificationSink for MockNotificationSink {
    fn notify(&self, event: &TransitionEvent) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event.clone());
    }
}

// ============================================================================
// Tests
// ============================================================================
