//! Notification request creation.

use uuid::Uuid;

use super::content::NotificationContent;

/// A piece of content paired with a unique request identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub id: String,
    pub content: NotificationContent,
}

#[must_use]
pub fn create_notification_request(content: NotificationContent) -> NotificationRequest {
    create_notification_request_with_id(&Uuid::new_v4().to_string(), content)
}

#[must_use]
pub fn create_notification_request_with_id(
    identifier: &str,
    content: NotificationContent,
) -> NotificationRequest {
    NotificationRequest {
        id: identifier.to_string(),
        content,
    }
}
