use journeysync_notifier_domain::{Audience, Notification, ReminderTier, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDTO {
    pub id: ID,
    pub booking_id: ID,
    pub user_id: ID,
    pub audience: Audience,
    pub tier: ReminderTier,
    pub title: String,
    pub message: String,
    pub created_at: i64,
}

impl NotificationDTO {
    pub fn new(notification: Notification) -> Self {
        Self {
            id: notification.id,
            booking_id: notification.booking_id,
            user_id: notification.user_id,
            audience: notification.audience,
            tier: notification.tier,
            title: notification.title,
            message: notification.message,
            created_at: notification.created_at,
        }
    }
}
