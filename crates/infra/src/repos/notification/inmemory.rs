use super::INotificationRepo;
use crate::repos::shared::inmemory_repo::*;
use journeysync_notifier_domain::{Notification, ID};

pub struct InMemoryNotificationRepo {
    notifications: std::sync::Mutex<Vec<Notification>>,
}

impl InMemoryNotificationRepo {
    pub fn new() -> Self {
        Self {
            notifications: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl INotificationRepo for InMemoryNotificationRepo {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()> {
        insert(notification, &self.notifications);
        Ok(())
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Notification>> {
        let mut notifications = find_by(&self.notifications, |n: &Notification| {
            n.user_id == *user_id
        });
        notifications.sort_by_key(|n| std::cmp::Reverse(n.created_at));
        Ok(notifications)
    }

    async fn find_by_booking(&self, booking_id: &ID) -> anyhow::Result<Vec<Notification>> {
        Ok(find_by(&self.notifications, |n: &Notification| {
            n.booking_id == *booking_id
        }))
    }
}
