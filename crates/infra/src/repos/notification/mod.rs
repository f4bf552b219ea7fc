mod inmemory;
mod postgres;

pub use inmemory::InMemoryNotificationRepo;
use journeysync_notifier_domain::{Notification, ID};
pub use postgres::PostgresNotificationRepo;

#[async_trait::async_trait]
pub trait INotificationRepo: Send + Sync {
    /// Persists a notification. Notifications are immutable: there is no
    /// save or delete, only inserts and reads.
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()>;
    /// Notifications addressed to a user, newest first.
    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Notification>>;
    async fn find_by_booking(&self, booking_id: &ID) -> anyhow::Result<Vec<Notification>>;
}
