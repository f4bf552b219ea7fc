use super::INotificationRepo;
use journeysync_notifier_domain::{Audience, Notification, ReminderTier, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::TryFrom;

pub struct PostgresNotificationRepo {
    pool: PgPool,
}

impl PostgresNotificationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NotificationRaw {
    notification_uid: Uuid,
    booking_uid: Uuid,
    user_uid: Uuid,
    audience: String,
    tier: String,
    title: String,
    message: String,
    created_at: i64,
}

impl TryFrom<NotificationRaw> for Notification {
    type Error = anyhow::Error;

    fn try_from(raw: NotificationRaw) -> Result<Self, Self::Error> {
        Ok(Notification {
            id: raw.notification_uid.into(),
            booking_id: raw.booking_uid.into(),
            user_id: raw.user_uid.into(),
            audience: raw.audience.parse::<Audience>().map_err(anyhow::Error::msg)?,
            tier: raw.tier.parse::<ReminderTier>().map_err(anyhow::Error::msg)?,
            title: raw.title,
            message: raw.message,
            created_at: raw.created_at,
        })
    }
}

#[async_trait::async_trait]
impl INotificationRepo for PostgresNotificationRepo {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO notifications
            (notification_uid, booking_uid, user_uid, audience, tier, title, message, created_at)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(notification.id.inner_ref())
        .bind(notification.booking_id.inner_ref())
        .bind(notification.user_id.inner_ref())
        .bind(notification.audience.as_str())
        .bind(notification.tier.as_str())
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(notification.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Notification>> {
        let rows: Vec<NotificationRaw> = sqlx::query_as(
            r#"
            SELECT * FROM notifications AS n
            WHERE n.user_uid = $1
            ORDER BY n.created_at DESC
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Notification::try_from).collect()
    }

    async fn find_by_booking(&self, booking_id: &ID) -> anyhow::Result<Vec<Notification>> {
        let rows: Vec<NotificationRaw> = sqlx::query_as(
            r#"
            SELECT * FROM notifications AS n
            WHERE n.booking_uid = $1
            "#,
        )
        .bind(booking_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Notification::try_from).collect()
    }
}
