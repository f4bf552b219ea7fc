use crate::reminder::ReminderTier;
use crate::reminder_content::NotificationContent;
use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// Which party of the booking a notification addresses. Passenger texts
/// carry driver and vehicle details; driver texts carry passenger and
/// pickup details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    Passenger,
    Driver,
}

impl Audience {
    pub fn as_str(&self) -> &'static str {
        match self {
            Audience::Passenger => "passenger",
            Audience::Driver => "driver",
        }
    }
}

impl std::str::FromStr for Audience {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "passenger" => Ok(Audience::Passenger),
            "driver" => Ok(Audience::Driver),
            _ => Err(format!("Invalid audience: {}", s)),
        }
    }
}

/// A reminder as handed to the notification sink. Immutable once created:
/// the sink only ever inserts and reads these, never updates.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: ID,
    pub booking_id: ID,
    pub user_id: ID,
    pub audience: Audience,
    pub tier: ReminderTier,
    pub title: String,
    pub message: String,
    pub created_at: i64,
}

impl Notification {
    pub fn new(
        booking_id: ID,
        user_id: ID,
        audience: Audience,
        tier: ReminderTier,
        content: NotificationContent,
        created_at: i64,
    ) -> Self {
        Self {
            id: Default::default(),
            booking_id,
            user_id,
            audience,
            tier,
            title: content.title,
            message: content.message,
            created_at,
        }
    }
}

impl Entity<ID> for Notification {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
