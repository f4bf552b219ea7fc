use crate::dtos::NotificationDTO;
use journeysync_notifier_domain::{Notification, ID};
use serde::{Deserialize, Serialize};

pub mod process_reminders {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub success: bool,
        pub message: String,
        pub bookings_checked: usize,
        pub notifications: Vec<NotificationDTO>,
    }

    impl APIResponse {
        pub fn new(bookings_checked: usize, notifications: Vec<Notification>) -> Self {
            Self {
                success: true,
                message: "Notifications processed successfully".into(),
                bookings_checked,
                notifications: notifications
                    .into_iter()
                    .map(NotificationDTO::new)
                    .collect(),
            }
        }
    }
}

pub mod get_user_notifications {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub notifications: Vec<NotificationDTO>,
    }

    impl APIResponse {
        pub fn new(notifications: Vec<Notification>) -> Self {
            Self {
                notifications: notifications
                    .into_iter()
                    .map(NotificationDTO::new)
                    .collect(),
            }
        }
    }
}
