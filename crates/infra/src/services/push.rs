use journeysync_notifier_domain::Notification;
use serde::Serialize;
use tracing::error;

/// Forwards stored notifications to the configured push-delivery webhook.
/// Delivery is best effort: a failed POST is logged and never retried, and
/// the stored notification remains the source of truth.
pub struct PushService {
    client: reqwest::Client,
    webhook_url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PushPayload<'a> {
    booking_id: String,
    user_id: String,
    audience: &'a str,
    tier: &'a str,
    title: &'a str,
    message: &'a str,
}

impl<'a> PushPayload<'a> {
    fn new(notification: &'a Notification) -> Self {
        Self {
            booking_id: notification.booking_id.as_string(),
            user_id: notification.user_id.as_string(),
            audience: notification.audience.as_str(),
            tier: notification.tier.as_str(),
            title: &notification.title,
            message: &notification.message,
        }
    }
}

impl PushService {
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url,
        }
    }

    pub async fn deliver(&self, notifications: &[Notification]) {
        let url = match &self.webhook_url {
            Some(url) => url,
            None => return,
        };

        for notification in notifications {
            if let Err(e) = self
                .client
                .post(url)
                .json(&PushPayload::new(notification))
                .send()
                .await
            {
                error!(
                    "Error forwarding notification {} to push webhook: {:?}",
                    notification.id, e
                );
            }
        }
    }
}
