use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Seconds between two passes of the reminder job. The tier windows are
    /// ten minutes wide, so anything well below that keeps bookings from
    /// slipping past a tier between passes.
    pub reminder_job_interval_secs: u64,
    /// Optional webhook that stored notifications are forwarded to as a
    /// push-delivery channel. Disabled when unset.
    pub push_webhook_url: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        let default_port = "5100";
        let port = std::env::var("PORT").unwrap_or(default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };

        let default_interval = 60;
        let reminder_job_interval_secs = match std::env::var("REMINDER_JOB_INTERVAL_SECS") {
            Ok(secs) => match secs.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    warn!(
                        "The given REMINDER_JOB_INTERVAL_SECS: {} is not valid, falling back to the default interval: {} seconds.",
                        secs, default_interval
                    );
                    default_interval
                }
            },
            Err(_) => default_interval,
        };

        let push_webhook_url = match std::env::var("PUSH_WEBHOOK_URL") {
            Ok(url) => Some(url),
            Err(_) => {
                info!("Did not find PUSH_WEBHOOK_URL environment variable. Notifications will be stored but not forwarded.");
                None
            }
        };

        Self {
            port,
            reminder_job_interval_secs,
            push_webhook_url,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
