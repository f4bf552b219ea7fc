use crate::notification::process_reminders::ProcessDueRemindersUseCase;
use crate::shared::usecase::execute;
use actix_web::rt::time::{interval, sleep_until, Instant};
use journeysync_notifier_infra::{NotifierContext, PushService};
use std::time::Duration;
use tracing::info;

/// Seconds until the next run should start so that runs line up
/// `secs_before_min` seconds before a minute boundary.
pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

/// Spawns the recurring reminder pass. The loop aligns itself to the next
/// minute boundary, then re-runs every `reminder_job_interval_secs`. Pass
/// failures are already logged by the use case executor; the loop just
/// keeps going.
pub fn start_reminder_job(ctx: NotifierContext) {
    actix_web::rt::spawn(async move {
        let push = PushService::new(ctx.config.push_webhook_url.clone());

        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now as usize, 0);
        let start = Instant::now() + Duration::from_secs(secs_to_next_run as u64);
        sleep_until(start).await;

        let mut job_interval =
            interval(Duration::from_secs(ctx.config.reminder_job_interval_secs));
        loop {
            job_interval.tick().await;

            let processed = match execute(ProcessDueRemindersUseCase, &ctx).await {
                Ok(processed) => processed,
                Err(_) => continue,
            };

            if !processed.notifications.is_empty() {
                info!(
                    "Reminder pass stored {} notifications across {} bookings",
                    processed.notifications.len(),
                    processed.bookings_checked
                );
                push.deliver(&processed.notifications).await;
            }
        }
    });
}
