use crate::error::NotifierError;
use crate::shared::usecase::UseCase;
use actix_web::{web, HttpResponse};
use journeysync_notifier_api_structs::process_reminders::*;
use journeysync_notifier_domain::{
    driver_content, passenger_content, Audience, Booking, Notification, ReminderTier,
};
use journeysync_notifier_infra::NotifierContext;
use tracing::{error, info};

fn handle_error(e: UseCaseErrors) -> NotifierError {
    match e {
        UseCaseErrors::StorageError => NotifierError::InternalError,
    }
}

pub async fn process_reminders_controller(
    ctx: web::Data<NotifierContext>,
) -> Result<HttpResponse, NotifierError> {
    let usecase = ProcessDueRemindersUseCase;

    crate::shared::usecase::execute(usecase, &ctx)
        .await
        .map(|processed| {
            HttpResponse::Ok().json(APIResponse::new(
                processed.bookings_checked,
                processed.notifications,
            ))
        })
        .map_err(handle_error)
}

/// One pass over the eligible booking snapshot: classify every booking into
/// a reminder tier by its countdown, claim tiers that are still unsent and
/// store a passenger and a driver notification for each claim won.
#[derive(Debug)]
pub struct ProcessDueRemindersUseCase;

#[derive(Debug)]
pub enum UseCaseErrors {
    StorageError,
}

#[derive(Debug, Default)]
pub struct ProcessedReminders {
    pub bookings_checked: usize,
    pub notifications: Vec<Notification>,
}

/// Generates both texts, claims the tier and stores the notifications.
///
/// Content is generated before the claim so that a booking with broken
/// joined data is skipped without consuming its only claim. The claim
/// gates all persistence: of two racing invocations only the claim winner
/// stores anything, and a booking whose flag is already set is a no-op.
async fn send_tier_reminders(
    booking: &Booking,
    tier: ReminderTier,
    ctx: &NotifierContext,
) -> anyhow::Result<Vec<Notification>> {
    let ride = booking
        .ride
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("Booking {} lost its ride mid-pass", booking.id))?;

    let passenger_text = passenger_content(booking, tier)?;
    let driver_text = driver_content(booking, tier)?;

    let now = ctx.sys.get_timestamp_millis();
    let claimed = ctx
        .repos
        .bookings
        .claim_reminder(&booking.id, tier, now)
        .await?;
    if !claimed {
        // Another invocation owns this tier
        return Ok(Vec::new());
    }

    let notifications = vec![
        Notification::new(
            booking.id.clone(),
            booking.passenger.id.clone(),
            Audience::Passenger,
            tier,
            passenger_text,
            now,
        ),
        Notification::new(
            booking.id.clone(),
            ride.driver.id.clone(),
            Audience::Driver,
            tier,
            driver_text,
            now,
        ),
    ];

    for notification in &notifications {
        // A failure here leaves the tier claimed but unsent; that is
        // accepted and surfaced through the error log, the alternative
        // being duplicate sends on the next pass.
        ctx.repos.notifications.insert(notification).await?;
    }

    Ok(notifications)
}

#[async_trait::async_trait(?Send)]
impl UseCase for ProcessDueRemindersUseCase {
    type Response = ProcessedReminders;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &NotifierContext) -> Result<Self::Response, Self::Errors> {
        let bookings = ctx
            .repos
            .bookings
            .find_eligible()
            .await
            .map_err(|_| UseCaseErrors::StorageError)?;

        let now = ctx.sys.get_naive_local_datetime();
        let mut processed = ProcessedReminders {
            bookings_checked: bookings.len(),
            ..Default::default()
        };

        for booking in bookings {
            let minutes_to_departure = match booking.minutes_to_departure(now) {
                Some(minutes) => minutes,
                None => continue,
            };
            let tier = match ReminderTier::classify(minutes_to_departure) {
                Some(tier) => tier,
                None => continue,
            };
            if booking.reminders.is_sent(tier) {
                continue;
            }

            info!(
                "Sending {} reminders for booking {}: {} minutes until pickup",
                tier.as_str(),
                booking.id.short(),
                minutes_to_departure
            );

            match send_tier_reminders(&booking, tier, ctx).await {
                Ok(notifications) => processed.notifications.extend(notifications),
                Err(e) => {
                    // Per-booking isolation: log and move on to the rest of
                    // the snapshot
                    error!(
                        "Error processing reminders for booking {}: {:?}",
                        booking.id, e
                    );
                }
            }
        }

        Ok(processed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::usecase::execute;
    use chrono::NaiveDateTime;
    use journeysync_notifier_domain::{
        BookingStatus, ProfileRole, Ride, UserProfile, Vehicle,
    };
    use journeysync_notifier_infra::ISys;
    use std::sync::Arc;

    pub struct StaticTimeSys1;
    impl ISys for StaticTimeSys1 {
        fn get_timestamp_millis(&self) -> i64 {
            1780300800000 // Mon Jun 01 2026 08:00:00 UTC
        }

        fn get_naive_local_datetime(&self) -> NaiveDateTime {
            "2026-06-01T08:00:00".parse().unwrap()
        }
    }

    pub struct StaticTimeSys2;
    impl ISys for StaticTimeSys2 {
        fn get_timestamp_millis(&self) -> i64 {
            1780300800000 + 1000 * 60 * 15 // Mon Jun 01 2026 08:15:00 UTC
        }

        fn get_naive_local_datetime(&self) -> NaiveDateTime {
            "2026-06-01T08:15:00".parse().unwrap()
        }
    }

    fn setup_context() -> NotifierContext {
        let mut ctx = NotifierContext::create_inmemory();
        ctx.sys = Arc::new(StaticTimeSys1 {});
        ctx
    }

    fn booking_departing_at(time: &str) -> Booking {
        let ride = Ride {
            id: Default::default(),
            driver: UserProfile::new("Maya Driver", "555-0100", ProfileRole::Driver),
            vehicle: Some(Vehicle::new("Toyota", "Corolla", "AB-123-CD", "Blue")),
            departure_date: "2026-06-01".parse().unwrap(),
            departure_time: time.parse().unwrap(),
            from_city: "Springfield".into(),
            to_city: "Shelbyville".into(),
            pickup_point: "Central Station".into(),
            is_active: true,
        };
        let mut booking = Booking::new(
            UserProfile::new("Paul Passenger", "555-0200", ProfileRole::Passenger),
            ride,
        );
        booking.status = BookingStatus::Confirmed;
        booking
    }

    #[actix_web::test]
    async fn fires_one_reminder_pair_per_tier() {
        let mut ctx = setup_context();

        // 60 minutes to departure at the first pass
        let booking = booking_departing_at("09:00:00");
        // 45 minutes to departure: outside every window at the first pass,
        // inside ThirtyMinutes at the second
        let late_booking = booking_departing_at("08:45:00");
        ctx.repos.bookings.insert(&booking).await.unwrap();
        ctx.repos.bookings.insert(&late_booking).await.unwrap();

        let processed = execute(ProcessDueRemindersUseCase, &ctx).await.unwrap();
        assert_eq!(processed.bookings_checked, 2);
        assert_eq!(processed.notifications.len(), 2);

        let passenger = processed
            .notifications
            .iter()
            .find(|n| n.audience == Audience::Passenger)
            .unwrap();
        let driver = processed
            .notifications
            .iter()
            .find(|n| n.audience == Audience::Driver)
            .unwrap();
        assert_eq!(passenger.user_id, booking.passenger.id);
        assert_eq!(passenger.tier, ReminderTier::OneHour);
        assert!(passenger.title.starts_with("Your Upcoming Ride Details"));
        assert_eq!(driver.user_id, booking.ride.as_ref().unwrap().driver.id);
        assert_eq!(driver.tier, ReminderTier::OneHour);
        assert!(driver.title.starts_with("Upcoming Trip in 1 Hour"));

        // The flag is set and stamped with the pass timestamp
        let stored = ctx.repos.bookings.find(&booking.id).await.unwrap();
        assert!(stored.reminders.one_hour_sent);
        assert_eq!(stored.reminders.one_hour_sent_at, Some(1780300800000));

        // A second pass with an unchanged clock is a no-op
        let processed = execute(ProcessDueRemindersUseCase, &ctx).await.unwrap();
        assert_eq!(processed.notifications.len(), 0);

        // Fifteen minutes later the first booking matches no window and the
        // second one enters ThirtyMinutes
        ctx.sys = Arc::new(StaticTimeSys2 {});
        let processed = execute(ProcessDueRemindersUseCase, &ctx).await.unwrap();
        assert_eq!(processed.notifications.len(), 2);
        for notification in &processed.notifications {
            assert_eq!(notification.booking_id, late_booking.id);
            assert_eq!(notification.tier, ReminderTier::ThirtyMinutes);
        }

        // Still exactly one pair per booking and tier overall
        let all = ctx
            .repos
            .notifications
            .find_by_booking(&booking.id)
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
    }

    #[actix_web::test]
    async fn skips_bookings_outside_every_window() {
        let ctx = setup_context();

        // 70, 41 and 5 minutes to departure, and one already departed
        for time in ["09:10:00", "08:41:00", "08:05:00", "07:30:00"] {
            let booking = booking_departing_at(time);
            ctx.repos.bookings.insert(&booking).await.unwrap();
        }

        let processed = execute(ProcessDueRemindersUseCase, &ctx).await.unwrap();
        assert_eq!(processed.bookings_checked, 4);
        assert!(processed.notifications.is_empty());
    }

    #[actix_web::test]
    async fn ineligible_bookings_are_not_in_the_snapshot() {
        let ctx = setup_context();

        let cancelled = {
            let mut b = booking_departing_at("09:00:00");
            b.status = BookingStatus::Cancelled;
            b
        };
        let completed = {
            let mut b = booking_departing_at("09:00:00");
            b.status = BookingStatus::Completed;
            b
        };
        let inactive = {
            let mut b = booking_departing_at("09:00:00");
            b.ride.as_mut().unwrap().is_active = false;
            b
        };
        for b in [&cancelled, &completed, &inactive] {
            ctx.repos.bookings.insert(b).await.unwrap();
        }

        let processed = execute(ProcessDueRemindersUseCase, &ctx).await.unwrap();
        assert_eq!(processed.bookings_checked, 0);
        assert!(processed.notifications.is_empty());
    }

    #[actix_web::test]
    async fn failing_booking_does_not_block_the_rest() {
        let ctx = setup_context();

        // Passenger content needs the vehicle, so this booking fails
        let broken = {
            let mut b = booking_departing_at("09:00:00");
            b.ride.as_mut().unwrap().vehicle = None;
            b
        };
        let healthy = booking_departing_at("09:00:00");
        ctx.repos.bookings.insert(&broken).await.unwrap();
        ctx.repos.bookings.insert(&healthy).await.unwrap();

        let processed = execute(ProcessDueRemindersUseCase, &ctx).await.unwrap();
        assert_eq!(processed.notifications.len(), 2);
        for notification in &processed.notifications {
            assert_eq!(notification.booking_id, healthy.id);
        }

        // The broken booking failed before claiming, so its flag is intact
        // and it stays due for the next pass
        let stored = ctx.repos.bookings.find(&broken.id).await.unwrap();
        assert!(!stored.reminders.one_hour_sent);
    }

    #[actix_web::test]
    async fn lost_claim_stores_nothing() {
        let ctx = setup_context();

        let booking = booking_departing_at("09:00:00");
        ctx.repos.bookings.insert(&booking).await.unwrap();

        // A concurrent invocation already claimed the tier
        let claimed = ctx
            .repos
            .bookings
            .claim_reminder(&booking.id, ReminderTier::OneHour, 999)
            .await
            .unwrap();
        assert!(claimed);

        let processed = execute(ProcessDueRemindersUseCase, &ctx).await.unwrap();
        assert!(processed.notifications.is_empty());
        assert!(ctx
            .repos
            .notifications
            .find_by_booking(&booking.id)
            .await
            .unwrap()
            .is_empty());
    }
}
