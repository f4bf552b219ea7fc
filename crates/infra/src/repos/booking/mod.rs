mod inmemory;
mod postgres;

pub use inmemory::InMemoryBookingRepo;
use journeysync_notifier_domain::{Booking, BookingStatus, ReminderTier, ID};
pub use postgres::PostgresBookingRepo;

#[async_trait::async_trait]
pub trait IBookingRepo: Send + Sync {
    /// Stores a booking snapshot together with its joined ride, vehicle and
    /// profiles.
    async fn insert(&self, booking: &Booking) -> anyhow::Result<()>;
    async fn find(&self, booking_id: &ID) -> Option<Booking>;
    /// The snapshot query: every booking still pending or confirmed whose
    /// ride is active, with ride, vehicle and both profiles joined in.
    async fn find_eligible(&self) -> anyhow::Result<Vec<Booking>>;
    /// Flips the sent flag of the given tier and stamps it with `sent_at`,
    /// but only if the flag is still unset. Returns whether this call was
    /// the one that flipped it; only a `true` return licenses sending.
    /// The flag never moves back to unset.
    async fn claim_reminder(
        &self,
        booking_id: &ID,
        tier: ReminderTier,
        sent_at: i64,
    ) -> anyhow::Result<bool>;
    async fn update_status(&self, booking_id: &ID, status: BookingStatus) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use crate::NotifierContext;
    use journeysync_notifier_domain::{
        Booking, BookingStatus, ProfileRole, ReminderTier, Ride, UserProfile, Vehicle,
    };

    fn booking_factory() -> Booking {
        let ride = Ride {
            id: Default::default(),
            driver: UserProfile::new("Maya Driver", "555-0100", ProfileRole::Driver),
            vehicle: Some(Vehicle::new("Toyota", "Corolla", "AB-123-CD", "Blue")),
            departure_date: "2026-06-01".parse().unwrap(),
            departure_time: "09:00:00".parse().unwrap(),
            from_city: "Springfield".into(),
            to_city: "Shelbyville".into(),
            pickup_point: "Central Station".into(),
            is_active: true,
        };
        Booking::new(
            UserProfile::new("Paul Passenger", "555-0200", ProfileRole::Passenger),
            ride,
        )
    }

    #[tokio::test]
    async fn insert_and_find() {
        let ctx = NotifierContext::create_inmemory();
        let booking = booking_factory();

        assert!(ctx.repos.bookings.insert(&booking).await.is_ok());

        let found = ctx.repos.bookings.find(&booking.id).await.unwrap();
        assert_eq!(found, booking);
    }

    #[tokio::test]
    async fn eligible_snapshot_filters_status_and_ride() {
        let ctx = NotifierContext::create_inmemory();

        let confirmed = {
            let mut b = booking_factory();
            b.status = BookingStatus::Confirmed;
            b
        };
        let pending = booking_factory();
        let cancelled = {
            let mut b = booking_factory();
            b.status = BookingStatus::Cancelled;
            b
        };
        let completed = {
            let mut b = booking_factory();
            b.status = BookingStatus::Completed;
            b
        };
        let inactive_ride = {
            let mut b = booking_factory();
            b.ride.as_mut().unwrap().is_active = false;
            b
        };

        for b in [&confirmed, &pending, &cancelled, &completed, &inactive_ride] {
            ctx.repos.bookings.insert(b).await.unwrap();
        }

        let snapshot = ctx.repos.bookings.find_eligible().await.unwrap();
        let ids: Vec<_> = snapshot.iter().map(|b| b.id.clone()).collect();
        assert_eq!(snapshot.len(), 2);
        assert!(ids.contains(&confirmed.id));
        assert!(ids.contains(&pending.id));
    }

    #[tokio::test]
    async fn claim_is_granted_once() {
        let ctx = NotifierContext::create_inmemory();
        let booking = booking_factory();
        ctx.repos.bookings.insert(&booking).await.unwrap();

        let first = ctx
            .repos
            .bookings
            .claim_reminder(&booking.id, ReminderTier::OneHour, 1000)
            .await
            .unwrap();
        let second = ctx
            .repos
            .bookings
            .claim_reminder(&booking.id, ReminderTier::OneHour, 2000)
            .await
            .unwrap();

        assert!(first);
        assert!(!second);

        let found = ctx.repos.bookings.find(&booking.id).await.unwrap();
        assert!(found.reminders.one_hour_sent);
        // First claim owns the timestamp
        assert_eq!(found.reminders.one_hour_sent_at, Some(1000));

        // Other tiers can still be claimed independently
        let other = ctx
            .repos
            .bookings
            .claim_reminder(&booking.id, ReminderTier::ThirtyMinutes, 3000)
            .await
            .unwrap();
        assert!(other);
    }

    #[tokio::test]
    async fn claim_for_unknown_booking_is_denied() {
        let ctx = NotifierContext::create_inmemory();
        let booking = booking_factory();

        let claimed = ctx
            .repos
            .bookings
            .claim_reminder(&booking.id, ReminderTier::OneHour, 1000)
            .await
            .unwrap();
        assert!(!claimed);
    }

    #[tokio::test]
    async fn status_update_removes_booking_from_snapshot() {
        let ctx = NotifierContext::create_inmemory();
        let booking = booking_factory();
        ctx.repos.bookings.insert(&booking).await.unwrap();

        assert_eq!(ctx.repos.bookings.find_eligible().await.unwrap().len(), 1);

        ctx.repos
            .bookings
            .update_status(&booking.id, BookingStatus::Cancelled)
            .await
            .unwrap();

        assert!(ctx.repos.bookings.find_eligible().await.unwrap().is_empty());
    }
}
