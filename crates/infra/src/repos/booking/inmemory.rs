use super::IBookingRepo;
use crate::repos::shared::inmemory_repo::*;
use journeysync_notifier_domain::{Booking, BookingStatus, ReminderTier, ID};

pub struct InMemoryBookingRepo {
    bookings: std::sync::Mutex<Vec<Booking>>,
}

impl InMemoryBookingRepo {
    pub fn new() -> Self {
        Self {
            bookings: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IBookingRepo for InMemoryBookingRepo {
    async fn insert(&self, booking: &Booking) -> anyhow::Result<()> {
        insert(booking, &self.bookings);
        Ok(())
    }

    async fn find(&self, booking_id: &ID) -> Option<Booking> {
        find(booking_id, &self.bookings)
    }

    async fn find_eligible(&self) -> anyhow::Result<Vec<Booking>> {
        Ok(find_by(&self.bookings, |booking: &Booking| {
            booking.is_eligible()
        }))
    }

    async fn claim_reminder(
        &self,
        booking_id: &ID,
        tier: ReminderTier,
        sent_at: i64,
    ) -> anyhow::Result<bool> {
        // The check and the flip happen under one lock, mirroring the
        // conditional UPDATE the postgres repo issues.
        let claimed = update_one(booking_id, &self.bookings, |booking| {
            if booking.reminders.is_sent(tier) {
                return false;
            }
            booking.reminders.mark_sent(tier, sent_at);
            true
        });
        Ok(claimed)
    }

    async fn update_status(&self, booking_id: &ID, status: BookingStatus) -> anyhow::Result<()> {
        update_one(booking_id, &self.bookings, |booking| {
            booking.status = status;
            true
        });
        Ok(())
    }
}
