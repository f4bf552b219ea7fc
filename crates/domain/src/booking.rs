use crate::profile::UserProfile;
use crate::reminder::ReminderTier;
use crate::ride::Ride;
use crate::shared::entity::{Entity, ID};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    /// Statuses that still take part in reminder processing.
    pub const ELIGIBLE: [BookingStatus; 2] = [BookingStatus::Pending, BookingStatus::Confirmed];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            "completed" => Ok(BookingStatus::Completed),
            _ => Err(format!("Invalid booking status: {}", s)),
        }
    }
}

/// Per-tier sent flags with the timestamp of each send. A flag only ever
/// moves from unsent to sent; nothing in this crate resets one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReminderLog {
    pub one_hour_sent: bool,
    pub one_hour_sent_at: Option<i64>,
    pub thirty_minutes_sent: bool,
    pub thirty_minutes_sent_at: Option<i64>,
    pub fifteen_minutes_sent: bool,
    pub fifteen_minutes_sent_at: Option<i64>,
}

impl ReminderLog {
    pub fn is_sent(&self, tier: ReminderTier) -> bool {
        match tier {
            ReminderTier::OneHour => self.one_hour_sent,
            ReminderTier::ThirtyMinutes => self.thirty_minutes_sent,
            ReminderTier::FifteenMinutes => self.fifteen_minutes_sent,
        }
    }

    /// Marks a tier as sent at the given timestamp in millis. A tier that is
    /// already sent keeps its original timestamp.
    pub fn mark_sent(&mut self, tier: ReminderTier, sent_at: i64) {
        if self.is_sent(tier) {
            return;
        }
        match tier {
            ReminderTier::OneHour => {
                self.one_hour_sent = true;
                self.one_hour_sent_at = Some(sent_at);
            }
            ReminderTier::ThirtyMinutes => {
                self.thirty_minutes_sent = true;
                self.thirty_minutes_sent_at = Some(sent_at);
            }
            ReminderTier::FifteenMinutes => {
                self.fifteen_minutes_sent = true;
                self.fifteen_minutes_sent_at = Some(sent_at);
            }
        }
    }
}

/// A seat reservation on a `Ride`, joined with everything reminder
/// processing needs: the passenger profile, the ride with driver and
/// vehicle, and the log of reminders already sent.
///
/// The ride is optional because the snapshot join can come back without
/// one; such bookings are skipped by the scheduler.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: ID,
    pub passenger: UserProfile,
    pub status: BookingStatus,
    pub reminders: ReminderLog,
    pub ride: Option<Ride>,
}

impl Booking {
    pub fn new(passenger: UserProfile, ride: Ride) -> Self {
        Self {
            id: Default::default(),
            passenger,
            status: BookingStatus::Pending,
            reminders: Default::default(),
            ride: Some(ride),
        }
    }

    /// Eligible bookings are the ones the snapshot query returns: still
    /// pending or confirmed, with an active ride attached.
    pub fn is_eligible(&self) -> bool {
        BookingStatus::ELIGIBLE.contains(&self.status)
            && self.ride.as_ref().map(|r| r.is_active).unwrap_or(false)
    }

    pub fn minutes_to_departure(&self, now: NaiveDateTime) -> Option<i64> {
        self.ride.as_ref().map(|r| r.minutes_to_departure(now))
    }
}

impl Entity<ID> for Booking {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn flags_never_reset_and_keep_first_timestamp() {
        let mut log = ReminderLog::default();
        assert!(!log.is_sent(ReminderTier::OneHour));

        log.mark_sent(ReminderTier::OneHour, 1000);
        assert!(log.is_sent(ReminderTier::OneHour));
        assert_eq!(log.one_hour_sent_at, Some(1000));

        // A repeated mark is a no-op
        log.mark_sent(ReminderTier::OneHour, 2000);
        assert!(log.is_sent(ReminderTier::OneHour));
        assert_eq!(log.one_hour_sent_at, Some(1000));

        // Other tiers are untouched
        assert!(!log.is_sent(ReminderTier::ThirtyMinutes));
        assert!(!log.is_sent(ReminderTier::FifteenMinutes));
    }

    #[test]
    fn tiers_are_marked_independently() {
        let mut log = ReminderLog::default();
        for tier in ReminderTier::ALL {
            log.mark_sent(tier, 42);
        }
        for tier in ReminderTier::ALL {
            assert!(log.is_sent(tier));
        }
    }
}
