use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// A `ReminderTier` is one of the three fixed time-to-departure windows at
/// which both parties of a `Booking` receive a reminder.
///
/// The windows are wide (plus/minus five minutes) so that a booking cannot
/// slip past a tier between two ticks of an irregular polling schedule.
/// They must stay pairwise disjoint: a booking matches at most one tier per
/// pass, which the `classify` tests enforce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReminderTier {
    #[serde(rename = "1_hour")]
    OneHour,
    #[serde(rename = "30_minutes")]
    ThirtyMinutes,
    #[serde(rename = "15_minutes")]
    FifteenMinutes,
}

impl ReminderTier {
    pub const ALL: [ReminderTier; 3] = [
        ReminderTier::OneHour,
        ReminderTier::ThirtyMinutes,
        ReminderTier::FifteenMinutes,
    ];

    /// Minutes-to-departure window, both ends inclusive.
    pub fn window(&self) -> RangeInclusive<i64> {
        match self {
            ReminderTier::OneHour => 55..=65,
            ReminderTier::ThirtyMinutes => 25..=35,
            ReminderTier::FifteenMinutes => 10..=20,
        }
    }

    /// Tier identifier as stored in the notifications table.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderTier::OneHour => "1_hour",
            ReminderTier::ThirtyMinutes => "30_minutes",
            ReminderTier::FifteenMinutes => "15_minutes",
        }
    }

    /// Classifies a countdown into the tier whose window contains it, testing
    /// tiers closest-to-departure-last. Returns `None` outside every window,
    /// which also covers departures already in the past.
    pub fn classify(minutes_to_departure: i64) -> Option<ReminderTier> {
        ReminderTier::ALL
            .iter()
            .find(|tier| tier.window().contains(&minutes_to_departure))
            .copied()
    }
}

impl std::str::FromStr for ReminderTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1_hour" => Ok(ReminderTier::OneHour),
            "30_minutes" => Ok(ReminderTier::ThirtyMinutes),
            "15_minutes" => Ok(ReminderTier::FifteenMinutes),
            _ => Err(format!("Invalid reminder tier: {}", s)),
        }
    }
}
