use crate::profile::UserProfile;
use crate::shared::entity::{Entity, ID};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// The car a ride is driven in. Reminder texts describe it so the passenger
/// can spot the right vehicle at the boarding point.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: ID,
    pub brand: String,
    pub model: String,
    pub license_plate: String,
    pub color: String,
}

impl Vehicle {
    pub fn new(brand: &str, model: &str, license_plate: &str, color: &str) -> Self {
        Self {
            id: Default::default(),
            brand: brand.into(),
            model: model.into(),
            license_plate: license_plate.into(),
            color: color.into(),
        }
    }
}

impl Entity<ID> for Vehicle {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

/// A published ride as it appears in a booking snapshot: the driver profile
/// and vehicle are joined in, and the vehicle can be absent when the join
/// comes back empty.
///
/// Departure date and time are stored as naive wall-clock values with no
/// timezone, exactly as the store records them. Countdown arithmetic assumes
/// the service runs in the same timezone as its rides.
#[derive(Debug, Clone, PartialEq)]
pub struct Ride {
    pub id: ID,
    pub driver: UserProfile,
    pub vehicle: Option<Vehicle>,
    pub departure_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub from_city: String,
    pub to_city: String,
    pub pickup_point: String,
    pub is_active: bool,
}

impl Ride {
    pub fn departure(&self) -> NaiveDateTime {
        self.departure_date.and_time(self.departure_time)
    }

    /// Whole minutes until departure, rounded towards negative infinity so
    /// that a departure 30 seconds ago counts as -1 minutes, not 0.
    pub fn minutes_to_departure(&self, now: NaiveDateTime) -> i64 {
        (self.departure() - now).num_seconds().div_euclid(60)
    }
}

impl Entity<ID> for Ride {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
