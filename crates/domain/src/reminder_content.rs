use crate::booking::Booking;
use crate::reminder::ReminderTier;
use crate::ride::Ride;
use crate::shared::entity::ID;
use chrono::{Duration, NaiveDate, NaiveTime};
use thiserror::Error;

/// Journey duration used for the arrival estimate in passenger texts. A
/// placeholder, not a route computation: every ride is assumed to take two
/// hours regardless of distance.
const ARRIVAL_ESTIMATE: i64 = 2;

/// Title and message for a single notification.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationContent {
    pub title: String,
    pub message: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum ContentError {
    #[error("Booking {0} has no ride to describe")]
    MissingRide(ID),
    #[error("Booking {0} has no vehicle joined to its ride")]
    MissingVehicle(ID),
}

// "Monday, June 1, 2026"
fn format_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

// "09:05 AM"
fn format_time(time: NaiveTime) -> String {
    time.format("%I:%M %p").to_string()
}

fn estimated_arrival(ride: &Ride) -> String {
    let arrival = ride.departure() + Duration::hours(ARRIVAL_ESTIMATE);
    format_time(arrival.time())
}

/// Content for the passenger of a booking at the given tier. Fails when the
/// booking carries no ride, or no vehicle to describe to the passenger;
/// partial texts are never produced.
pub fn passenger_content(
    booking: &Booking,
    tier: ReminderTier,
) -> Result<NotificationContent, ContentError> {
    let ride = booking
        .ride
        .as_ref()
        .ok_or_else(|| ContentError::MissingRide(booking.id.clone()))?;
    let vehicle = ride
        .vehicle
        .as_ref()
        .ok_or_else(|| ContentError::MissingVehicle(booking.id.clone()))?;

    let driver_name = &ride.driver.full_name;
    let driver_phone = &ride.driver.phone;
    let boarding_point = &ride.pickup_point;

    let content = match tier {
        ReminderTier::OneHour => NotificationContent {
            title: format!(
                "Your Upcoming Ride Details (Booking ID: {})",
                booking.id.short()
            ),
            message: format!(
                "Hi {passenger},\n\
                 \n\
                 Here are the details for your upcoming ride from {from} to {to}:\n\
                 \n\
                 Driver Information:\n\
                 • Driver Name: {driver}\n\
                 • Phone Number: {phone}\n\
                 \n\
                 Vehicle Information:\n\
                 • Car Model: {brand} {model}\n\
                 • License Plate: {plate}\n\
                 • Color: {color}\n\
                 \n\
                 Journey Details:\n\
                 • Date: {date}\n\
                 • Departure Time: {departure}\n\
                 • Estimated Arrival Time: {arrival}\n\
                 • Boarding Point: {boarding}\n\
                 \n\
                 Important Notes:\n\
                 • Please arrive at the boarding point at least 10 minutes before the departure time.\n\
                 • You can contact your driver directly at the phone number provided above.\n\
                 • You can track your ride in real-time through the app.\n\
                 \n\
                 We wish you a safe and pleasant journey!",
                passenger = booking.passenger.full_name,
                from = ride.from_city,
                to = ride.to_city,
                driver = driver_name,
                phone = driver_phone,
                brand = vehicle.brand,
                model = vehicle.model,
                plate = vehicle.license_plate,
                color = vehicle.color,
                date = format_date(ride.departure_date),
                departure = format_time(ride.departure_time),
                arrival = estimated_arrival(ride),
                boarding = boarding_point,
            ),
        },
        ReminderTier::ThirtyMinutes => NotificationContent {
            title: format!("Your ride is 30 minutes away! ({})", booking.id.short()),
            message: format!(
                "{}, your ride with {} is now 30 minutes away. Please ensure you are ready for pickup at {}. Driver contact: {}",
                booking.passenger.full_name, driver_name, boarding_point, driver_phone
            ),
        },
        ReminderTier::FifteenMinutes => NotificationContent {
            title: format!("Driver arriving soon! ({})", booking.id.short()),
            message: format!(
                "Your driver, {}, is approximately 15 minutes away from {}. Please be at the pickup point. Contact driver: {}",
                driver_name, boarding_point, driver_phone
            ),
        },
    };
    Ok(content)
}

/// Content for the driver of a booking at the given tier.
pub fn driver_content(
    booking: &Booking,
    tier: ReminderTier,
) -> Result<NotificationContent, ContentError> {
    let ride = booking
        .ride
        .as_ref()
        .ok_or_else(|| ContentError::MissingRide(booking.id.clone()))?;

    let passenger_name = &booking.passenger.full_name;
    let passenger_phone = &booking.passenger.phone;
    let pickup = &ride.pickup_point;
    let dropoff = &ride.to_city;

    let content = match tier {
        ReminderTier::OneHour => NotificationContent {
            title: format!("Upcoming Trip in 1 Hour ({})", booking.id.short()),
            message: format!(
                "Hi, you have an upcoming trip with {} in approximately 1 hour. Pickup at {}, Drop-off at {}. Please ensure your vehicle is ready.",
                passenger_name, pickup, dropoff
            ),
        },
        ReminderTier::ThirtyMinutes => NotificationContent {
            title: format!("Trip Reminder: 30 Minutes to Pickup ({})", booking.id.short()),
            message: format!(
                "Your trip with {} is 30 minutes away. Head towards {}. Passenger contact: {}",
                passenger_name, pickup, passenger_phone
            ),
        },
        ReminderTier::FifteenMinutes => NotificationContent {
            title: format!("Passenger Pickup Soon! ({})", booking.id.short()),
            message: format!(
                "You are approximately 15 minutes from {}'s pickup location at {}. Please confirm your arrival once you reach the pickup point.",
                passenger_name, pickup
            ),
        },
    };
    Ok(content)
}
