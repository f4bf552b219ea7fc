mod booking;
mod notification;
mod profile;
mod reminder;
mod reminder_content;
mod ride;
mod shared;

pub use booking::{Booking, BookingStatus, ReminderLog};
pub use notification::{Audience, Notification};
pub use profile::{ProfileRole, UserProfile};
pub use reminder::ReminderTier;
pub use reminder_content::{driver_content, passenger_content, ContentError, NotificationContent};
pub use ride::{Ride, Vehicle};
pub use shared::entity::{Entity, ID};
