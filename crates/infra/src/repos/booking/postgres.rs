use super::IBookingRepo;
use chrono::{NaiveDate, NaiveTime};
use journeysync_notifier_domain::{
    Booking, BookingStatus, ProfileRole, ReminderLog, ReminderTier, Ride, UserProfile, Vehicle, ID,
};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::TryFrom;

pub struct PostgresBookingRepo {
    pool: PgPool,
}

impl PostgresBookingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// One row of the booking snapshot join: booking columns plus the joined
/// passenger profile, ride, driver profile and (possibly absent) vehicle.
#[derive(Debug, FromRow)]
struct BookingRaw {
    booking_uid: Uuid,
    status: String,
    notif_1hr_sent: bool,
    notif_1hr_sent_at: Option<i64>,
    notif_30min_sent: bool,
    notif_30min_sent_at: Option<i64>,
    notif_15min_sent: bool,
    notif_15min_sent_at: Option<i64>,
    passenger_uid: Uuid,
    passenger_name: String,
    passenger_phone: String,
    ride_uid: Uuid,
    departure_date: NaiveDate,
    departure_time: NaiveTime,
    from_city: String,
    to_city: String,
    pickup_point: String,
    is_active: bool,
    driver_uid: Uuid,
    driver_name: String,
    driver_phone: String,
    vehicle_uid: Option<Uuid>,
    brand: Option<String>,
    car_model: Option<String>,
    license_plate: Option<String>,
    color: Option<String>,
}

impl TryFrom<BookingRaw> for Booking {
    type Error = anyhow::Error;

    fn try_from(raw: BookingRaw) -> Result<Self, Self::Error> {
        let status = raw
            .status
            .parse::<BookingStatus>()
            .map_err(anyhow::Error::msg)?;

        let vehicle = match (
            raw.vehicle_uid,
            raw.brand,
            raw.car_model,
            raw.license_plate,
            raw.color,
        ) {
            (Some(uid), Some(brand), Some(model), Some(license_plate), Some(color)) => {
                Some(Vehicle {
                    id: uid.into(),
                    brand,
                    model,
                    license_plate,
                    color,
                })
            }
            _ => None,
        };

        Ok(Booking {
            id: raw.booking_uid.into(),
            passenger: UserProfile {
                id: raw.passenger_uid.into(),
                full_name: raw.passenger_name,
                phone: raw.passenger_phone,
                role: ProfileRole::Passenger,
            },
            status,
            reminders: ReminderLog {
                one_hour_sent: raw.notif_1hr_sent,
                one_hour_sent_at: raw.notif_1hr_sent_at,
                thirty_minutes_sent: raw.notif_30min_sent,
                thirty_minutes_sent_at: raw.notif_30min_sent_at,
                fifteen_minutes_sent: raw.notif_15min_sent,
                fifteen_minutes_sent_at: raw.notif_15min_sent_at,
            },
            ride: Some(Ride {
                id: raw.ride_uid.into(),
                driver: UserProfile {
                    id: raw.driver_uid.into(),
                    full_name: raw.driver_name,
                    phone: raw.driver_phone,
                    role: ProfileRole::Driver,
                },
                vehicle,
                departure_date: raw.departure_date,
                departure_time: raw.departure_time,
                from_city: raw.from_city,
                to_city: raw.to_city,
                pickup_point: raw.pickup_point,
                is_active: raw.is_active,
            }),
        })
    }
}

const BOOKING_SELECT: &str = r#"
SELECT b.booking_uid, b.status,
    b.notif_1hr_sent, b.notif_1hr_sent_at,
    b.notif_30min_sent, b.notif_30min_sent_at,
    b.notif_15min_sent, b.notif_15min_sent_at,
    p.profile_uid AS passenger_uid, p.full_name AS passenger_name, p.phone AS passenger_phone,
    r.ride_uid, r.departure_date, r.departure_time, r.from_city, r.to_city, r.pickup_point, r.is_active,
    d.profile_uid AS driver_uid, d.full_name AS driver_name, d.phone AS driver_phone,
    v.vehicle_uid, v.brand, v.car_model, v.license_plate, v.color
FROM bookings AS b
INNER JOIN profiles AS p ON p.profile_uid = b.passenger_uid
INNER JOIN rides AS r ON r.ride_uid = b.ride_uid
INNER JOIN profiles AS d ON d.profile_uid = r.driver_uid
LEFT JOIN vehicles AS v ON v.vehicle_uid = r.vehicle_uid
"#;

/// Column pair guarding a tier. The flag column gates the conditional
/// claim; the timestamp column records when it was won.
fn tier_columns(tier: ReminderTier) -> (&'static str, &'static str) {
    match tier {
        ReminderTier::OneHour => ("notif_1hr_sent", "notif_1hr_sent_at"),
        ReminderTier::ThirtyMinutes => ("notif_30min_sent", "notif_30min_sent_at"),
        ReminderTier::FifteenMinutes => ("notif_15min_sent", "notif_15min_sent_at"),
    }
}

#[async_trait::async_trait]
impl IBookingRepo for PostgresBookingRepo {
    async fn insert(&self, booking: &Booking) -> anyhow::Result<()> {
        let ride = booking
            .ride
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Booking {} has no ride to store", booking.id))?;

        sqlx::query(
            r#"
            INSERT INTO profiles(profile_uid, full_name, phone, role)
            VALUES($1, $2, $3, $4)
            ON CONFLICT (profile_uid) DO NOTHING
            "#,
        )
        .bind(booking.passenger.id.inner_ref())
        .bind(&booking.passenger.full_name)
        .bind(&booking.passenger.phone)
        .bind(booking.passenger.role.as_str())
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO profiles(profile_uid, full_name, phone, role)
            VALUES($1, $2, $3, $4)
            ON CONFLICT (profile_uid) DO NOTHING
            "#,
        )
        .bind(ride.driver.id.inner_ref())
        .bind(&ride.driver.full_name)
        .bind(&ride.driver.phone)
        .bind(ride.driver.role.as_str())
        .execute(&self.pool)
        .await?;

        if let Some(vehicle) = &ride.vehicle {
            sqlx::query(
                r#"
                INSERT INTO vehicles(vehicle_uid, brand, car_model, license_plate, color)
                VALUES($1, $2, $3, $4, $5)
                ON CONFLICT (vehicle_uid) DO NOTHING
                "#,
            )
            .bind(vehicle.id.inner_ref())
            .bind(&vehicle.brand)
            .bind(&vehicle.model)
            .bind(&vehicle.license_plate)
            .bind(&vehicle.color)
            .execute(&self.pool)
            .await?;
        }

        sqlx::query(
            r#"
            INSERT INTO rides
            (ride_uid, driver_uid, vehicle_uid, departure_date, departure_time, from_city, to_city, pickup_point, is_active)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (ride_uid) DO NOTHING
            "#,
        )
        .bind(ride.id.inner_ref())
        .bind(ride.driver.id.inner_ref())
        .bind(ride.vehicle.as_ref().map(|v| *v.id.inner_ref()))
        .bind(ride.departure_date)
        .bind(ride.departure_time)
        .bind(&ride.from_city)
        .bind(&ride.to_city)
        .bind(&ride.pickup_point)
        .bind(ride.is_active)
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO bookings
            (booking_uid, ride_uid, passenger_uid, status,
             notif_1hr_sent, notif_1hr_sent_at,
             notif_30min_sent, notif_30min_sent_at,
             notif_15min_sent, notif_15min_sent_at)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(booking.id.inner_ref())
        .bind(ride.id.inner_ref())
        .bind(booking.passenger.id.inner_ref())
        .bind(booking.status.as_str())
        .bind(booking.reminders.one_hour_sent)
        .bind(booking.reminders.one_hour_sent_at)
        .bind(booking.reminders.thirty_minutes_sent)
        .bind(booking.reminders.thirty_minutes_sent_at)
        .bind(booking.reminders.fifteen_minutes_sent)
        .bind(booking.reminders.fifteen_minutes_sent_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, booking_id: &ID) -> Option<Booking> {
        let sql = format!("{} WHERE b.booking_uid = $1", BOOKING_SELECT);
        let raw: BookingRaw = match sqlx::query_as(&sql)
            .bind(booking_id.inner_ref())
            .fetch_one(&self.pool)
            .await
        {
            Ok(raw) => raw,
            Err(_) => return None,
        };
        Booking::try_from(raw).ok()
    }

    async fn find_eligible(&self) -> anyhow::Result<Vec<Booking>> {
        let sql = format!(
            "{} WHERE b.status IN ('pending', 'confirmed') AND r.is_active = TRUE",
            BOOKING_SELECT
        );
        let rows: Vec<BookingRaw> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn claim_reminder(
        &self,
        booking_id: &ID,
        tier: ReminderTier,
        sent_at: i64,
    ) -> anyhow::Result<bool> {
        let (flag, flag_at) = tier_columns(tier);
        let sql = format!(
            r#"
            UPDATE bookings
            SET {flag} = TRUE, {flag_at} = $2
            WHERE booking_uid = $1 AND {flag} = FALSE
            "#,
            flag = flag,
            flag_at = flag_at,
        );
        let res = sqlx::query(&sql)
            .bind(booking_id.inner_ref())
            .bind(sent_at)
            .execute(&self.pool)
            .await?;

        Ok(res.rows_affected() == 1)
    }

    async fn update_status(&self, booking_id: &ID, status: BookingStatus) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE bookings
            SET status = $2
            WHERE booking_uid = $1
            "#,
        )
        .bind(booking_id.inner_ref())
        .bind(status.as_str())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
