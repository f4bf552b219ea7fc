use chrono::{Local, NaiveDateTime, Utc};

// Mocking out time so that it is possible to run tests that depend on time.
pub trait ISys: Send + Sync {
    /// The current timestamp in millis
    fn get_timestamp_millis(&self) -> i64;

    /// The current wall-clock time without a timezone. Departure countdowns
    /// compare this against the naive departure date and time the store
    /// records, so the service is assumed to run in the same timezone as
    /// the rides it reminds about.
    fn get_naive_local_datetime(&self) -> NaiveDateTime;
}

/// System that gets the real time and is used when not testing
pub struct RealSys {}
impl ISys for RealSys {
    fn get_timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn get_naive_local_datetime(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
