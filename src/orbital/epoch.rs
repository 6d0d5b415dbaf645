//! Julian-date and J2000.0 epoch bookkeeping.
//!
//! All orbital elements in this crate are referenced to the J2000.0 epoch,
//! and the simulation clock counts milliseconds from that same instant, so
//! these conversions are shared by the clock and the propagator.

use chrono::{DateTime, Datelike, Duration, TimeZone, Timelike, Utc};

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00:00 UTC).
pub const J2000_JD: f64 = 2451545.0;

/// Days per Julian century.
pub const DAYS_PER_CENTURY: f64 = 36525.0;

/// Milliseconds per day.
pub const MS_PER_DAY: f64 = 86_400_000.0;

/// The J2000.0 reference epoch as a calendar instant.
pub fn j2000_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap()
}

/// Compute the Julian Date (UTC) for a given timestamp.
/// Uses the standard Gregorian calendar to JD conversion.
pub fn julian_date_utc(t: DateTime<Utc>) -> f64 {
    let mut y = t.year();
    let mut m = t.month() as i32;
    let d = t.day() as i32;

    // Convert time of day to fraction of day
    let hour = t.hour() as f64;
    let minute = t.minute() as f64;
    let sec = t.second() as f64 + (t.nanosecond() as f64) * 1e-9_f64;
    let day_fraction = (hour + (minute + sec / 60.0) / 60.0) / 24.0;

    if m <= 2 {
        y -= 1;
        m += 12;
    }

    let a = (y as f64 / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    let jd0 = (365.25 * (y as f64 + 4716.0)).floor()
        + (30.6001 * ((m + 1) as f64)).floor()
        + d as f64
        + b
        - 1524.5;

    jd0 + day_fraction
}

/// Julian centuries elapsed since J2000.0; scales secular element rates.
pub fn julian_centuries_since_j2000(t: DateTime<Utc>) -> f64 {
    (julian_date_utc(t) - J2000_JD) / DAYS_PER_CENTURY
}

/// Calendar date for a simulation-time offset (milliseconds from J2000.0).
pub fn date_from_sim_millis(sim_ms: f64) -> DateTime<Utc> {
    let whole_ms = sim_ms.trunc();
    let nanos = ((sim_ms - whole_ms) * 1_000_000.0) as i64;
    j2000_epoch() + Duration::milliseconds(whole_ms as i64) + Duration::nanoseconds(nanos)
}

/// Simulation-time offset (milliseconds from J2000.0) for a calendar date.
pub fn sim_millis_from_date(date: DateTime<Utc>) -> f64 {
    let delta = date - j2000_epoch();
    delta.num_seconds() as f64 * 1000.0 + f64::from(delta.subsec_nanos()) / 1e6
}
