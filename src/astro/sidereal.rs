use chrono::{DateTime, Utc};

use super::{normalize_hours, Degrees, Hours};

const UNIX_EPOCH_JD: f64 = 2_440_587.5;
const J2000_JD: f64 = 2_451_545.0;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

const GMST_AT_J2000: Hours = 18.697_374_558;
const GMST_HOURS_PER_DAY: Hours = 24.065_709_824_419_08;

/// Julian Date of a UTC instant, derived from Unix time.
pub fn julian_date(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / MILLIS_PER_DAY + UNIX_EPOCH_JD
}

/// Greenwich Mean Sidereal Time in hours, normalised into [0, 24).
///
/// Uses the linear approximation referenced to J2000.0, which is accurate to
/// well under a second of time for dates within a few decades of the epoch.
pub fn greenwich_mean_sidereal_time(time: DateTime<Utc>) -> Hours {
    let days = julian_date(time) - J2000_JD;
    normalize_hours(GMST_AT_J2000 + GMST_HOURS_PER_DAY * days)
}

/// Local Sidereal Time in hours for an observer at `longitude` (east positive).
pub fn local_sidereal_time(time: DateTime<Utc>, longitude: Degrees) -> Hours {
    normalize_hours(greenwich_mean_sidereal_time(time) + longitude / 15.0)
}
