mod location;
mod position;
mod sidereal;

pub use location::{Location, LocationError};
pub use position::{altitude_deg, format_altitude, format_hour_angle, hour_angle};
pub use sidereal::local_sidereal_time;

pub type Hours = f64;
pub type Degrees = f64;

pub(crate) fn normalize_hours(hours: Hours) -> Hours {
    let wrapped = hours.rem_euclid(24.0);
    // rem_euclid can round up to exactly 24.0 for tiny negative inputs
    if wrapped >= 24.0 {
        0.0
    } else {
        wrapped
    }
}
