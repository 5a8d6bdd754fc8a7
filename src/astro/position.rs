use super::{normalize_hours, Degrees, Hours};

/// Hour angle of an object at right ascension `ra_deg`, normalised into (-12, 12].
pub fn hour_angle(lst: Hours, ra_deg: Degrees) -> Hours {
    normalize_hour_angle(lst - ra_deg / 15.0)
}

pub fn normalize_hour_angle(ha: Hours) -> Hours {
    let wrapped = normalize_hours(ha);
    if wrapped > 12.0 {
        wrapped - 24.0
    } else {
        wrapped
    }
}

/// Altitude above the horizon in degrees.
///
/// sin(alt) = sin(dec)·sin(lat) + cos(dec)·cos(lat)·cos(ha)
pub fn altitude_deg(ha: Hours, dec: Degrees, lat: Degrees) -> Degrees {
    let ha = (ha * 15.0).to_radians();
    let dec = dec.to_radians();
    let lat = lat.to_radians();
    let sin_alt = dec.sin() * lat.sin() + dec.cos() * lat.cos() * ha.cos();
    sin_alt.clamp(-1.0, 1.0).asin().to_degrees()
}

/// Formats an hour angle as `"{h}h {m}m W"` (west of the meridian) or `"... E"`.
pub fn format_hour_angle(ha: Hours) -> String {
    let side = if ha >= 0.0 { 'W' } else { 'E' };
    let abs = ha.abs();
    let hours = abs.floor();
    let minutes = ((abs - hours) * 60.0).floor();
    format!("{}h {}m {}", hours as u32, minutes as u32, side)
}

pub fn format_altitude(alt: Degrees) -> String {
    format!("{:.2}°", alt)
}
