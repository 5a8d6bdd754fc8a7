use chrono::{DateTime, Utc};

use super::types::TrackedObject;
use crate::astro::{
    altitude_deg, format_altitude, format_hour_angle, hour_angle, local_sidereal_time, Location,
};

/// Refreshes hour angle and altitude of every object with usable coordinates.
/// Objects without RA/Dec are left untouched.
pub fn recompute(objects: &mut [TrackedObject], location: Location, at: DateTime<Utc>) {
    let lst = local_sidereal_time(at, location.lon);

    for obj in objects.iter_mut() {
        let Some((ra, dec)) = obj.coordinates() else {
            log::debug!("{} has no coordinates, skipping", obj.id);
            continue;
        };

        let ha = hour_angle(lst, ra);
        obj.ha = format_hour_angle(ha);
        obj.alt = format_altitude(altitude_deg(ha, dec, location.lat));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn object(id: &str, ra: Option<f64>, dec: Option<f64>) -> TrackedObject {
        TrackedObject {
            id: id.into(),
            name: id.into(),
            ra_deg: ra,
            dec_deg: dec,
            ra: None,
            dec: "--".into(),
            ha: "--".into(),
            alt: "--".into(),
            max_altitude_deg: "--".into(),
            transit_time_local: "--".into(),
            timezone: None,
        }
    }

    #[test]
    fn object_just_past_the_meridian() {
        // At J2000.0 from Greenwich, LST is 18.697374558 h
        let at = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        let ra = 18.697_374_558 * 15.0 - 0.6;
        let mut objects = vec![object("transit", Some(ra), Some(0.0))];

        recompute(&mut objects, Location { lat: 0.0, lon: 0.0 }, at);

        assert_eq!(objects[0].ha, "0h 2m W");
        assert_eq!(objects[0].alt, "89.40°");
    }

    #[test]
    fn east_of_meridian_is_labelled_east() {
        let at = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        // two hours east of the meridian
        let ra = (18.697_374_558 + 2.0) * 15.0;
        let mut objects = vec![object("rising", Some(ra), Some(0.0))];

        recompute(&mut objects, Location { lat: 0.0, lon: 0.0 }, at);

        assert!(objects[0].ha.ends_with(" E"), "{}", objects[0].ha);
        assert!(objects[0].ha.starts_with("1h 59m") || objects[0].ha.starts_with("2h 0m"));
        assert_eq!(objects[0].alt, "60.00°");
    }

    #[test]
    fn objects_without_coordinates_pass_through() {
        let at = Utc.with_ymd_and_hms(2024, 8, 12, 22, 0, 0).unwrap();
        let mut objects = vec![
            object("no-ra", None, Some(10.0)),
            object("ok", Some(250.4), Some(36.5)),
            object("nan", Some(f64::NAN), Some(1.0)),
        ];
        let before = objects.clone();

        recompute(&mut objects, Location { lat: 48.1, lon: 11.6 }, at);

        assert_eq!(objects[0], before[0]);
        // NaN never compares equal, so check the display fields only
        assert_eq!(objects[2].ha, "--");
        assert_eq!(objects[2].alt, "--");
        assert_ne!(objects[1].ha, "--");
        assert_ne!(objects[1].alt, "--");
    }
}
