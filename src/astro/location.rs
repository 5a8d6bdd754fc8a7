use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum LocationError {
    #[error("expected \"lat, lon\", got {0:?}")]
    InvalidFormat(String),
    #[error("latitude {0} outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// Observer position in degrees, longitude east positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    pub fn new(lat: f64, lon: f64) -> Result<Self, LocationError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(LocationError::LatitudeOutOfRange(lat));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(LocationError::LongitudeOutOfRange(lon));
        }
        Ok(Self { lat, lon })
    }

    pub fn from_coordinates(coordinates: &str) -> Result<Self, LocationError> {
        let invalid = || LocationError::InvalidFormat(coordinates.to_string());
        let parts: Vec<_> = coordinates.split(',').map(|s| s.trim()).collect();
        if parts.len() != 2 {
            return Err(invalid());
        }
        let lat = parts[0].parse().map_err(|_| invalid())?;
        let lon = parts[1].parse().map_err(|_| invalid())?;
        Self::new(lat, lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_coordinate_string() {
        let loc = Location::from_coordinates(" 52.52, 13.405 ").unwrap();
        assert_eq!(loc, Location { lat: 52.52, lon: 13.405 });
    }

    #[test]
    fn rejects_malformed_coordinates() {
        assert!(matches!(
            Location::from_coordinates("52.52"),
            Err(LocationError::InvalidFormat(_))
        ));
        assert!(matches!(
            Location::from_coordinates("north, 13.4"),
            Err(LocationError::InvalidFormat(_))
        ));
        assert!(matches!(
            Location::from_coordinates("1, 2, 3"),
            Err(LocationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(
            Location::new(91.0, 0.0),
            Err(LocationError::LatitudeOutOfRange(91.0))
        );
        assert_eq!(
            Location::new(0.0, -180.5),
            Err(LocationError::LongitudeOutOfRange(-180.5))
        );
        assert!(Location::new(f64::NAN, 0.0).is_err());
    }
}
