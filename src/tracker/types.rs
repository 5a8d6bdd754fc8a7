use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::TrackerError;
use crate::service::TargetDetail;

const PLACEHOLDER: &str = "--";
const LOCAL_INPUT_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// An object on the tracking list. `ha` and `alt` are refreshed every tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TrackedObject {
    pub id: String,
    pub name: String,
    pub ra_deg: Option<f64>,
    pub dec_deg: Option<f64>,
    #[serde(default)]
    pub ra: Option<String>,
    pub dec: String,
    pub ha: String,
    pub alt: String,
    pub max_altitude_deg: String,
    pub transit_time_local: String,
    #[serde(default)]
    pub timezone: Option<String>,
}

impl TrackedObject {
    pub fn from_detail(id: &str, catalog_name: Option<&str>, detail: TargetDetail) -> Self {
        let name = detail
            .name
            .filter(|n| !n.is_empty())
            .or_else(|| catalog_name.map(String::from))
            .unwrap_or_else(|| id.to_string());

        Self {
            id: id.to_string(),
            name,
            ra_deg: detail.ra_deg,
            dec_deg: detail.dec_deg,
            ra: detail.ra,
            dec: detail.dec.unwrap_or_else(|| PLACEHOLDER.into()),
            ha: PLACEHOLDER.into(),
            alt: PLACEHOLDER.into(),
            max_altitude_deg: detail
                .max_altitude_deg
                .map(|v| format!("{:.1}°", v))
                .unwrap_or_else(|| PLACEHOLDER.into()),
            transit_time_local: detail
                .transit_time_local
                .unwrap_or_else(|| PLACEHOLDER.into()),
            timezone: detail.timezone,
        }
    }

    /// RA and Dec in degrees, if both are present and finite.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.ra_deg, self.dec_deg) {
            (Some(ra), Some(dec)) if ra.is_finite() && dec.is_finite() => Some((ra, dec)),
            _ => None,
        }
    }
}

/// Which clock feeds the position updates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ObservingTime {
    #[default]
    Live,
    Fixed {
        /// Text as entered by the user.
        custom_time: String,
        at: DateTime<Utc>,
    },
}

impl ObservingTime {
    /// Parses user input into a fixed observing time.
    ///
    /// Accepts RFC 3339, or `YYYY-MM-DDTHH:MM[:SS]` in the local timezone.
    /// Blank input yields `None`.
    pub fn parse_fixed(input: &str) -> Result<Option<Self>, TrackerError> {
        let custom_time = input.trim();
        if custom_time.is_empty() {
            return Ok(None);
        }

        let at = match DateTime::parse_from_rfc3339(custom_time) {
            Ok(dt) => dt.with_timezone(&Utc),
            Err(_) => parse_local(custom_time)?,
        };

        Ok(Some(ObservingTime::Fixed {
            custom_time: custom_time.to_string(),
            at,
        }))
    }

    pub fn resolve(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            ObservingTime::Live => now,
            ObservingTime::Fixed { at, .. } => *at,
        }
    }

    pub fn fixed_at(&self) -> Option<DateTime<Utc>> {
        match self {
            ObservingTime::Live => None,
            ObservingTime::Fixed { at, .. } => Some(*at),
        }
    }
}

fn parse_local(input: &str) -> Result<DateTime<Utc>, TrackerError> {
    let naive = LOCAL_INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .ok_or_else(|| TrackerError::InvalidTime(input.to_string()))?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| TrackerError::InvalidTime(input.to_string()))
}
