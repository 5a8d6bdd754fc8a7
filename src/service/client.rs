use chrono::{DateTime, Utc};
use restson::RestClient;

use super::error::ServiceError;
use super::types::{CatalogList, TargetDetail, TargetResponse};
use crate::astro::Location;
use crate::catalog::CatalogEntry;

/// Client for the catalog / ephemeris service.
pub struct Client {
    client: RestClient,
}

impl Client {
    pub fn new(url: &str) -> Result<Self, ServiceError> {
        let client = RestClient::new(url)?;
        Ok(Client { client })
    }

    pub async fn catalog(&self) -> Result<Vec<CatalogEntry>, ServiceError> {
        let list = self.client.get::<_, CatalogList>(()).await?.into_inner();
        Ok(list.0)
    }

    /// Looks up a target for an observer. `time` pins the transit and
    /// maximum-altitude computation to that instant instead of "now".
    pub async fn target(
        &self,
        id: &str,
        location: Location,
        time: Option<DateTime<Utc>>,
    ) -> Result<TargetDetail, ServiceError> {
        let params = target_params(location, time);
        let query: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();

        let response = self
            .client
            .get_with::<_, TargetResponse>(id, &query)
            .await?
            .into_inner();

        match response {
            TargetResponse::Found(detail) => Ok(detail),
            TargetResponse::Failed { error } => Err(ServiceError::Target {
                id: id.to_string(),
                message: error,
            }),
        }
    }
}

/// Query string of a target lookup. `time` is only sent in fixed mode.
fn target_params(location: Location, time: Option<DateTime<Utc>>) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("lat", location.lat.to_string()),
        ("lon", location.lon.to_string()),
    ];
    if let Some(time) = time {
        params.push(("time", time.to_rfc3339()));
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn live_lookup_sends_only_the_observer() {
        let params = target_params(Location { lat: 48.5, lon: -3.25 }, None);
        assert_eq!(
            params,
            [("lat", "48.5".to_string()), ("lon", "-3.25".to_string())]
        );
    }

    #[test]
    fn fixed_lookup_sends_the_observing_time() {
        let at = Utc.with_ymd_and_hms(2025, 9, 21, 18, 0, 0).unwrap();
        let params = target_params(Location { lat: 10.0, lon: 20.0 }, Some(at));
        assert_eq!(params.len(), 3);
        assert_eq!(params[2], ("time", "2025-09-21T18:00:00+00:00".to_string()));
    }
}
