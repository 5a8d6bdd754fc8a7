use restson::{Error, RestPath};
use serde::Deserialize;

use crate::catalog::CatalogEntry;

#[derive(Deserialize, Debug)]
#[serde(transparent)]
pub struct CatalogList(pub Vec<CatalogEntry>);

impl RestPath<()> for CatalogList {
    fn get_path(_: ()) -> Result<String, Error> {
        Ok(String::from("catalog"))
    }
}

/// Ephemeris of a single object as seen from the requested location.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TargetDetail {
    pub name: Option<String>,
    pub ra: Option<String>,
    pub ra_deg: Option<f64>,
    pub dec: Option<String>,
    pub dec_deg: Option<f64>,
    pub max_altitude_deg: Option<f64>,
    pub transit_time_local: Option<String>,
    pub timezone: Option<String>,
}

/// The service reports lookup failures as `{"error": ...}` with a 200 status.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum TargetResponse {
    Failed { error: String },
    Found(TargetDetail),
}

impl<'a> RestPath<&'a str> for TargetResponse {
    fn get_path(id: &'a str) -> Result<String, Error> {
        Ok(format!("target/{}", urlencoding::encode(id)))
    }
}
