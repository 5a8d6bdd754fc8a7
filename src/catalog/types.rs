use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// One row of the external object catalog.
///
/// The catalog is produced from a spreadsheet export, so every field is
/// optional and numeric columns may arrive either as strings or numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CatalogEntry {
    #[serde(rename = "object ID", default, deserialize_with = "lenient_string")]
    pub object_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(rename = "NGC", default, deserialize_with = "lenient_string")]
    pub ngc: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub constellation: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub magnitude: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub size: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub distance: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub age: Option<String>,
    #[serde(rename = "Stars", default, deserialize_with = "lenient_string")]
    pub stars: Option<String>,
}

/// Details shown in the info dialog of a tracked object.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CatalogInfo {
    pub name: Option<String>,
    pub constellation: Option<String>,
    pub magnitude: Option<String>,
    pub size: Option<String>,
    pub distance: Option<String>,
    pub age: Option<String>,
    pub stars: Option<String>,
}

/// A search result: the catalog row plus the id to track it by.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CatalogHit {
    pub id: String,
    #[serde(flatten)]
    pub entry: CatalogEntry,
}

impl CatalogEntry {
    /// Identifier used to look the object up on the ephemeris service:
    /// the catalog id, else the NGC designation, else the name.
    pub fn target_id(&self) -> Option<&str> {
        [&self.object_id, &self.ngc, &self.name]
            .into_iter()
            .filter_map(|f| f.as_deref())
            .find(|s| !s.is_empty())
    }

    /// Pairs the entry with its target id. Entries without any usable
    /// identifier cannot be tracked and yield `None`.
    pub fn to_hit(&self) -> Option<CatalogHit> {
        let id = self.target_id()?.to_string();
        Some(CatalogHit {
            id,
            entry: self.clone(),
        })
    }

    /// True if any of id, NGC or name equals `id` exactly.
    pub fn is_known_as(&self, id: &str) -> bool {
        [&self.object_id, &self.ngc, &self.name]
            .into_iter()
            .any(|f| f.as_deref() == Some(id))
    }

    pub fn info(&self) -> CatalogInfo {
        CatalogInfo {
            name: self.name.clone(),
            constellation: self.constellation.clone(),
            magnitude: self.magnitude.clone(),
            size: self.size.clone(),
            distance: self.distance.clone(),
            age: self.age.clone(),
            stars: self.stars.clone(),
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        Some(other) => Some(other.to_string()),
    })
}
