use super::types::CatalogEntry;

/// Case-insensitive substring search over id, name and NGC designation.
///
/// An empty query matches nothing. Results keep catalog order.
pub fn search<'a>(
    catalog: &'a [CatalogEntry],
    query: &str,
    limit: Option<usize>,
) -> Vec<&'a CatalogEntry> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    let contains = |field: &Option<String>| {
        field
            .as_deref()
            .is_some_and(|v| v.to_lowercase().contains(&needle))
    };

    catalog
        .iter()
        .filter(|e| contains(&e.object_id) || contains(&e.name) || contains(&e.ngc))
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}

pub fn find<'a>(catalog: &'a [CatalogEntry], id: &str) -> Option<&'a CatalogEntry> {
    catalog.iter().find(|e| e.is_known_as(id))
}
