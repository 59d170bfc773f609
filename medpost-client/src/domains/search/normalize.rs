//! Response-shape handling for search endpoints.
//!
//! Search endpoints answer with either `{ "items": [...] }` or a bare array.
//! Everything funnels through [`normalize_payload`] before records are typed.

use medpost_model::{
    Category, FacilityResult, JobResult, SearchResult, SessionIdentity, WorkerResult,
};
use serde_json::Value;

use super::error::SearchError;

/// Extract the record list from a search payload.
///
/// - object with `items`: that field, or empty when it is not an array
/// - array: as-is
/// - anything else (`null`, scalars, objects without `items`): empty
pub fn normalize_payload(payload: Value) -> Vec<Value> {
    match payload {
        Value::Object(mut map) => match map.remove("items") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        Value::Array(items) => items,
        _ => Vec::new(),
    }
}

/// Type every record under the shape of the category it was searched in.
pub fn parse_records(
    category: Category,
    records: Vec<Value>,
) -> Result<Vec<SearchResult>, SearchError> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let parsed = match category {
                Category::Jobs => {
                    serde_json::from_value::<JobResult>(record).map(SearchResult::Job)
                }
                Category::Facilities => serde_json::from_value::<FacilityResult>(record)
                    .map(SearchResult::Facility),
                Category::Workers => {
                    serde_json::from_value::<WorkerResult>(record).map(SearchResult::Worker)
                }
            };
            parsed.map_err(|source| SearchError::Record {
                category,
                index,
                source,
            })
        })
        .collect()
}

/// Drop the viewer's own record from facility and worker searches.
pub fn exclude_viewer(
    category: Category,
    viewer: Option<&SessionIdentity>,
    results: Vec<SearchResult>,
) -> Vec<SearchResult> {
    match viewer {
        Some(viewer) if category.excludes_viewer() => results
            .into_iter()
            .filter(|result| !viewer.is_self(result.id()))
            .collect(),
        _ => results,
    }
}
