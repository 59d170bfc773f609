//! Category-specific search projections.
//!
//! The backend returns a different record shape per search endpoint. Each
//! shape gets its own struct, and [`SearchResult`] tags them with the category
//! they came from so renderers can match exhaustively instead of probing
//! fields at runtime.

use crate::category::Category;
use crate::ids::RecordId;

const UNTITLED: &str = "Untitled";

#[cfg(feature = "serde")]
fn default_active() -> bool {
    true
}

/// Job post projection returned by job search.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JobResult {
    pub id: RecordId,
    #[cfg_attr(
        feature = "serde",
        serde(default, alias = "position_title")
    )]
    pub title: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, alias = "facility"))]
    pub facility_name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub facility_id: Option<RecordId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub city: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, alias = "state"))]
    pub state_province: Option<String>,
    #[cfg_attr(feature = "serde", serde(default = "default_active"))]
    pub is_active: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub score: Option<f64>,
}

/// Facility projection returned by facility search.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FacilityResult {
    pub id: RecordId,
    #[cfg_attr(feature = "serde", serde(default, alias = "name"))]
    pub legal_name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub industry: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bio: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, alias = "logo_url"))]
    pub profile_image_url: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, alias = "hq_city"))]
    pub city: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, alias = "hq_state_province", alias = "state")
    )]
    pub state_province: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub phone_e164: Option<String>,
}

/// Worker projection returned by worker search.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkerResult {
    pub id: RecordId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub first_name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub last_name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub city: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, alias = "state"))]
    pub state_province: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bio: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub profile_image_url: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub endorsement_count: Option<u32>,
}

impl WorkerResult {
    pub fn full_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

/// A single search hit, tagged with the category it was searched under.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "category", rename_all = "snake_case"))]
pub enum SearchResult {
    Job(JobResult),
    Facility(FacilityResult),
    Worker(WorkerResult),
}

impl SearchResult {
    pub fn id(&self) -> &RecordId {
        match self {
            SearchResult::Job(job) => &job.id,
            SearchResult::Facility(facility) => &facility.id,
            SearchResult::Worker(worker) => &worker.id,
        }
    }

    pub fn category(&self) -> Category {
        match self {
            SearchResult::Job(_) => Category::Jobs,
            SearchResult::Facility(_) => Category::Facilities,
            SearchResult::Worker(_) => Category::Workers,
        }
    }

    /// Card heading: job title, facility legal name or worker full name.
    pub fn display_title(&self) -> String {
        let title = match self {
            SearchResult::Job(job) => job.title.clone(),
            SearchResult::Facility(facility) => facility.legal_name.clone(),
            SearchResult::Worker(worker) => worker.full_name(),
        };

        title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| UNTITLED.to_string())
    }

    /// "City, State" line; either half may be missing.
    pub fn location_line(&self) -> String {
        let (city, state) = match self {
            SearchResult::Job(job) => (&job.city, &job.state_province),
            SearchResult::Facility(facility) => {
                (&facility.city, &facility.state_province)
            }
            SearchResult::Worker(worker) => (&worker.city, &worker.state_province),
        };

        match (city.as_deref(), state.as_deref()) {
            (Some(city), Some(state)) => format!("{city}, {state}"),
            (Some(city), None) => city.to_string(),
            (None, Some(state)) => state.to_string(),
            (None, None) => String::new(),
        }
    }

    pub fn as_job(&self) -> Option<&JobResult> {
        match self {
            SearchResult::Job(job) => Some(job),
            _ => None,
        }
    }
}
